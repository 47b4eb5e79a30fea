//! # modelforge-protocol-tests
//!
//! Value objects describing protocol compliance test cases for malformed
//! requests: a service under test receives the request described by a
//! [`MalformedRequestDefinition`] and must answer with the error response
//! described by a [`MalformedResponseDefinition`].
//!
//! Every type here follows the same contract: construction only through a
//! validating builder, immutability after `build()`, a symmetric node
//! codec (`from_node` / `to_node`) that round-trips losslessly, and
//! `to_builder()` for copy-with-modification.
//!
//! ## Example
//!
//! ```rust
//! use modelforge_protocol_tests::{
//!     MalformedRequestDefinition, MalformedRequestTestCase, MalformedResponseDefinition,
//! };
//!
//! let test_case = MalformedRequestTestCase::builder()
//!     .id("malformed_request_1")
//!     .protocol("example#myProtocol".parse::<modelforge_model::ShapeId>().unwrap())
//!     .request(
//!         MalformedRequestDefinition::builder()
//!             .method("POST")
//!             .uri("/forecast")
//!             .build()
//!             .unwrap(),
//!     )
//!     .response(
//!         MalformedResponseDefinition::builder()
//!             .code(400)
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let reparsed = MalformedRequestTestCase::from_node(&test_case.to_node()).unwrap();
//! assert_eq!(reparsed, test_case);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod request;
pub mod response;
pub mod test_case;

#[cfg(test)]
mod proptest_round_trip;

pub use request::{MalformedRequestDefinition, MalformedRequestDefinitionBuilder};
pub use response::{MalformedResponseDefinition, MalformedResponseDefinitionBuilder};
pub use test_case::{MalformedRequestTestCase, MalformedRequestTestCaseBuilder};
