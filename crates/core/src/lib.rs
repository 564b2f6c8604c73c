//! Tardi Core - interest batch domain, services, and traits.
//!
//! This crate contains the business logic of the interest batch service:
//! decoding request payloads, computing simple interest and running a batch
//! through a repository. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod interest;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
