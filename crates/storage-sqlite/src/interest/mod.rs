//! SQLite storage implementation for interest records.

mod model;
mod repository;

pub use model::{InterestDB, NewInterestDB};
pub use repository::InterestRepository;
