//! Interest module - batch decoding, calculation, domain models, services, and traits.

mod interest_calculator;
mod interest_decoder;
mod interest_model;
mod interest_service;
mod interest_traits;

pub use interest_calculator::compute_interest;
pub use interest_decoder::decode_batch;
pub use interest_model::{BatchSummary, InterestInput, InterestRecord, StoredInterestRecord};
pub use interest_service::InterestService;
pub use interest_traits::{InterestRepositoryTrait, InterestServiceTrait};
