use crate::errors::Result;
use crate::interest::interest_model::{BatchSummary, InterestRecord, StoredInterestRecord};
use async_trait::async_trait;

/// Trait for interest repository operations
#[async_trait]
pub trait InterestRepositoryTrait: Send + Sync {
    /// Inserts every record inside one transaction and returns the row count.
    /// Either all records are committed or none are.
    async fn insert_batch(&self, records: Vec<InterestRecord>) -> Result<usize>;
    fn load_records(&self, account_id: Option<i32>) -> Result<Vec<StoredInterestRecord>>;
    fn count_records(&self) -> Result<i64>;
    fn ping(&self) -> Result<()>;
}

/// Trait for interest service operations
#[async_trait]
pub trait InterestServiceTrait: Send + Sync {
    async fn process_batch(&self, payload: &str) -> Result<BatchSummary>;
    fn get_records(&self, account_id: Option<i32>) -> Result<Vec<StoredInterestRecord>>;
    fn check_storage(&self) -> Result<()>;
}
