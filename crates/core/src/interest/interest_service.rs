use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;

use super::interest_decoder::decode_batch;
use super::interest_model::{BatchSummary, InterestRecord, StoredInterestRecord};
use super::interest_traits::{InterestRepositoryTrait, InterestServiceTrait};

/// Runs a batch through decoding, calculation and persistence.
pub struct InterestService {
    repository: Arc<dyn InterestRepositoryTrait>,
}

impl InterestService {
    pub fn new(repository: Arc<dyn InterestRepositoryTrait>) -> Self {
        InterestService { repository }
    }

    /// Splits computed records into the ones to persist and the skip count,
    /// logging each skipped record.
    fn partition_insertable(
        batch_id: Uuid,
        records: Vec<InterestRecord>,
    ) -> (Vec<InterestRecord>, usize) {
        let mut insertable = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for (index, record) in records.into_iter().enumerate() {
            if record.is_insertable() {
                insertable.push(record);
                continue;
            }

            let input = record.input();
            warn!(
                "Batch {}: skipping record {} for account {} (balance={}, rate={}, start={}, end={}, interest={})",
                batch_id,
                index,
                input.account_id,
                input.balance,
                input.rate,
                input.start_date,
                input.end_date,
                record.interest_amount()
            );
            skipped += 1;
        }

        (insertable, skipped)
    }

    /// Sum of the amounts about to be stored, or `None` when it does not fit
    /// in a `Decimal`.
    fn total_interest(batch_id: Uuid, records: &[InterestRecord]) -> Option<Decimal> {
        let total: f64 = records.iter().map(InterestRecord::interest_amount).sum();
        let value =
            Decimal::from_f64_retain(total).map(|v| v.round_dp(DISPLAY_DECIMAL_PRECISION));
        if value.is_none() {
            warn!(
                "Batch {}: total interest {} cannot be represented as a decimal, omitting it",
                batch_id, total
            );
        }
        value
    }
}

#[async_trait]
impl InterestServiceTrait for InterestService {
    async fn process_batch(&self, payload: &str) -> Result<BatchSummary> {
        let batch_id = Uuid::new_v4();
        let inputs = decode_batch(payload)?;
        let received = inputs.len();
        info!("Batch {}: {} interest record(s) received", batch_id, received);

        let records: Vec<InterestRecord> =
            inputs.into_iter().map(InterestRecord::compute).collect();
        let (insertable, skipped) = Self::partition_insertable(batch_id, records);
        let total_interest = Self::total_interest(batch_id, &insertable);

        let inserted = if insertable.is_empty() {
            info!("Batch {}: nothing to insert", batch_id);
            0
        } else {
            self.repository
                .insert_batch(insertable)
                .await
                .inspect_err(|e| {
                    error!("Batch {}: insert failed, nothing committed: {}", batch_id, e)
                })?
        };

        info!(
            "Batch {}: {} inserted, {} skipped, total interest {:?}",
            batch_id, inserted, skipped, total_interest
        );

        Ok(BatchSummary {
            batch_id,
            received,
            inserted,
            skipped,
            total_interest,
        })
    }

    fn get_records(&self, account_id: Option<i32>) -> Result<Vec<StoredInterestRecord>> {
        self.repository.load_records(account_id)
    }

    fn check_storage(&self) -> Result<()> {
        self.repository.ping()
    }
}
