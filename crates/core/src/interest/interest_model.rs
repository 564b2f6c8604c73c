//! Interest domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::interest_calculator::compute_interest;

/// Caller-supplied part of an interest record, as decoded from a request.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestInput {
    pub account_id: i32,
    pub balance: f64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub rate: f64,
}

/// An interest input together with its computed interest amount.
///
/// The amount can only be produced by [`InterestRecord::compute`], so a record
/// never carries a caller-supplied value.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestRecord {
    input: InterestInput,
    interest_amount: f64,
}

impl InterestRecord {
    pub fn compute(input: InterestInput) -> Self {
        let interest_amount =
            compute_interest(input.balance, input.rate, input.start_date, input.end_date);
        Self {
            input,
            interest_amount,
        }
    }

    pub fn input(&self) -> &InterestInput {
        &self.input
    }

    pub fn interest_amount(&self) -> f64 {
        self.interest_amount
    }

    /// Only records with a finite, strictly positive amount are persisted.
    pub fn is_insertable(&self) -> bool {
        self.interest_amount.is_finite() && self.interest_amount > 0.0
    }
}

/// A persisted interest row read back from storage
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredInterestRecord {
    pub id: i64,
    pub account_id: i32,
    pub balance: f64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub rate: f64,
    pub interest_amount: f64,
}

/// Outcome of one processed batch.
///
/// `received` counts every decoded record, including the ones skipped for
/// invalid economic inputs. `total_interest` is `None` when the sum of the
/// stored amounts does not fit in a `Decimal`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub batch_id: Uuid,
    pub received: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub total_interest: Option<Decimal>,
}
