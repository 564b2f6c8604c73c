use chrono::NaiveDateTime;

use crate::constants::DAYS_PER_YEAR;
use crate::utils::time_utils::days_between;

/// Simple interest accrued on `balance` at annual `rate` between two instants.
///
/// Returns `0.0` when the balance or rate is not positive, or when the period
/// is empty or reversed.
pub fn compute_interest(
    balance: f64,
    rate: f64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> f64 {
    if balance <= 0.0 || rate <= 0.0 || start >= end {
        return 0.0;
    }

    balance * rate * (days_between(start, end) / DAYS_PER_YEAR)
}
