//! Property-based tests for the interest calculator.
//!
//! These tests verify that the calculator's properties hold across random
//! valid inputs, using the `proptest` crate for test case generation.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use proptest::prelude::*;
use tardi_core::interest::{compute_interest, decode_batch, InterestInput, InterestRecord};

// =============================================================================
// Generators
// =============================================================================

/// Generates a period start between 2000 and roughly 2050, with minute precision.
fn arb_start() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..(50 * 365 * 24 * 60)).prop_map(|minutes| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + TimeDelta::minutes(minutes)
    })
}

/// Generates a positive period length of up to ten years, in minutes.
fn arb_span() -> impl Strategy<Value = i64> {
    1i64..(10 * 365 * 24 * 60)
}

fn arb_balance() -> impl Strategy<Value = f64> {
    0.01f64..10_000_000.0
}

fn arb_rate() -> impl Strategy<Value = f64> {
    0.0001f64..1.0
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Valid inputs always produce a positive, finite amount.
    #[test]
    fn prop_valid_inputs_accrue_interest(
        balance in arb_balance(),
        rate in arb_rate(),
        start in arb_start(),
        span in arb_span(),
    ) {
        let end = start + TimeDelta::minutes(span);
        let amount = compute_interest(balance, rate, start, end);
        prop_assert!(amount.is_finite());
        prop_assert!(amount > 0.0);
    }

    /// Interest never decreases when the balance grows.
    #[test]
    fn prop_monotonic_in_balance(
        balance in arb_balance(),
        extra in 0.0f64..1_000_000.0,
        rate in arb_rate(),
        start in arb_start(),
        span in arb_span(),
    ) {
        let end = start + TimeDelta::minutes(span);
        prop_assert!(
            compute_interest(balance + extra, rate, start, end)
                >= compute_interest(balance, rate, start, end)
        );
    }

    /// Interest never decreases when the rate grows.
    #[test]
    fn prop_monotonic_in_rate(
        balance in arb_balance(),
        rate in arb_rate(),
        extra in 0.0f64..1.0,
        start in arb_start(),
        span in arb_span(),
    ) {
        let end = start + TimeDelta::minutes(span);
        prop_assert!(
            compute_interest(balance, rate + extra, start, end)
                >= compute_interest(balance, rate, start, end)
        );
    }

    /// Interest never decreases when the period is extended.
    #[test]
    fn prop_monotonic_in_span(
        balance in arb_balance(),
        rate in arb_rate(),
        start in arb_start(),
        span in arb_span(),
        extra in 0i64..(365 * 24 * 60),
    ) {
        let short_end = start + TimeDelta::minutes(span);
        let long_end = short_end + TimeDelta::minutes(extra);
        prop_assert!(
            compute_interest(balance, rate, start, long_end)
                >= compute_interest(balance, rate, start, short_end)
        );
    }

    /// Zero balance, zero rate or an empty period yield exactly zero.
    #[test]
    fn prop_degenerate_inputs_yield_zero(
        balance in arb_balance(),
        rate in arb_rate(),
        start in arb_start(),
        span in arb_span(),
    ) {
        let end = start + TimeDelta::minutes(span);
        prop_assert_eq!(compute_interest(0.0, rate, start, end), 0.0);
        prop_assert_eq!(compute_interest(balance, 0.0, start, end), 0.0);
        prop_assert_eq!(compute_interest(balance, rate, start, start), 0.0);
        prop_assert_eq!(compute_interest(balance, rate, end, start), 0.0);
    }

    /// Identical inputs always give identical amounts.
    #[test]
    fn prop_deterministic(
        balance in arb_balance(),
        rate in arb_rate(),
        start in arb_start(),
        span in arb_span(),
    ) {
        let end = start + TimeDelta::minutes(span);
        let first = compute_interest(balance, rate, start, end);
        let second = compute_interest(balance, rate, start, end);
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    /// A record is insertable exactly when its inputs are economically valid.
    #[test]
    fn prop_record_insertable_iff_valid(
        balance in -1000.0f64..1000.0,
        rate in -0.5f64..0.5,
        start in arb_start(),
        offset in -1000i64..1000,
    ) {
        let end = start + TimeDelta::minutes(offset);
        let record = InterestRecord::compute(InterestInput {
            account_id: 1,
            balance,
            start_date: start,
            end_date: end,
            rate,
        });
        let valid = balance > 0.0 && rate > 0.0 && start < end;
        prop_assert_eq!(record.is_insertable(), valid);
    }
}

#[test]
fn decoded_reference_payload_matches_documented_amount() {
    let payload = r#"[{"CompteID":1,"Solde":1000,"DateDebut":"2024-01-01","DateFin":"2024-07-01","Taux":0.05}]"#;
    let inputs = decode_batch(payload).unwrap();
    let record = InterestRecord::compute(inputs.into_iter().next().unwrap());
    assert!((record.interest_amount() - 1000.0 * 0.05 * (182.0 / 365.0)).abs() < 1e-9);
    assert!(record.is_insertable());
}
