use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tardi_core::interest::{BatchSummary, StoredInterestRecord};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body returned for a processed batch.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    /// Human-readable summary; the count is the number of records received.
    pub message: String,
    pub batch_id: Uuid,
    pub received: usize,
    pub inserted: usize,
    pub skipped: usize,
    /// Left out when the total does not fit in a decimal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_interest: Option<Decimal>,
}

impl From<BatchSummary> for BatchResponse {
    fn from(s: BatchSummary) -> Self {
        Self {
            message: format!("Succès : {} enregistrements traités.", s.received),
            batch_id: s.batch_id,
            received: s.received,
            inserted: s.inserted,
            skipped: s.skipped,
            total_interest: s.total_interest,
        }
    }
}

/// A persisted interest row, using the table's column names.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct InterestRow {
    pub id: i64,
    #[serde(rename = "CompteID")]
    pub compte_id: i32,
    pub solde: f64,
    pub date_debut: NaiveDateTime,
    pub date_fin: NaiveDateTime,
    pub taux: f64,
    pub montant_interet: f64,
}

impl From<StoredInterestRecord> for InterestRow {
    fn from(r: StoredInterestRecord) -> Self {
        Self {
            id: r.id,
            compte_id: r.account_id,
            solde: r.balance,
            date_debut: r.start_date,
            date_fin: r.end_date,
            taux: r.rate,
            montant_interet: r.interest_amount,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InterestRowsQuery {
    pub compte_id: Option<i32>,
}
