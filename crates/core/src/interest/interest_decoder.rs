use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::errors::DecodeError;
use crate::utils::time_utils::parse_iso_datetime;

use super::interest_model::InterestInput;

/// Wire shape of one record. Keys are lowercased before matching, so
/// `CompteID`, `compteId` and `COMPTEID` all land on `compteid`.
#[derive(Deserialize)]
struct InterestInputDto {
    #[serde(rename = "compteid")]
    account_id: i32,
    #[serde(rename = "solde")]
    balance: f64,
    #[serde(rename = "datedebut", deserialize_with = "deserialize_iso_datetime")]
    start_date: NaiveDateTime,
    #[serde(rename = "datefin", deserialize_with = "deserialize_iso_datetime")]
    end_date: NaiveDateTime,
    #[serde(rename = "taux")]
    rate: f64,
}

impl From<InterestInputDto> for InterestInput {
    fn from(dto: InterestInputDto) -> Self {
        Self {
            account_id: dto.account_id,
            balance: dto.balance,
            start_date: dto.start_date,
            end_date: dto.end_date,
            rate: dto.rate,
        }
    }
}

fn deserialize_iso_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("'{}' is not an ISO-8601 date", raw)))
}

/// Decodes a request payload into the interest inputs of one batch.
///
/// The payload must be a non-empty JSON array of objects. Unknown fields are
/// ignored, which includes any caller-supplied interest amount.
pub fn decode_batch(payload: &str) -> Result<Vec<InterestInput>, DecodeError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(DecodeError::NotAnArray);
    };
    if items.is_empty() {
        return Err(DecodeError::EmptyBatch);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            decode_record(item).map_err(|reason| DecodeError::InvalidRecord { index, reason })
        })
        .collect()
}

fn decode_record(item: Value) -> Result<InterestInput, String> {
    let Value::Object(fields) = item else {
        return Err("expected a JSON object".to_string());
    };

    let mut normalized = Map::with_capacity(fields.len());
    for (key, value) in fields {
        let key = key.to_lowercase();
        if normalized.contains_key(&key) {
            return Err(format!("duplicate field `{}`", key));
        }
        normalized.insert(key, value);
    }

    serde_json::from_value::<InterestInputDto>(Value::Object(normalized))
        .map(InterestInput::from)
        .map_err(|e| e.to_string())
}
