//! Database models for interest records.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use tardi_core::interest::{InterestRecord, StoredInterestRecord};

/// Database model for a persisted interest row
#[derive(Queryable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::interets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InterestDB {
    pub rowid: i64,
    pub compte_id: i32,
    pub solde: f64,
    pub date_debut: NaiveDateTime,
    pub date_fin: NaiveDateTime,
    pub taux: f64,
    pub montant_interet: f64,
}

/// Database model for inserting an interest row
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::interets)]
pub struct NewInterestDB {
    pub compte_id: i32,
    pub solde: f64,
    pub date_debut: NaiveDateTime,
    pub date_fin: NaiveDateTime,
    pub taux: f64,
    pub montant_interet: f64,
}

// Conversion to domain models
impl From<InterestDB> for StoredInterestRecord {
    fn from(db: InterestDB) -> Self {
        Self {
            id: db.rowid,
            account_id: db.compte_id,
            balance: db.solde,
            start_date: db.date_debut,
            end_date: db.date_fin,
            rate: db.taux,
            interest_amount: db.montant_interet,
        }
    }
}

impl From<&InterestRecord> for NewInterestDB {
    fn from(record: &InterestRecord) -> Self {
        let input = record.input();
        Self {
            compte_id: input.account_id,
            solde: input.balance,
            date_debut: input.start_date,
            date_fin: input.end_date,
            taux: input.rate,
            montant_interet: record.interest_amount(),
        }
    }
}
