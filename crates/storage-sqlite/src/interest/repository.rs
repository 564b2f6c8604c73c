use tardi_core::errors::{DatabaseError, Error};
use tardi_core::interest::{InterestRecord, InterestRepositoryTrait, StoredInterestRecord};
use tardi_core::Result;

use super::model::{InterestDB, NewInterestDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::interets;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use std::sync::Arc;

pub struct InterestRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InterestRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        InterestRepository { pool, writer }
    }
}

#[async_trait]
impl InterestRepositoryTrait for InterestRepository {
    async fn insert_batch(&self, records: Vec<InterestRecord>) -> Result<usize> {
        let rows: Vec<NewInterestDB> = records.iter().map(NewInterestDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected_rows = 0;
                for (index, row) in rows.iter().enumerate() {
                    affected_rows += diesel::insert_into(interets::table)
                        .values(row)
                        .execute(conn)
                        .map_err(|e| {
                            Error::Persistence(DatabaseError::TransactionFailed(format!(
                                "insert of record {} (account {}) failed, batch rolled back: {}",
                                index, row.compte_id, e
                            )))
                        })?;
                    debug!(
                        "Account {} inserted with interest {}",
                        row.compte_id, row.montant_interet
                    );
                }
                Ok(affected_rows)
            })
            .await
    }

    fn load_records(&self, account_id: Option<i32>) -> Result<Vec<StoredInterestRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = interets::table
            .select(InterestDB::as_select())
            .order(interets::rowid.asc())
            .into_boxed();
        if let Some(account) = account_id {
            query = query.filter(interets::compte_id.eq(account));
        }

        let rows = query
            .load::<InterestDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(StoredInterestRecord::from).collect())
    }

    fn count_records(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(interets::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    fn ping(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }
}
