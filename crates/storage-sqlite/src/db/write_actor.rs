use super::{get_connection, DbPool};
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::debug;
use std::any::Any;
use tardi_core::errors::{Error, Result};
use tokio::sync::{mpsc, oneshot};

// A job receives the connection already inside a transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor.
    ///
    /// The job runs inside one immediate transaction on a connection taken from
    /// the pool for this job only. It commits when the job returns `Ok` and
    /// rolls back otherwise. A connection that cannot be acquired fails the
    /// job with `Error::Configuration` before it starts.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| Error::Unexpected("database writer is not running".to_string()))?;

        let boxed = ret_rx.await.map_err(|_| {
            Error::Unexpected("database writer dropped the job without replying".to_string())
        })??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Unexpected("database writer returned an unexpected type".to_string()))
    }
}

fn run_job(pool: &DbPool, job: ErasedJob) -> Result<Box<dyn Any + Send + 'static>> {
    let mut conn = get_connection(pool)?;

    conn.immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
        .map_err(Error::from)
}

/// Spawns a background Tokio task that acts as the single writer to the database.
/// Jobs are processed one at a time, so concurrent batches never interleave.
///
/// # Arguments
/// * `pool`: The database connection pool.
///
/// # Returns
/// A `WriteHandle` to send jobs to the spawned actor.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    // The channel is bounded; 1024 is an arbitrary size.
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result = run_job(&pool, job);
            // The requester may have gone away (timeout, cancelled request).
            let _ = reply_tx.send(result);
        }
        debug!("All write handles dropped, database writer stopping");
    });

    WriteHandle { tx }
}
