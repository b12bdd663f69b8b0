//! Thin transaction wrapper: begin, run a caller-supplied unit of work,
//! commit when it reports success, roll back otherwise. No retry, no
//! timeout, no cancellation.

use crate::db::Db;

use satchel_core::Result;

/// Runs `worker` inside a transaction on the shared connection.
///
/// The worker's boolean is the commit decision: `Ok(true)` commits,
/// `Ok(false)` rolls back, and an error rolls back before propagating.
/// Operations issued from other threads while the worker runs share the
/// transaction, exactly as they share the connection.
pub fn execute<F>(db: &Db, worker: F) -> Result<bool>
where
    F: FnOnce(&Db) -> Result<bool>,
{
    db.execute_raw("BEGIN")?;
    match worker(db) {
        Ok(true) => {
            db.execute_raw("COMMIT")?;
            Ok(true)
        }
        Ok(false) => {
            db.execute_raw("ROLLBACK")?;
            Ok(false)
        }
        Err(err) => {
            if let Err(rollback_err) = db.execute_raw("ROLLBACK") {
                tracing::warn!(target: "satchel", error = %rollback_err,
                    "rollback failed after worker error");
            }
            Err(err)
        }
    }
}

impl Db {
    /// See [`execute`].
    pub fn transaction<F>(&self, worker: F) -> Result<bool>
    where
        F: FnOnce(&Db) -> Result<bool>,
    {
        execute(self, worker)
    }
}
