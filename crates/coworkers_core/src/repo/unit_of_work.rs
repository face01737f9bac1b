//! Atomic boundary around multi-repository writes.
//!
//! # Invariants
//! - `run` commits only when the work returns `Ok`.
//! - Any `Err` from the work leaves storage exactly as it was before `run`.
//! - The work's own error always wins over a failed rollback.

use crate::repo::repository::RepoError;
use log::{debug, error};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Executes a closure as one all-or-nothing unit.
pub trait UnitOfWork {
    fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>;
}

/// SQLite unit of work over the connection shared by the repositories.
///
/// Opens an `IMMEDIATE` transaction, so concurrent writers on the same
/// database file queue behind the busy timeout instead of interleaving.
pub struct SqliteUnitOfWork<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUnitOfWork<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UnitOfWork for SqliteUnitOfWork<'_> {
    fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>,
    {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;

        match work() {
            Ok(value) => {
                tx.commit().map_err(RepoError::from)?;
                Ok(value)
            }
            Err(err) => {
                match tx.rollback() {
                    Ok(()) => debug!("event=unit_of_work module=repo status=rolled_back"),
                    // SQLite discards the open transaction when the connection closes.
                    Err(rollback_err) => error!(
                        "event=unit_of_work module=repo status=error error_code=rollback_failed error={rollback_err}"
                    ),
                }
                Err(err)
            }
        }
    }
}
