//! Storage bootstrap for the coworkers database.
//!
//! Every connection handed to repositories comes from [`open_db`] or
//! [`open_db_in_memory`], which configure SQLite and bring the schema to
//! [`migrations::latest_version`]. Repositories re-check that version in
//! their `try_new` constructors.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the coworkers database.
#[derive(Debug)]
pub enum DbError {
    /// Open, pragma or migration statement rejected by SQLite.
    Sqlite(rusqlite::Error),
    /// `PRAGMA user_version` is ahead of the migrations this build ships.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "coworkers storage error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "coworkers schema version {db_version} was written by a newer build (this build supports up to {latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
