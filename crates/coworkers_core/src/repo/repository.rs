//! Generic repository contract and shared SQLite helpers.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::company::CompanyValidationError;
use crate::model::member::MemberValidationError;
use rusqlite::{Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Member failed its own rules on a write path.
    InvalidMember(MemberValidationError),
    /// Company failed its own rules on a write path.
    InvalidCompany(CompanyValidationError),
    /// Member write attempted before its company was saved.
    MissingCompanyReference,
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted row cannot be converted to a valid entity.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMember(err) => write!(f, "{err}"),
            Self::InvalidCompany(err) => write!(f, "{err}"),
            Self::MissingCompanyReference => {
                write!(f, "member must reference a saved company")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "coworkers repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "coworkers repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "coworkers repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidMember(err) => Some(err),
            Self::InvalidCompany(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemberValidationError> for RepoError {
    fn from(value: MemberValidationError) -> Self {
        Self::InvalidMember(value)
    }
}

impl From<CompanyValidationError> for RepoError {
    fn from(value: CompanyValidationError) -> Self {
        Self::InvalidCompany(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract shared by every entity kind.
///
/// One repository instance serves one entity kind. `save` is insert-only:
/// records are never updated through this contract.
pub trait Repository {
    type Entity;
    type Id: Copy;

    /// Persists `entity` and returns it with its assigned id.
    fn save(&self, entity: &Self::Entity) -> RepoResult<Self::Entity>;
    fn find_by_id(&self, id: Self::Id) -> RepoResult<Option<Self::Entity>>;
    /// Returns every entity in insertion order.
    fn all(&self) -> RepoResult<Vec<Self::Entity>>;
    /// Removes every entity of this kind. Test/reset utility.
    fn clear(&self) -> RepoResult<()>;

    /// Returns the first entity, in insertion order, matching `predicate`.
    fn find_one<P>(&self, mut predicate: P) -> RepoResult<Option<Self::Entity>>
    where
        P: FnMut(&Self::Entity) -> bool,
    {
        Ok(self.all()?.into_iter().find(|entity| predicate(entity)))
    }

    fn count(&self) -> RepoResult<usize> {
        Ok(self.all()?.len())
    }

    fn first(&self) -> RepoResult<Option<Self::Entity>> {
        Ok(self.all()?.into_iter().next())
    }

    fn last(&self) -> RepoResult<Option<Self::Entity>> {
        Ok(self.all()?.into_iter().last())
    }
}

/// Rejects connections that are not migrated or miss `table` columns.
pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub(crate) fn uuid_column(row: &Row<'_>, column: &str, table: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn count_rows(conn: &Connection, table: &str) -> RepoResult<usize> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })?;
    usize::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count in {table}")))
}
