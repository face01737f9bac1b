//! Company repository contract and SQLite implementation.
//!
//! # Invariants
//! - `(space_id, name)` is unique in storage; the lookup used by the
//!   coworker adder is an exact match on both.
//! - Companies are never updated here; `save` always inserts.

use crate::model::company::{Company, CompanyId};
use crate::model::space::SpaceId;
use crate::repo::repository::{
    count_rows, ensure_table_ready, uuid_column, RepoError, RepoResult, Repository,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const COMPANY_SELECT_SQL: &str = "SELECT uuid, name, space_id FROM companies";
const COMPANY_COLUMNS: &[&str] = &["uuid", "name", "space_id", "created_at"];

/// Company persistence contract.
pub trait CompanyRepository: Repository<Entity = Company, Id = CompanyId> {
    /// Finds the company named exactly `name` inside `space_id`.
    fn find_by_name_in_space(&self, name: &str, space_id: SpaceId) -> RepoResult<Option<Company>>;
}

/// SQLite-backed company repository.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "companies", COMPANY_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_one(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Option<Company>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_company_row(row)?)),
            None => Ok(None),
        }
    }
}

impl Repository for SqliteCompanyRepository<'_> {
    type Entity = Company;
    type Id = CompanyId;

    fn save(&self, company: &Company) -> RepoResult<Company> {
        company.validate()?;

        let id = company.id.unwrap_or_else(Uuid::new_v4);
        self.conn.execute(
            "INSERT INTO companies (uuid, name, space_id) VALUES (?1, ?2, ?3);",
            params![id.to_string(), company.name.as_str(), company.space_id],
        )?;

        Ok(Company {
            id: Some(id),
            ..company.clone()
        })
    }

    fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        self.query_one(
            &format!("{COMPANY_SELECT_SQL} WHERE uuid = ?1;"),
            [id.to_string()],
        )
    }

    fn all(&self) -> RepoResult<Vec<Company>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPANY_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row)?);
        }
        Ok(companies)
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM companies;", [])?;
        Ok(())
    }

    fn count(&self) -> RepoResult<usize> {
        count_rows(self.conn, "companies")
    }

    fn first(&self) -> RepoResult<Option<Company>> {
        self.query_one(&format!("{COMPANY_SELECT_SQL} ORDER BY rowid ASC LIMIT 1;"), [])
    }

    fn last(&self) -> RepoResult<Option<Company>> {
        self.query_one(&format!("{COMPANY_SELECT_SQL} ORDER BY rowid DESC LIMIT 1;"), [])
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn find_by_name_in_space(
        &self,
        name: &str,
        space_id: SpaceId,
    ) -> RepoResult<Option<Company>> {
        self.query_one(
            &format!("{COMPANY_SELECT_SQL} WHERE name = ?1 AND space_id = ?2;"),
            params![name, space_id],
        )
    }
}

fn parse_company_row(row: &Row<'_>) -> RepoResult<Company> {
    let company = Company {
        id: Some(uuid_column(row, "uuid", "companies")?),
        name: row.get("name")?,
        space_id: row.get("space_id")?,
    };
    company
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("companies row: {err}")))?;
    Ok(company)
}
