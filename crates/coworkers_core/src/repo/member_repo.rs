//! Member repository contract and SQLite implementation.
//!
//! # Invariants
//! - Members are only written once validated and linked to a saved company.
//! - `is_boss` is stored as `0/1` and rejected otherwise on read.

use crate::model::company::CompanyId;
use crate::model::member::{Member, MemberId};
use crate::repo::repository::{
    bool_to_int, count_rows, ensure_table_ready, uuid_column, RepoError, RepoResult, Repository,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const MEMBER_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    phone_no,
    email,
    company_uuid,
    space_id,
    is_boss
FROM members";
const MEMBER_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "phone_no",
    "email",
    "company_uuid",
    "space_id",
    "is_boss",
    "created_at",
];

/// Member persistence contract.
pub trait MemberRepository: Repository<Entity = Member, Id = MemberId> {
    /// Lists members of one company in insertion order.
    fn list_by_company(&self, company_id: CompanyId) -> RepoResult<Vec<Member>>;
}

/// SQLite-backed member repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "members", MEMBER_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_all(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Member>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }
        Ok(members)
    }

    fn query_one(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Option<Member>> {
        Ok(self.query_all(sql, params)?.into_iter().next())
    }
}

impl Repository for SqliteMemberRepository<'_> {
    type Entity = Member;
    type Id = MemberId;

    fn save(&self, member: &Member) -> RepoResult<Member> {
        member.validate()?;
        let company_id = member.company_id.ok_or(RepoError::MissingCompanyReference)?;

        let id = member.id.unwrap_or_else(Uuid::new_v4);
        self.conn.execute(
            "INSERT INTO members (
                uuid,
                name,
                phone_no,
                email,
                company_uuid,
                space_id,
                is_boss
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                id.to_string(),
                member.name.as_str(),
                member.phone_no.as_deref(),
                member.email.as_deref(),
                company_id.to_string(),
                member.space_id,
                bool_to_int(member.is_boss),
            ],
        )?;

        Ok(Member {
            id: Some(id),
            ..member.clone()
        })
    }

    fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        self.query_one(
            &format!("{MEMBER_SELECT_SQL} WHERE uuid = ?1;"),
            [id.to_string()],
        )
    }

    fn all(&self) -> RepoResult<Vec<Member>> {
        self.query_all(&format!("{MEMBER_SELECT_SQL} ORDER BY rowid ASC;"), [])
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM members;", [])?;
        Ok(())
    }

    fn count(&self) -> RepoResult<usize> {
        count_rows(self.conn, "members")
    }

    fn first(&self) -> RepoResult<Option<Member>> {
        self.query_one(&format!("{MEMBER_SELECT_SQL} ORDER BY rowid ASC LIMIT 1;"), [])
    }

    fn last(&self) -> RepoResult<Option<Member>> {
        self.query_one(&format!("{MEMBER_SELECT_SQL} ORDER BY rowid DESC LIMIT 1;"), [])
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn list_by_company(&self, company_id: CompanyId) -> RepoResult<Vec<Member>> {
        self.query_all(
            &format!("{MEMBER_SELECT_SQL} WHERE company_uuid = ?1 ORDER BY rowid ASC;"),
            [company_id.to_string()],
        )
    }
}

fn parse_member_row(row: &Row<'_>) -> RepoResult<Member> {
    let is_boss = match row.get::<_, i64>("is_boss")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_boss value `{other}` in members.is_boss"
            )));
        }
    };

    Ok(Member {
        id: Some(uuid_column(row, "uuid", "members")?),
        name: row.get("name")?,
        phone_no: row.get("phone_no")?,
        email: row.get("email")?,
        company_id: Some(uuid_column(row, "company_uuid", "members")?),
        space_id: row.get("space_id")?,
        is_boss,
    })
}
