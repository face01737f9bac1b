//! Coworker onboarding use case.
//!
//! # Responsibility
//! - Resolve the member's company inside the current space, creating it when
//!   no company with that name exists there yet.
//! - Validate the member before anything is written.
//! - Persist company (when new) and member as one unit of work.
//!
//! # Invariants
//! - Company lookup always uses the adder's space, never a caller-supplied
//!   `space_id`.
//! - An invalid member leaves both repositories untouched.
//! - The member is boss exactly when its company was created by this call.

use crate::model::company::{Company, CompanyValidationError};
use crate::model::member::{Member, MemberValidationError};
use crate::model::params::CoworkerParams;
use crate::model::space::Space;
use crate::repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
use crate::repo::member_repo::{MemberRepository, SqliteMemberRepository};
use crate::repo::repository::{RepoError, RepoResult};
use crate::repo::unit_of_work::{SqliteUnitOfWork, UnitOfWork};
use log::{error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors from [`CoworkerAdder::add`].
#[derive(Debug)]
pub enum AddCoworkerError {
    /// Member failed validation; nothing was persisted.
    InvalidMember(MemberValidationError),
    /// Newly resolved company failed validation; nothing was persisted.
    InvalidCompany(CompanyValidationError),
    /// Persistence-layer failure, propagated unchanged.
    Repo(RepoError),
}

impl AddCoworkerError {
    /// Returns whether the failure came from entity rules rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidMember(_) | Self::InvalidCompany(_))
    }

    /// Stable code safe to log; never contains member or company input.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InvalidMember(err) => err.code(),
            Self::InvalidCompany(err) => err.code(),
            Self::Repo(_) => "storage",
        }
    }
}

impl Display for AddCoworkerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMember(err) => write!(f, "invalid coworker: {err}"),
            Self::InvalidCompany(err) => write!(f, "invalid company: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AddCoworkerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidMember(err) => Some(err),
            Self::InvalidCompany(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for AddCoworkerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidMember(err) => Self::InvalidMember(err),
            RepoError::InvalidCompany(err) => Self::InvalidCompany(err),
            other => Self::Repo(other),
        }
    }
}

/// Successful outcome of one coworker add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedCoworker {
    /// Persisted member, id assigned.
    pub member: Member,
    /// Company the member now belongs to, id assigned.
    pub company: Company,
    /// `true` when `company` was created by this call.
    pub company_created: bool,
}

/// Company picked during resolution, possibly not persisted yet.
#[derive(Debug)]
struct ResolvedCompany {
    company: Company,
    is_new: bool,
}

/// Interactor for the "add coworker" use case.
pub struct CoworkerAdder<'space, C, M, U> {
    params: CoworkerParams,
    space: &'space Space,
    companies: C,
    members: M,
    unit_of_work: U,
}

impl<'conn, 'space>
    CoworkerAdder<
        'space,
        SqliteCompanyRepository<'conn>,
        SqliteMemberRepository<'conn>,
        SqliteUnitOfWork<'conn>,
    >
{
    /// Wires SQLite repositories sharing one migrated connection.
    pub fn with_sqlite(
        params: CoworkerParams,
        space: &'space Space,
        conn: &'conn Connection,
    ) -> RepoResult<Self> {
        Ok(Self::new(
            params,
            space,
            SqliteCompanyRepository::try_new(conn)?,
            SqliteMemberRepository::try_new(conn)?,
            SqliteUnitOfWork::new(conn),
        ))
    }
}

impl<'space, C, M, U> CoworkerAdder<'space, C, M, U>
where
    C: CompanyRepository,
    M: MemberRepository,
    U: UnitOfWork,
{
    pub fn new(
        params: CoworkerParams,
        space: &'space Space,
        companies: C,
        members: M,
        unit_of_work: U,
    ) -> Self {
        Self {
            params,
            space,
            companies,
            members,
            unit_of_work,
        }
    }

    /// Adds the coworker described by the params to the space.
    ///
    /// # Contract
    /// - Company missing in this space: creates it and marks the member boss.
    /// - Company present in this space: reuses it, member is not boss.
    /// - Not idempotent; each successful call persists one new member.
    ///
    /// # Errors
    /// - `InvalidMember` / `InvalidCompany` when entity rules fail. No writes.
    /// - `Repo` for storage failures. The unit of work is rolled back.
    pub fn add(&self) -> Result<AddedCoworker, AddCoworkerError> {
        let started_at = Instant::now();
        info!(
            "event=coworker_add module=service status=start space_id={}",
            self.space.id
        );

        let result = self.unit_of_work.run(|| self.add_in_unit());

        let duration_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(added) => info!(
                "event=coworker_add module=service status=ok space_id={} company_created={} duration_ms={duration_ms}",
                self.space.id, added.company_created
            ),
            Err(err) if err.is_validation() => warn!(
                "event=coworker_add module=service status=aborted space_id={} duration_ms={duration_ms} reason_code={}",
                self.space.id,
                err.reason_code()
            ),
            Err(err) => error!(
                "event=coworker_add module=service status=error space_id={} duration_ms={duration_ms} error={err}",
                self.space.id
            ),
        }

        result
    }

    fn add_in_unit(&self) -> Result<AddedCoworker, AddCoworkerError> {
        let ResolvedCompany { company, is_new } = self.resolve_company()?;

        let mut member = Member::build(self.params.member(), &company, self.space);
        member.validate().map_err(AddCoworkerError::InvalidMember)?;

        let company = if is_new {
            self.companies.save(&company)?
        } else {
            company
        };
        member.company_id = company.id;
        member.is_boss = is_new;
        let member = self.members.save(&member)?;

        Ok(AddedCoworker {
            member,
            company,
            company_created: is_new,
        })
    }

    fn resolve_company(&self) -> Result<ResolvedCompany, AddCoworkerError> {
        let name = self.params.company().name.as_str();
        if let Some(company) = self.companies.find_by_name_in_space(name, self.space.id)? {
            return Ok(ResolvedCompany {
                company,
                is_new: false,
            });
        }

        let company = Company::new(name, self.space.id);
        company
            .validate()
            .map_err(AddCoworkerError::InvalidCompany)?;
        Ok(ResolvedCompany {
            company,
            is_new: true,
        })
    }
}
