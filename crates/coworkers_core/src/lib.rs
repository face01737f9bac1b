//! Core domain logic for coworker onboarding.
//! This crate is the single source of truth for company/member invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig,
    LoggingError,
};
pub use model::company::{Company, CompanyId, CompanyValidationError};
pub use model::member::{Member, MemberId, MemberValidationError};
pub use model::params::{
    CompanyAttributes, CoworkerParams, CoworkerParamsError, MemberAttributes,
};
pub use model::space::{Space, SpaceId};
pub use repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
pub use repo::member_repo::{MemberRepository, SqliteMemberRepository};
pub use repo::repository::{RepoError, RepoResult, Repository};
pub use repo::unit_of_work::{SqliteUnitOfWork, UnitOfWork};
pub use service::coworker_adder::{AddCoworkerError, AddedCoworker, CoworkerAdder};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
