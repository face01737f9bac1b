//! Member (coworker) domain model.
//!
//! # Responsibility
//! - Define the person record attached to one company inside one space.
//! - Own the validation rules that gate member persistence.
//!
//! # Invariants
//! - `name`, `phone_no` and `email` must be present and well-formed before
//!   a member can be persisted.
//! - `is_boss` defaults to `false`; only the coworker adder sets it.
//! - A persisted member always carries a `company_id`.

use crate::model::company::{Company, CompanyId};
use crate::model::params::MemberAttributes;
use crate::model::space::{Space, SpaceId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable member identifier assigned on first save.
pub type MemberId = Uuid;

static PHONE_NO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]*$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validation failures for member records, reported in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    /// Name is empty or whitespace only.
    BlankName,
    /// Phone number is absent or blank.
    MissingPhoneNo,
    /// Phone number contains characters other than digits and separators.
    InvalidPhoneNo(String),
    /// Email is absent or blank.
    MissingEmail,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// An assigned id must never be nil.
    NilId,
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "member name must not be blank"),
            Self::MissingPhoneNo => write!(f, "member phone number is required"),
            Self::InvalidPhoneNo(value) => write!(f, "invalid member phone number: `{value}`"),
            Self::MissingEmail => write!(f, "member email is required"),
            Self::InvalidEmail(value) => write!(f, "invalid member email: `{value}`"),
            Self::NilId => write!(f, "member id must not be nil"),
        }
    }
}

impl Error for MemberValidationError {}

impl MemberValidationError {
    /// Stable, value-free code for logs and metrics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankName => "blank_name",
            Self::MissingPhoneNo => "missing_phone_no",
            Self::InvalidPhoneNo(_) => "invalid_phone_no",
            Self::MissingEmail => "missing_email",
            Self::InvalidEmail(_) => "invalid_email",
            Self::NilId => "nil_id",
        }
    }
}

/// Coworker record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// `None` until persisted.
    pub id: Option<MemberId>,
    pub name: String,
    pub phone_no: Option<String>,
    pub email: Option<String>,
    /// `None` while the referenced company is still unsaved.
    pub company_id: Option<CompanyId>,
    pub space_id: SpaceId,
    #[serde(default)]
    pub is_boss: bool,
}

impl Member {
    /// Builds an unsaved member from raw attributes.
    ///
    /// `company` may itself be unsaved; in that case `company_id` stays
    /// `None` until the company receives an id. The space always comes from
    /// `space`, never from the attributes. Text fields are trimmed and blank
    /// contact fields become `None`.
    pub fn build(attributes: &MemberAttributes, company: &Company, space: &Space) -> Self {
        Self {
            id: None,
            name: attributes
                .name
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            phone_no: present(attributes.phone_no.as_deref()).map(str::to_string),
            email: present(attributes.email.as_deref()).map(str::to_string),
            company_id: company.id,
            space_id: space.id,
            is_boss: false,
        }
    }

    /// Checks member rules and returns the first failure.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::BlankName);
        }

        let phone_no =
            present(self.phone_no.as_deref()).ok_or(MemberValidationError::MissingPhoneNo)?;
        if !PHONE_NO_RE.is_match(phone_no) {
            return Err(MemberValidationError::InvalidPhoneNo(phone_no.to_string()));
        }

        let email =
            present(self.email.as_deref()).ok_or(MemberValidationError::MissingEmail)?;
        if !EMAIL_RE.is_match(email) {
            return Err(MemberValidationError::InvalidEmail(email.to_string()));
        }

        if self.id.is_some_and(|id| id.is_nil()) {
            return Err(MemberValidationError::NilId);
        }

        Ok(())
    }

    /// Boolean form of [`Member::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
