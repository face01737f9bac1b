//! Typed coworker input.
//!
//! # Responsibility
//! - Carry the member and company attribute sets supplied by callers.
//! - Reject input that cannot even be looked up (blank company name).
//!
//! # Invariants
//! - `CoworkerParams::company().name` is trimmed and non-blank.
//! - Member attributes are kept raw; `Member::validate()` judges them.

use crate::model::space::SpaceId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw member attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberAttributes {
    pub name: Option<String>,
    pub phone_no: Option<String>,
    pub email: Option<String>,
}

impl MemberAttributes {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_phone_no(mut self, phone_no: impl Into<String>) -> Self {
        self.phone_no = Some(phone_no.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Raw company attributes.
///
/// `space_id` is accepted for compatibility with callers that send it, but
/// the adder always scopes companies to its own space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyAttributes {
    pub name: String,
    #[serde(default)]
    pub space_id: Option<SpaceId>,
}

impl CompanyAttributes {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            space_id: None,
        }
    }

    pub fn with_space_id(mut self, space_id: SpaceId) -> Self {
        self.space_id = Some(space_id);
        self
    }
}

/// Errors raised while assembling [`CoworkerParams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoworkerParamsError {
    /// Company name is empty or whitespace only.
    BlankCompanyName,
}

impl Display for CoworkerParamsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCompanyName => write!(f, "company name must not be blank"),
        }
    }
}

impl Error for CoworkerParamsError {}

/// Member + company attribute pair for one coworker add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoworkerParams {
    member: MemberAttributes,
    company: CompanyAttributes,
}

impl CoworkerParams {
    /// Builds params, trimming the company name.
    ///
    /// # Errors
    /// - `BlankCompanyName` when the company name is blank after trim.
    pub fn new(
        member: MemberAttributes,
        mut company: CompanyAttributes,
    ) -> Result<Self, CoworkerParamsError> {
        let trimmed = company.name.trim();
        if trimmed.is_empty() {
            return Err(CoworkerParamsError::BlankCompanyName);
        }
        company.name = trimmed.to_string();
        Ok(Self { member, company })
    }

    pub fn member(&self) -> &MemberAttributes {
        &self.member
    }

    pub fn company(&self) -> &CompanyAttributes {
        &self.company
    }
}
