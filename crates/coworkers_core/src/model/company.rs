//! Company domain model.
//!
//! # Responsibility
//! - Define the organization record scoped to one space.
//!
//! # Invariants
//! - `name` is non-blank.
//! - `(name, space_id)` is the lookup key; equal names in different spaces
//!   are distinct companies.

use crate::model::space::SpaceId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable company identifier assigned on first save.
pub type CompanyId = Uuid;

/// Validation failures for company records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyValidationError {
    /// Name is empty or whitespace only.
    BlankName,
    /// An assigned id must never be nil.
    NilId,
}

impl Display for CompanyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "company name must not be blank"),
            Self::NilId => write!(f, "company id must not be nil"),
        }
    }
}

impl Error for CompanyValidationError {}

impl CompanyValidationError {
    /// Stable, value-free code for logs and metrics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankName => "blank_name",
            Self::NilId => "nil_id",
        }
    }
}

/// Organization that coworkers belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// `None` until persisted.
    pub id: Option<CompanyId>,
    pub name: String,
    pub space_id: SpaceId,
}

impl Company {
    /// Builds an unsaved company inside `space_id`.
    pub fn new(name: impl Into<String>, space_id: SpaceId) -> Self {
        Self {
            id: None,
            name: name.into(),
            space_id,
        }
    }

    /// Returns whether a repository has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> Result<(), CompanyValidationError> {
        if self.name.trim().is_empty() {
            return Err(CompanyValidationError::BlankName);
        }
        if self.id.is_some_and(|id| id.is_nil()) {
            return Err(CompanyValidationError::NilId);
        }
        Ok(())
    }
}
