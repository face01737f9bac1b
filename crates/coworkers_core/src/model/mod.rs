//! Domain model for coworker onboarding.
//!
//! # Responsibility
//! - Define the entities persisted by core (`Company`, `Member`).
//! - Define the caller-supplied scope (`Space`) and typed input (`CoworkerParams`).
//!
//! # Invariants
//! - Entity ids are `None` until a repository assigns them on save.
//! - Every company and member belongs to exactly one space.
//! - Validation rules live on the entity, not in repositories or services.

pub mod company;
pub mod member;
pub mod params;
pub mod space;
