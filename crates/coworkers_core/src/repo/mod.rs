//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the per-entity persistence contracts used by the coworker adder.
//! - Isolate SQLite query details from service orchestration.
//! - Provide the unit-of-work boundary that makes one add atomic.
//!
//! # Invariants
//! - Write paths validate entities before any SQL mutation.
//! - Ids are assigned by `save`, never by callers of the service layer.
//! - Listing order is insertion order.

pub mod company_repo;
pub mod member_repo;
pub mod repository;
pub mod unit_of_work;
