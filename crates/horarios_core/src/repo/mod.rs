//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the schedule data-access contract used by services.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Failures are logged once, at the store boundary.

pub mod schedule_repo;
