//! Schedule domain model and admin write-path validation.
//!
//! # Responsibility
//! - Define the persisted schedule record and its create/patch shapes.
//! - Keep validation rules next to the data they guard.
//!
//! # Invariants
//! - Every persisted schedule is identified by a store-assigned `ScheduleId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod schedule;
pub mod validation;
