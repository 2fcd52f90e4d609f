//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the browse and admin flows.
//! - Keep the CLI decoupled from storage details.

pub mod admin_service;
pub mod browse_service;
