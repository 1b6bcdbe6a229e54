//! Project lifecycle management.
//!
//! Projects are named containers that own a bounded collection of tasks.
//! Names are unique case-insensitively and the number of projects is capped
//! by configuration. Deleting a project cascades to its tasks at the storage
//! layer. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Storage adapters for both projects and tasks live in
//! [`crate::storage`] because the cascade spans both tables.

pub mod domain;
pub mod ports;
pub mod services;
