//! Task lifecycle management.
//!
//! Tasks belong to exactly one project, carry a `todo`/`doing`/`done`
//! status and an optional deadline. Creation enforces a per-project
//! capacity and rejects deadlines dated before today. A batch rule closes
//! overdue tasks, stamping `closed_at` exactly once per task. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
