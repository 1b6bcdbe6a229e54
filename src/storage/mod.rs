//! Persistence adapters for projects and tasks.
//!
//! Both adapters implement [`ProjectRepository`] and [`TaskRepository`] and
//! enforce the relationship between the two: deleting a project removes its
//! tasks in the same atomic step, and a task cannot reference a missing
//! project.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryStore`]: thread-safe in-memory storage for tests and
//!   embedding
//! - [`postgres::PostgresProjectRepository`] and
//!   [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel, schema in `migrations/`
//!
//! [`ProjectRepository`]: crate::project::ports::ProjectRepository
//! [`TaskRepository`]: crate::task::ports::TaskRepository

pub mod memory;
pub mod postgres;
