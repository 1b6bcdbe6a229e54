//! Taskboard: project and task management core.
//!
//! Projects own tasks. Both are created, edited, and deleted through
//! lifecycle services that enforce field validation, case-insensitive project
//! name uniqueness, and configurable capacity limits. A batch closer marks
//! tasks whose deadline has passed as done.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Validated entities with no infrastructure dependencies
//! - **Ports**: Repository traits describing the storage gateway
//! - **Storage**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`project`]: Project entity, repository port, and lifecycle service
//! - [`task`]: Task entity, repository port, lifecycle service, and overdue closer
//! - [`storage`]: Repository implementations
//! - [`config`]: Capacity limits
//! - [`app`]: Service wiring

pub mod app;
pub mod config;
pub mod project;
pub mod storage;
pub mod task;
