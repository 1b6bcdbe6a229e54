//! Step definitions for overdue task closing scenarios.

mod given;
mod then;
pub mod world;
