//! `PostgreSQL` adapters for project and task persistence.
//!
//! All Diesel calls are synchronous and run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`]. Referential integrity lives in the
//! schema: tasks reference projects with `ON DELETE CASCADE`, and project
//! names carry a unique index on `LOWER(name)`.

mod models;
mod project;
mod schema;
mod task;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

pub use project::PostgresProjectRepository;
pub use task::PostgresTaskRepository;

/// `PostgreSQL` connection pool shared by both repositories.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Escapes `LIKE` metacharacters so the pattern matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
