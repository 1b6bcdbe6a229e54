//! Shared test helpers for `PostgreSQL` integration tests.
//!
//! Tests run against the embedded cluster provided by
//! `pg-embed-setup-unpriv`. The schema is applied once to a template
//! database; every test then gets its own database cloned from that
//! template, dropped again when the [`TestDatabase`] goes out of scope.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use eyre::WrapErr;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::fixture;
use std::future::Future;
use std::sync::Arc;
use taskboard::app::Taskboard;
use taskboard::config::TaskboardConfig;
use taskboard::storage::postgres::{PgPool, PostgresProjectRepository, PostgresTaskRepository};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// SQL creating the project and task tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_projects_and_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Taskboard wired to `PostgreSQL` repositories.
pub type PostgresBoard = Taskboard<PostgresProjectRepository, PostgresTaskRepository, DefaultClock>;

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("{e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("prepare template database: {e}"))
}

/// Drops the per-test database once every pooled connection is gone.
struct DatabaseCleanup {
    cluster: &'static TestCluster,
    name: String,
}

impl Drop for DatabaseCleanup {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(self.name.as_str()));
    }
}

/// Per-test database plus the runtime the async repositories run on.
///
/// Field order matters: the pool and runtime are dropped before the
/// cleanup guard issues `DROP DATABASE`.
pub struct TestDatabase {
    pool: PgPool,
    runtime: Runtime,
    cleanup: DatabaseCleanup,
}

impl TestDatabase {
    /// Clones the template into a fresh database and connects to it.
    ///
    /// # Errors
    ///
    /// Returns an error when the template, database, pool or runtime cannot
    /// be created.
    pub fn create(cluster: &'static TestCluster) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let name = format!("taskboard_test_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("create test database {name}: {e}"))?;
        let cleanup = DatabaseCleanup { cluster, name };

        let url = cluster.connection().database_url(&cleanup.name);
        let pool = Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(url))
            .wrap_err("build test pool")?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("build test runtime")?;

        Ok(Self {
            pool,
            runtime,
            cleanup,
        })
    }

    /// Returns a clone of the pool bound to this database.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Builds services over this database.
    #[must_use]
    pub fn board(&self, config: &TaskboardConfig) -> PostgresBoard {
        Taskboard::new(
            config,
            Arc::new(PostgresProjectRepository::new(self.pool())),
            Arc::new(PostgresTaskRepository::new(self.pool())),
            Arc::new(DefaultClock),
        )
    }

    /// Drives a test body on this database's runtime.
    ///
    /// # Errors
    ///
    /// Returns whatever the test body returns.
    pub fn block_on<F>(&self, body: F) -> eyre::Result<()>
    where
        F: Future<Output = eyre::Result<()>>,
    {
        self.runtime.block_on(body)
    }

    /// Runs raw SQL against this database.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be checked out or the SQL
    /// fails.
    pub fn execute(&self, sql: &str) -> eyre::Result<()> {
        let mut conn = self.pool.get().wrap_err("check out connection")?;
        conn.batch_execute(sql).wrap_err("execute test SQL")?;
        Ok(())
    }
}

/// Provides a freshly migrated database on the shared embedded cluster.
///
/// # Errors
///
/// Returns an error when the database cannot be prepared.
#[fixture]
pub fn test_database(shared_test_cluster: &'static TestCluster) -> eyre::Result<TestDatabase> {
    TestDatabase::create(shared_test_cluster)
}
