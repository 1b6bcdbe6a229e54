//! `PostgreSQL` repository implementation for project storage.

use super::{
    PgPool, escape_like,
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
};
use crate::project::{
    domain::{
        NewProject, PersistedProjectData, Project, ProjectChanges, ProjectDescription, ProjectId,
        ProjectName,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let new_row = NewProjectRow {
            name: project.name().as_str().to_owned(),
            description: project.description().as_str().to_owned(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(projects::table)
                .values(&new_row)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .map_err(|err| map_write_error(err, &new_row.name))?;
            row_to_project(row)
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.value())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_name(&self, name: &str) -> ProjectRepositoryResult<Option<Project>> {
        let pattern = escape_like(name);
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::name.ilike(&pattern))
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn count(&self) -> ProjectRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total = projects::table
                .count()
                .get_result::<i64>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            u64::try_from(total).map_err(ProjectRepositoryError::persistence)
        })
        .await
    }

    async fn update(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
    ) -> ProjectRepositoryResult<Project> {
        if changes.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or(ProjectRepositoryError::NotFound(id));
        }

        let changeset = ProjectChangeset {
            name: changes.name.as_ref().map(|name| name.as_str().to_owned()),
            description: changes
                .description
                .as_ref()
                .map(|description| description.as_str().to_owned()),
        };

        self.run_blocking(move |connection| {
            let requested_name = changeset.name.clone().unwrap_or_default();
            let row = diesel::update(projects::table.find(id.value()))
                .set(&changeset)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .optional()
                .map_err(|err| map_write_error(err, &requested_name))?
                .ok_or(ProjectRepositoryError::NotFound(id))?;
            row_to_project(row)
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(projects::table.find(id.value()))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn map_write_error(err: DieselError, name: &str) -> ProjectRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ProjectRepositoryError::DuplicateName(name.to_owned())
        }
        other => ProjectRepositoryError::persistence(other),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
    } = row;

    let data = PersistedProjectData {
        id: ProjectId::new(id),
        name: ProjectName::new(name).map_err(ProjectRepositoryError::invalid_persisted_data)?,
        description: ProjectDescription::new(description)
            .map_err(ProjectRepositoryError::invalid_persisted_data)?,
    };
    Ok(Project::from_persisted(data))
}
