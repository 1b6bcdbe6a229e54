//! `PostgreSQL` repository implementation for task storage.

use super::{
    PgPool,
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{
        Deadline, NewTask, PersistedTaskData, Task, TaskChanges, TaskDescription, TaskId,
        TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let project_id = task.project_id();
        let new_row = NewTaskRow {
            project_id: project_id.value(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            status: TaskStatus::Todo.as_str().to_owned(),
            deadline: task.deadline().map(Deadline::instant),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::ProjectMissing(project_id)
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total = tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn update(&self, id: TaskId, changes: &TaskChanges) -> TaskRepositoryResult<Task> {
        if changes.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or(TaskRepositoryError::NotFound(id));
        }

        let changeset = TaskChangeset {
            title: changes.title.as_ref().map(|title| title.as_str().to_owned()),
            description: changes
                .description
                .as_ref()
                .map(|description| description.as_str().to_owned()),
            status: changes.status.map(|status| status.as_str().to_owned()),
            deadline: changes
                .deadline
                .map(|deadline| deadline.map(Deadline::instant)),
        };

        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.value()))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn close_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<u64> {
        let done = TaskStatus::Done.as_str();
        self.run_blocking(move |connection| {
            let closed = diesel::update(
                tasks::table
                    .filter(tasks::status.ne(done))
                    .filter(tasks::deadline.lt(now))
                    .filter(tasks::closed_at.is_null()),
            )
            .set((tasks::status.eq(done), tasks::closed_at.eq(now)))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(closed).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title,
        description,
        status,
        deadline,
        created_at,
        closed_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        project_id: ProjectId::new(project_id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::invalid_persisted_data)?,
        description: TaskDescription::new(description)
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        status: TaskStatus::try_from(status.as_str())
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        deadline: deadline.map(Deadline::from),
        created_at,
        closed_at,
    };
    Ok(Task::from_persisted(data))
}
