//! Diesel schema for project and task persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Store-assigned project identifier.
        id -> Int8,
        /// Project name, unique on `LOWER(name)`.
        #[max_length = 100]
        name -> Varchar,
        /// Project description.
        #[max_length = 255]
        description -> Varchar,
    }
}

diesel::table! {
    /// Task records, removed with their project via `ON DELETE CASCADE`.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Task description.
        #[max_length = 500]
        description -> Varchar,
        /// Task status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Auto-close timestamp.
        closed_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks);
