//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result, RoadmapError};

/// Columns added after the first schema, with the DDL that adds them.
const ADDED_COLUMNS: &[(&str, &str, &str)] = &[
    (
        "roadmaps",
        "revision",
        "ALTER TABLE roadmaps ADD COLUMN revision INTEGER NOT NULL DEFAULT 0",
    ),
    (
        "interactions",
        "duration_seconds",
        "ALTER TABLE interactions ADD COLUMN duration_seconds INTEGER",
    ),
    (
        "interactions",
        "reward",
        "ALTER TABLE interactions ADD COLUMN reward REAL NOT NULL DEFAULT 0",
    ),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Adds columns that databases created by older versions lack.
    fn apply_migrations(&self) -> Result<()> {
        for (table, column, ddl) in ADDED_COLUMNS {
            if self.has_column(table, column)? {
                continue;
            }
            self.connection.execute(ddl, []).map_err(|e| {
                RoadmapError::database_error(
                    &format!("Failed to add {column} column to {table} table"),
                    e,
                )
            })?;
        }

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .db_context("Failed to inspect table columns")
    }
}
