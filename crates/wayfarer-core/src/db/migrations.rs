//! Schema initialization and version tracking.

use crate::error::{Result, StoreResultExt, TravelError};

/// Version stamped into `PRAGMA user_version` by this build.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Creates the schema from the embedded SQL file and stamps its version.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .store_context("Failed to initialize session store schema")?;

        self.apply_migrations()
    }

    fn apply_migrations(&self) -> Result<()> {
        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .store_context("Failed to read session store version")?;

        if version > SCHEMA_VERSION {
            return Err(TravelError::Configuration {
                message: format!(
                    "Session store was written by a newer version (schema {version}, supported {SCHEMA_VERSION})"
                ),
            });
        }

        if version < SCHEMA_VERSION {
            self.connection
                .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
                .store_context("Failed to stamp session store version")?;
        }

        Ok(())
    }
}
