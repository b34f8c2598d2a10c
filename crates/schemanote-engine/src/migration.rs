//! Migration file output
//!
//! Each generation pass that has something to apply produces a new migration
//! directory named after the UTC time of the pass.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Suffix of generated migration directory names
pub const MIGRATION_SUFFIX: &str = "update_comments";

/// File name of the SQL script inside a migration directory
pub const MIGRATION_FILE_NAME: &str = "migration.sql";

/// A migration written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenMigration {
    /// Directory name, e.g. `20240101093000_update_comments`
    pub name: String,

    /// Path of the written `migration.sql`
    pub path: PathBuf,
}

/// Writes migration directories under a `migrations` folder
#[derive(Debug, Clone)]
pub struct MigrationWriter {
    migrations_dir: PathBuf,
}

impl MigrationWriter {
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
        }
    }

    /// Writer for `<schema dir>/migrations`
    pub fn for_schema(schema_path: &Path) -> Self {
        let base = schema_path.parent().unwrap_or_else(|| Path::new("."));
        Self::new(base.join("migrations"))
    }

    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// Directory name for a pass started at `timestamp`
    pub fn migration_name(timestamp: DateTime<Utc>) -> String {
        format!("{}_{}", timestamp.format("%Y%m%d%H%M%S"), MIGRATION_SUFFIX)
    }

    /// Full script text: version header followed by the statements
    pub fn render_sql(statements: &[String]) -> String {
        format!(
            "-- SchemaNote Database Comments Generator v{}\n\n{}",
            env!("CARGO_PKG_VERSION"),
            statements.join("\n")
        )
    }

    /// Write the statements as a new migration
    pub fn write(
        &self,
        statements: &[String],
        timestamp: DateTime<Utc>,
    ) -> Result<WrittenMigration, MigrationError> {
        let name = Self::migration_name(timestamp);
        let dir = self.migrations_dir.join(&name);

        std::fs::create_dir_all(&dir)
            .map_err(|e| MigrationError::IoError(dir.display().to_string(), e.to_string()))?;

        let path = dir.join(MIGRATION_FILE_NAME);
        std::fs::write(&path, Self::render_sql(statements))
            .map_err(|e| MigrationError::IoError(path.display().to_string(), e.to_string()))?;

        tracing::info!(migration = %name, "migration written");
        Ok(WrittenMigration { name, path })
    }
}

/// Migration error types
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Failed to write migration {0}: {1}")]
    IoError(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap()
    }

    #[test]
    fn name_from_timestamp() {
        assert_eq!(
            MigrationWriter::migration_name(timestamp()),
            "20240305070809_update_comments"
        );
    }

    #[test]
    fn migrations_live_next_to_schema() {
        let writer = MigrationWriter::for_schema(Path::new("prisma/datamodel.json"));
        assert_eq!(writer.migrations_dir(), Path::new("prisma/migrations"));
    }

    #[test]
    fn writes_header_and_statements() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MigrationWriter::new(dir.path());
        let statements = vec![
            "-- users comments".to_string(),
            r#"COMMENT ON TABLE "users" IS 'User';"#.to_string(),
            String::new(),
        ];

        let written = writer.write(&statements, timestamp()).unwrap();

        assert_eq!(written.name, "20240305070809_update_comments");
        assert_eq!(
            written.path,
            dir.path().join("20240305070809_update_comments").join("migration.sql")
        );

        let sql = std::fs::read_to_string(&written.path).unwrap();
        assert!(sql.starts_with("-- SchemaNote Database Comments Generator v"));
        assert!(sql.ends_with("\n\n-- users comments\nCOMMENT ON TABLE \"users\" IS 'User';\n"));
    }
}
