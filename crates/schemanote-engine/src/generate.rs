//! One generation pass
//!
//! models → current snapshot → diff against the recorded snapshot → statements.
//! Planning is pure; [`Generator`] adds the snapshot and migration I/O.

use crate::comment_diff::CommentDiff;
use crate::migration::{MigrationError, MigrationWriter, WrittenMigration};
use crate::projector::{CommentProjector, ProjectionOptions};
use crate::snapshot::{SnapshotError, SnapshotStore};
use chrono::{DateTime, Utc};
use schemanote_core::{Comments, Config, Dialect, Model};

/// Result of planning a pass
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    /// Full snapshot of the current schema
    pub current: Comments,

    /// Part of `current` that differs from the recorded snapshot
    pub diff: Comments,

    /// Statements applying `diff`
    pub statements: Vec<String>,
}

impl GenerationPlan {
    /// Compute the plan for `models` relative to the `previous` snapshot
    pub fn new(models: &[Model], config: &Config, previous: &Comments) -> Self {
        let options = ProjectionOptions::from_config(config);
        let current = CommentProjector::project(models, &options);
        let diff = CommentDiff::compare(&current, previous);
        let statements = schemanote_sql::render(&diff, config.provider);

        tracing::debug!(
            tables = current.len(),
            changed = diff.len(),
            statements = statements.len(),
            dialect = %config.provider,
            "planned comment migration"
        );

        Self {
            current,
            diff,
            statements,
        }
    }

    /// Whether anything needs to be applied
    pub fn has_changes(&self) -> bool {
        !self.statements.is_empty()
    }
}

/// What a pass did
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// Nothing changed; no files were touched
    NoChanges,

    /// A migration was written and the snapshot updated
    Written(WrittenMigration),
}

/// Runs generation passes against one snapshot store and migrations folder
#[derive(Debug, Clone)]
pub struct Generator {
    snapshot: SnapshotStore,
    migrations: MigrationWriter,
}

impl Generator {
    pub fn new(snapshot: SnapshotStore, migrations: MigrationWriter) -> Self {
        Self {
            snapshot,
            migrations,
        }
    }

    pub fn snapshot(&self) -> &SnapshotStore {
        &self.snapshot
    }

    /// Plan a pass against the recorded snapshot without writing anything
    pub fn plan(&self, models: &[Model], config: &Config) -> Result<GenerationPlan, GenerateError> {
        let previous = self.snapshot.load()?;
        Ok(GenerationPlan::new(models, config, &previous))
    }

    /// Plan a pass and, if anything changed, write the migration and snapshot
    pub fn run(
        &self,
        models: &[Model],
        config: &Config,
        timestamp: DateTime<Utc>,
    ) -> Result<GenerationOutcome, GenerateError> {
        let plan = self.plan(models, config)?;

        if !plan.has_changes() {
            tracing::info!("no comment changes detected");
            return Ok(GenerationOutcome::NoChanges);
        }

        let written = self.migrations.write(&plan.statements, timestamp)?;

        // Record the full current state, not just the diff
        self.snapshot.save(&plan.current)?;

        Ok(GenerationOutcome::Written(written))
    }
}

/// Render statements for a snapshot without diffing
pub fn render_all(comments: &Comments, dialect: Dialect) -> Vec<String> {
    schemanote_sql::render(comments, dialect)
}

/// Generation error types
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Migration(#[from] MigrationError),
}
