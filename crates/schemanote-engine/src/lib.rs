//! SchemaNote engine - Core business logic
//!
//! This crate implements the generation pipeline:
//! - Comment projection from normalized models
//! - Snapshot diffing
//! - Snapshot persistence
//! - Migration output

pub mod projector;
pub mod comment_diff;
pub mod snapshot;
pub mod migration;
pub mod generate;

pub use projector::{CommentProjector, ProjectionOptions};
pub use comment_diff::CommentDiff;
pub use snapshot::{SnapshotStore, SnapshotError, SNAPSHOT_FILE_NAME};
pub use migration::{MigrationWriter, MigrationError, WrittenMigration};
pub use generate::{GenerationPlan, GenerationOutcome, Generator, GenerateError, render_all};
