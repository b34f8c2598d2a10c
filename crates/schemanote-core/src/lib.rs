//! SchemaNote Core
//!
//! Shared domain model: the normalized schema, the comment snapshot format and
//! the generator configuration. The snapshot types are persisted to disk, so
//! their serialized shape must stay stable.

pub mod model;
pub mod comment;
pub mod config;
pub mod filter;

pub use model::{Model, Field, TypeEnum};
pub use comment::{Comments, TableComments, TableComment, ColumnComment};
pub use config::{Config, ConfigError, Dialect, Target};
pub use filter::CommentFilter;
