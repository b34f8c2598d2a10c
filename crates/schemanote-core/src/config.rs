//! Configuration schema (schemanote.toml)
//!
//! Parsing is permissive: a value of the wrong shape falls back to its default
//! instead of failing. Only a file that is not valid TOML is an error.

use regex::Regex;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// SQL dialect the statements are rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// PostgreSQL (`COMMENT ON ...`)
    PostgreSql,

    /// MySQL (`ALTER TABLE ... COMMENT` plus a helper procedure for columns)
    MySql,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::PostgreSql
    }
}

impl Dialect {
    /// Map a provider name to a dialect; anything but `mysql` is PostgreSQL
    pub fn from_provider(provider: &str) -> Self {
        if provider == "mysql" {
            Self::MySql
        } else {
            Self::PostgreSql
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What receives comments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Table,
    Column,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Table, Target::Column];

    fn parse(name: &str) -> Option<Self> {
        match name {
            "table" => Some(Self::Table),
            "column" => Some(Self::Column),
            _ => None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Enabled comment targets
    pub targets: Vec<Target>,

    /// Tables whose name matches are skipped entirely
    pub ignore_pattern: Option<Regex>,

    /// Documentation that matches is treated as empty
    pub ignore_comment_pattern: Option<Regex>,

    /// Append an `enum: name(values...)` line to enum-typed column comments
    pub include_enum_in_field_comment: bool,

    /// SQL dialect
    pub provider: Dialect,

    /// Directory holding the snapshot file
    pub output_dir: PathBuf,

    /// Environment variable that overrides `output_dir` when set
    pub output_dir_env: Option<String>,

    /// Project root path (for resolving relative paths)
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: Target::ALL.to_vec(),
            ignore_pattern: None,
            ignore_comment_pattern: None,
            include_enum_in_field_comment: false,
            provider: Dialect::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_dir_env: None,
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

const DEFAULT_OUTPUT_DIR: &str = "migrations";

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        // Set project root to parent of config file
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let table: Table = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(Self::from_table(&table))
    }

    /// Build a config from already-parsed values, falling back per key
    pub fn from_table(table: &Table) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(table, &["targets"]) {
            config.targets = parse_targets(value);
        }

        config.ignore_pattern = lookup(table, &["ignore_pattern", "ignorePattern"])
            .and_then(|v| parse_pattern("ignore_pattern", v));

        config.ignore_comment_pattern =
            lookup(table, &["ignore_comment_pattern", "ignoreCommentPattern"])
                .and_then(|v| parse_pattern("ignore_comment_pattern", v));

        config.include_enum_in_field_comment = lookup(
            table,
            &["include_enum_in_field_comment", "includeEnumInFieldComment"],
        )
        .map_or(false, |v| match v {
            Value::Boolean(b) => *b,
            Value::String(s) => s == "true",
            _ => false,
        });

        if let Some(Value::String(provider)) = lookup(table, &["provider"]) {
            config.provider = Dialect::from_provider(provider);
        }

        if let Some(Value::String(dir)) = lookup(table, &["output_dir", "outputDir"]) {
            if !dir.is_empty() {
                config.output_dir = PathBuf::from(dir);
            }
        }

        if let Some(Value::String(var)) = lookup(table, &["output_dir_env", "outputDirEnv"]) {
            config.output_dir_env = Some(var.clone());
        }

        config
    }

    /// Whether a target is enabled
    pub fn has_target(&self, target: Target) -> bool {
        self.targets.contains(&target)
    }

    /// Directory the snapshot file lives in
    ///
    /// `output_dir_env` wins when the variable is set; relative paths are
    /// resolved against the project root.
    pub fn resolved_output_dir(&self) -> PathBuf {
        let dir = self
            .output_dir_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.output_dir.clone());

        if dir.is_relative() {
            self.project_root.join(dir)
        } else {
            dir
        }
    }
}

fn lookup<'a>(table: &'a Table, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| table.get(*key))
}

fn parse_targets(value: &Value) -> Vec<Target> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().and_then(Target::parse))
            .collect(),
        _ => {
            tracing::warn!("`targets` is not an array, using all targets");
            Target::ALL.to_vec()
        }
    }
}

fn parse_pattern(key: &str, value: &Value) -> Option<Regex> {
    let source = value.as_str().filter(|s| !s.is_empty())?;

    match Regex::new(source) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(key, pattern = source, error = %e, "ignoring invalid pattern");
            None
        }
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    IoError(String, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
