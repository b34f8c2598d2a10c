//! SQL statement rendering for comment snapshots
//!
//! Each dialect has its own renderer; they only share the literal escaping in
//! [`escape`]. The output is an ordered list of lines: statements, `--` header
//! comments and empty separators, meant to be joined with `\n`.

pub mod escape;
pub mod mysql;
pub mod postgres;

use schemanote_core::{Comments, Dialect};

/// Render the statements that apply `comments` in the given dialect
pub fn render(comments: &Comments, dialect: Dialect) -> Vec<String> {
    match dialect {
        Dialect::PostgreSql => postgres::render(comments),
        Dialect::MySql => mysql::render(comments),
    }
}
