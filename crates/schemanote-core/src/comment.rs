//! Comment snapshot types
//!
//! A [`Comments`] value is the full desired comment state of a database at one
//! point in time. It is also the on-disk format of the snapshot file, so the
//! serialized shape is part of the public contract.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Comment attached to a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableComment {
    /// Database schema, if not the default one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Table name
    pub table_name: String,

    /// Comment text; empty means "no comment"
    pub comment: String,
}

impl TableComment {
    pub fn new(table_name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            schema: None,
            table_name: table_name.into(),
            comment: comment.into(),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Comment attached to a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnComment {
    /// Database schema, if not the default one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Table name
    pub table_name: String,

    /// Column name
    pub column_name: String,

    /// Comment text; empty means "no comment"
    pub comment: String,
}

impl ColumnComment {
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            schema: None,
            table_name: table_name.into(),
            column_name: column_name.into(),
            comment: comment.into(),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Comments for one table
///
/// Either side may be absent when its target is disabled. Absent is not the
/// same as an empty comment: an absent side is never diffed or rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableComments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableComment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnComment>>,
}

impl TableComments {
    /// Find a column comment by column name
    pub fn find_column(&self, column_name: &str) -> Option<&ColumnComment> {
        self.columns
            .as_ref()?
            .iter()
            .find(|c| c.column_name == column_name)
    }

    /// True when neither a table comment nor any column comment is present
    pub fn is_empty(&self) -> bool {
        self.table.is_none() && self.columns.as_ref().map_or(true, |c| c.is_empty())
    }
}

/// Comment snapshot keyed by qualified table name (`schema.table` or `table`)
///
/// Keys keep insertion order, which is the order statements are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comments(IndexMap<String, TableComments>);

impl Comments {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert or replace the entry for a table key
    pub fn insert(&mut self, key: impl Into<String>, table: TableComments) {
        self.0.insert(key.into(), table);
    }

    pub fn get(&self, key: &str) -> Option<&TableComments> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableComments)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<(String, TableComments)> for Comments {
    fn from_iter<I: IntoIterator<Item = (String, TableComments)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Comments {
    type Item = (&'a String, &'a TableComments);
    type IntoIter = indexmap::map::Iter<'a, String, TableComments>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
