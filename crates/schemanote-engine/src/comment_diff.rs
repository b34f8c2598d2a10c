//! Snapshot diff engine
//!
//! Computes which parts of the current snapshot differ from the last recorded
//! one. A comment that is missing on the recorded side counts as `""`, so a
//! comment that has always been empty never shows up, while the first
//! appearance of a non-empty one does. Entries that exist only in the recorded
//! snapshot are not reported, and renamed columns are not detected.

use schemanote_core::{ColumnComment, Comments, TableComment, TableComments};

/// Compares two comment snapshots
pub struct CommentDiff;

impl CommentDiff {
    /// Entries of `first` that are not represented identically in `second`
    pub fn compare(first: &Comments, second: &Comments) -> Comments {
        first
            .iter()
            .filter_map(|(key, table)| {
                Self::diff_table(table, second.get(key)).map(|diff| (key.to_string(), diff))
            })
            .collect()
    }

    fn diff_table(first: &TableComments, second: Option<&TableComments>) -> Option<TableComments> {
        let table = first.table.as_ref().and_then(|table| {
            let previous = second.and_then(|s| s.table.as_ref());
            Self::diff_table_comment(table, previous)
        });

        let columns = first.columns.as_ref().map(|columns| {
            columns
                .iter()
                .filter_map(|column| {
                    let previous = second.and_then(|s| s.find_column(&column.column_name));
                    Self::diff_column_comment(column, previous)
                })
                .collect::<Vec<_>>()
        });

        let has_column_changes = columns.as_ref().map_or(false, |c| !c.is_empty());
        if table.is_none() && !has_column_changes {
            return None;
        }

        Some(TableComments { table, columns })
    }

    fn diff_table_comment(
        first: &TableComment,
        second: Option<&TableComment>,
    ) -> Option<TableComment> {
        different(&first.comment, second.map(|s| s.comment.as_str())).then(|| first.clone())
    }

    fn diff_column_comment(
        first: &ColumnComment,
        second: Option<&ColumnComment>,
    ) -> Option<ColumnComment> {
        different(&first.comment, second.map(|s| s.comment.as_str())).then(|| first.clone())
    }
}

/// Whether a comment changed; a missing previous comment is `""`
fn different(current: &str, previous: Option<&str>) -> bool {
    current != previous.unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Comments {
        let mut comments = Comments::new();
        comments.insert(
            "table1",
            TableComments {
                table: Some(TableComment::new("table1", "table1 comment")),
                columns: Some(vec![
                    ColumnComment::new("table1", "field1", "field1 comment"),
                    ColumnComment::new("table1", "field2", ""),
                    ColumnComment::new("table1", "field3", "field3 comment"),
                    ColumnComment::new("table1", "field4", ""),
                ]),
            },
        );
        comments.insert(
            "table2",
            TableComments {
                table: Some(TableComment::new("table2", "")),
                columns: Some(vec![ColumnComment::new("table2", "fieldA", "fieldA comment")]),
            },
        );
        comments
    }

    #[test]
    fn empty_snapshots() {
        assert!(CommentDiff::compare(&Comments::new(), &Comments::new()).is_empty());
    }

    #[test]
    fn identical_snapshots() {
        let comments = snapshot();
        assert_eq!(CommentDiff::compare(&comments, &comments), Comments::new());
    }

    #[test]
    fn empty_first() {
        assert!(CommentDiff::compare(&Comments::new(), &snapshot()).is_empty());
    }

    #[test]
    fn empty_second_keeps_only_non_empty_comments() {
        let diff = CommentDiff::compare(&snapshot(), &Comments::new());

        let table1 = diff.get("table1").unwrap();
        assert_eq!(table1.table, Some(TableComment::new("table1", "table1 comment")));
        assert_eq!(
            table1.columns,
            Some(vec![
                ColumnComment::new("table1", "field1", "field1 comment"),
                ColumnComment::new("table1", "field3", "field3 comment"),
            ])
        );

        let table2 = diff.get("table2").unwrap();
        assert_eq!(table2.table, None);
        assert_eq!(
            table2.columns,
            Some(vec![ColumnComment::new("table2", "fieldA", "fieldA comment")])
        );
    }

    #[test]
    fn changed_comments() {
        let mut first = Comments::new();
        first.insert(
            "table1",
            TableComments {
                table: Some(TableComment::new("table1", "table1 comment")),
                columns: Some(vec![
                    ColumnComment::new("table1", "field1", "field1 comment xxx"),
                    ColumnComment::new("table1", "field2", "xxx"),
                    ColumnComment::new("table1", "field3", ""),
                    ColumnComment::new("table1", "field4", ""),
                ]),
            },
        );
        first.insert(
            "table2",
            TableComments {
                table: Some(TableComment::new("table2", "xxx")),
                columns: Some(vec![ColumnComment::new("table2", "fieldA", "fieldA comment")]),
            },
        );

        let diff = CommentDiff::compare(&first, &snapshot());

        let table1 = diff.get("table1").unwrap();
        assert_eq!(table1.table, None);
        assert_eq!(
            table1.columns,
            Some(vec![
                ColumnComment::new("table1", "field1", "field1 comment xxx"),
                ColumnComment::new("table1", "field2", "xxx"),
                ColumnComment::new("table1", "field3", ""),
            ])
        );

        let table2 = diff.get("table2").unwrap();
        assert_eq!(table2.table, Some(TableComment::new("table2", "xxx")));
        assert_eq!(table2.columns, Some(vec![]));
    }

    #[test]
    fn absent_table_side_is_never_fabricated() {
        let mut first = Comments::new();
        first.insert(
            "users",
            TableComments {
                table: None,
                columns: Some(vec![ColumnComment::new("users", "id", "ID")]),
            },
        );

        let mut second = Comments::new();
        second.insert(
            "users",
            TableComments {
                table: Some(TableComment::new("users", "old")),
                columns: None,
            },
        );

        let diff = CommentDiff::compare(&first, &second);
        let users = diff.get("users").unwrap();

        assert!(users.table.is_none());
        assert_eq!(users.columns, Some(vec![ColumnComment::new("users", "id", "ID")]));
    }

    #[test]
    fn columns_only_in_second_are_ignored() {
        let mut first = Comments::new();
        first.insert(
            "users",
            TableComments {
                table: None,
                columns: Some(vec![ColumnComment::new("users", "full_name", "")]),
            },
        );

        let mut second = Comments::new();
        second.insert(
            "users",
            TableComments {
                table: None,
                columns: Some(vec![ColumnComment::new("users", "name", "User name")]),
            },
        );

        assert!(CommentDiff::compare(&first, &second).is_empty());
    }

    #[test]
    fn diff_preserves_key_order() {
        let mut first = snapshot();
        first.insert(
            "shop.products",
            TableComments {
                table: Some(TableComment::new("products", "p").with_schema("shop")),
                columns: None,
            },
        );

        let diff = CommentDiff::compare(&first, &Comments::new());
        assert_eq!(
            diff.keys().collect::<Vec<_>>(),
            vec!["table1", "table2", "shop.products"]
        );
    }
}
