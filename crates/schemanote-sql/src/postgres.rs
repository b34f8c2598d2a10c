//! PostgreSQL comment statements

use crate::escape::escape_string;
use schemanote_core::Comments;

/// Render `COMMENT ON` statements for every entry of the snapshot
pub fn render(comments: &Comments) -> Vec<String> {
    let mut statements = Vec::new();

    for (key, entry) in comments.iter() {
        statements.push(format!("-- {} comments", key));

        if let Some(table) = &entry.table {
            statements.push(format!(
                "COMMENT ON TABLE {} IS {};",
                qualified_name(table.schema.as_deref(), &table.table_name, None),
                string_literal(&table.comment)
            ));
        }

        for column in entry.columns.iter().flatten() {
            statements.push(format!(
                "COMMENT ON COLUMN {} IS {};",
                qualified_name(
                    column.schema.as_deref(),
                    &column.table_name,
                    Some(&column.column_name)
                ),
                string_literal(&column.comment)
            ));
        }

        statements.push(String::new());
    }

    statements
}

/// Literal for a comment; escape-string syntax (`E'...'`) when it holds backslashes
fn string_literal(text: &str) -> String {
    if text.is_empty() {
        return "NULL".to_string();
    }

    let literal = format!("'{}'", escape_string(text));
    if literal.contains('\\') {
        format!("E{}", literal)
    } else {
        literal
    }
}

fn qualified_name(schema: Option<&str>, table: &str, column: Option<&str>) -> String {
    schema
        .filter(|s| !s.is_empty())
        .into_iter()
        .chain(std::iter::once(table))
        .chain(column)
        .map(|part| format!("\"{}\"", part))
        .collect::<Vec<_>>()
        .join(".")
}
