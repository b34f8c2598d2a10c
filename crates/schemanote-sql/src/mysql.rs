//! MySQL comment statements
//!
//! MySQL can only change a column comment by restating the whole column
//! definition. Column comments therefore go through a temporary stored
//! procedure that reads the current definition from `information_schema` and
//! reissues it with the new comment. MySQL has no schema qualification, so the
//! schema of an entry is ignored.

use crate::escape::string_literal;
use schemanote_core::Comments;

/// Name of the helper procedure used for column comments
pub const UPDATE_COLUMN_COMMENT_PROCEDURE: &str = "prisma_update_column_comment";

/// Creates the helper procedure; emitted before the first column statement
pub const CREATE_COLUMN_COMMENT_PROCEDURE: &str = r#"-- Stored procedure to update column comments
DROP PROCEDURE IF EXISTS prisma_update_column_comment;

CREATE PROCEDURE prisma_update_column_comment(
    IN p_table_name VARCHAR(255),
    IN p_column_name VARCHAR(255),
    IN p_comment_text TEXT
)
BEGIN
    DECLARE column_definition TEXT;

    -- Get current column definition from current database
    SELECT CONCAT(
        COLUMN_TYPE,
        CASE WHEN IS_NULLABLE = 'NO' THEN ' NOT NULL' ELSE ' NULL' END,
        CASE WHEN COLUMN_DEFAULT IS NOT NULL THEN CONCAT(' DEFAULT ', QUOTE(COLUMN_DEFAULT)) ELSE '' END,
        CASE WHEN EXTRA != '' THEN CONCAT(' ', EXTRA) ELSE '' END
    ) INTO column_definition
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE()
        AND TABLE_NAME = p_table_name
        AND COLUMN_NAME = p_column_name;

    -- Build and execute ALTER statement
    SET @sql = CONCAT(
        'ALTER TABLE `', p_table_name, '`',
        ' MODIFY COLUMN `', p_column_name, '` ',
        column_definition,
        CASE
            WHEN p_comment_text IS NULL THEN ''
            ELSE CONCAT(' COMMENT ', QUOTE(p_comment_text))
        END
    );

    PREPARE stmt FROM @sql;
    EXECUTE stmt;
    DEALLOCATE PREPARE stmt;
END;
"#;

/// Drops the helper procedure; emitted after the last statement
pub const DROP_COLUMN_COMMENT_PROCEDURE: &str = "-- Drop stored procedure to update column comments
DROP PROCEDURE IF EXISTS prisma_update_column_comment;
";

/// Render `ALTER TABLE` / procedure-call statements for every entry of the snapshot
pub fn render(comments: &Comments) -> Vec<String> {
    let mut statements = Vec::new();
    let mut has_column_comments = false;

    for (key, entry) in comments.iter() {
        statements.push(format!("-- {} comments", key));

        if let Some(table) = &entry.table {
            statements.push(format!(
                "ALTER TABLE `{}` COMMENT = {};",
                table.table_name,
                string_literal(&table.comment)
            ));
        }

        for column in entry.columns.iter().flatten() {
            statements.push(format!(
                "CALL {}({}, {}, {});",
                UPDATE_COLUMN_COMMENT_PROCEDURE,
                string_literal(&column.table_name),
                string_literal(&column.column_name),
                string_literal(&column.comment)
            ));
            has_column_comments = true;
        }

        statements.push(String::new());
    }

    if has_column_comments {
        statements.insert(0, CREATE_COLUMN_COMMENT_PROCEDURE.to_string());
        statements.push(DROP_COLUMN_COMMENT_PROCEDURE.to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemanote_core::{ColumnComment, TableComment, TableComments};

    fn single(key: &str, table: TableComments) -> Comments {
        let mut comments = Comments::new();
        comments.insert(key, table);
        comments
    }

    #[test]
    fn empty_comments() {
        assert!(render(&Comments::new()).is_empty());
    }

    #[test]
    fn table_comment_needs_no_procedure() {
        let comments = single(
            "users",
            TableComments {
                table: Some(TableComment::new("users", "ユーザーテーブル")),
                columns: Some(vec![]),
            },
        );

        assert_eq!(
            render(&comments),
            vec![
                "-- users comments",
                "ALTER TABLE `users` COMMENT = 'ユーザーテーブル';",
                "",
            ]
        );
    }

    #[test]
    fn column_comments_are_wrapped_in_procedure() {
        let comments = single(
            "users",
            TableComments {
                table: None,
                columns: Some(vec![
                    ColumnComment::new("users", "id", "ユーザーID"),
                    ColumnComment::new("users", "name", "ユーザー名"),
                ]),
            },
        );

        let statements = render(&comments);

        assert!(statements[0].contains("-- Stored procedure to update column comments"));
        assert!(statements[0].contains("DROP PROCEDURE IF EXISTS prisma_update_column_comment;"));
        assert!(statements[0].contains("CREATE PROCEDURE prisma_update_column_comment("));
        assert_eq!(
            statements[1..].to_vec(),
            vec![
                "-- users comments".to_string(),
                "CALL prisma_update_column_comment('users', 'id', 'ユーザーID');".to_string(),
                "CALL prisma_update_column_comment('users', 'name', 'ユーザー名');".to_string(),
                String::new(),
                DROP_COLUMN_COMMENT_PROCEDURE.to_string(),
            ]
        );
    }

    #[test]
    fn procedure_is_emitted_once_for_many_tables() {
        let mut comments = Comments::new();
        for table in ["users", "posts"] {
            comments.insert(
                table,
                TableComments {
                    table: None,
                    columns: Some(vec![ColumnComment::new(table, "id", "ID")]),
                },
            );
        }

        let statements = render(&comments);
        let creates = statements
            .iter()
            .filter(|s| s.as_str() == CREATE_COLUMN_COMMENT_PROCEDURE)
            .count();
        let drops = statements
            .iter()
            .filter(|s| s.as_str() == DROP_COLUMN_COMMENT_PROCEDURE)
            .count();

        assert_eq!(creates, 1);
        assert_eq!(drops, 1);
        assert_eq!(statements.first().unwrap(), CREATE_COLUMN_COMMENT_PROCEDURE);
        assert_eq!(statements.last().unwrap(), DROP_COLUMN_COMMENT_PROCEDURE);
    }

    #[test]
    fn special_characters() {
        let comments = single(
            "users",
            TableComments {
                table: Some(TableComment::new("users", "User's table")),
                columns: Some(vec![ColumnComment::new("users", "description", "Line1\nLine2\\\"")]),
            },
        );

        let statements = render(&comments);

        assert_eq!(
            statements[1..].to_vec(),
            vec![
                "-- users comments".to_string(),
                "ALTER TABLE `users` COMMENT = 'User''s table';".to_string(),
                r#"CALL prisma_update_column_comment('users', 'description', 'Line1\nLine2\\"');"#
                    .to_string(),
                String::new(),
                DROP_COLUMN_COMMENT_PROCEDURE.to_string(),
            ]
        );
    }

    #[test]
    fn empty_comments_render_null() {
        let comments = single(
            "users",
            TableComments {
                table: Some(TableComment::new("users", "")),
                columns: Some(vec![ColumnComment::new("users", "id", "")]),
            },
        );

        let statements = render(&comments);

        assert_eq!(statements[2], "ALTER TABLE `users` COMMENT = NULL;");
        assert_eq!(statements[3], "CALL prisma_update_column_comment('users', 'id', NULL);");
    }

    #[test]
    fn schema_is_not_qualified() {
        let comments = single(
            "shop.products",
            TableComments {
                table: Some(TableComment::new("products", "商品テーブル").with_schema("shop")),
                columns: Some(vec![
                    ColumnComment::new("products", "id", "商品ID").with_schema("shop"),
                ]),
            },
        );

        let statements = render(&comments);

        assert_eq!(
            statements[1..4].to_vec(),
            vec![
                "-- shop.products comments".to_string(),
                "ALTER TABLE `products` COMMENT = '商品テーブル';".to_string(),
                "CALL prisma_update_column_comment('products', 'id', '商品ID');".to_string(),
            ]
        );
    }

    #[test]
    fn header_and_separator_without_comments() {
        let comments = single(
            "t",
            TableComments {
                table: None,
                columns: None,
            },
        );

        assert_eq!(render(&comments), vec!["-- t comments", ""]);
    }
}
