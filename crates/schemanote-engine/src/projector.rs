//! Comment projection
//!
//! Shapes normalized models into a [`Comments`] snapshot, applying the
//! configured targets and ignore rules.

use schemanote_core::{
    ColumnComment, CommentFilter, Comments, Config, Field, Model, TableComment, TableComments,
    Target,
};

/// Options controlling what ends up in a snapshot
#[derive(Clone, Copy)]
pub struct ProjectionOptions<'a> {
    /// Enabled targets
    pub targets: &'a [Target],

    /// Tables whose name matches are left out entirely
    pub ignore_pattern: Option<&'a dyn CommentFilter>,

    /// Documentation that matches is replaced by an empty comment
    pub ignore_comment_pattern: Option<&'a dyn CommentFilter>,

    /// Append the enum summary to enum-typed column comments
    pub include_enum_in_field_comment: bool,
}

impl Default for ProjectionOptions<'_> {
    fn default() -> Self {
        Self {
            targets: &Target::ALL,
            ignore_pattern: None,
            ignore_comment_pattern: None,
            include_enum_in_field_comment: false,
        }
    }
}

impl<'a> ProjectionOptions<'a> {
    /// Options as configured
    pub fn from_config(config: &'a Config) -> Self {
        Self {
            targets: &config.targets,
            ignore_pattern: config
                .ignore_pattern
                .as_ref()
                .map(|re| re as &dyn CommentFilter),
            ignore_comment_pattern: config
                .ignore_comment_pattern
                .as_ref()
                .map(|re| re as &dyn CommentFilter),
            include_enum_in_field_comment: config.include_enum_in_field_comment,
        }
    }

    fn has_target(&self, target: Target) -> bool {
        self.targets.contains(&target)
    }

    fn is_ignored_table(&self, table_name: &str) -> bool {
        self.ignore_pattern.map_or(false, |f| f.is_match(table_name))
    }

    /// Documentation with the ignore rule applied
    fn documentation(&self, documentation: Option<&str>) -> String {
        match documentation {
            Some(doc) if !self.ignore_comment_pattern.map_or(false, |f| f.is_match(doc)) => {
                doc.to_string()
            }
            _ => String::new(),
        }
    }
}

/// Builds comment snapshots from models
pub struct CommentProjector;

impl CommentProjector {
    /// Project models into a snapshot keyed by qualified table name
    pub fn project(models: &[Model], options: &ProjectionOptions<'_>) -> Comments {
        let mut comments = Comments::new();

        for model in models {
            if options.is_ignored_table(&model.db_name) {
                tracing::debug!(table = %model.db_name, "table ignored by pattern");
                continue;
            }

            let table = options.has_target(Target::Table).then(|| TableComment {
                schema: model.schema.clone(),
                table_name: model.db_name.clone(),
                comment: options.documentation(model.documentation.as_deref()),
            });

            let columns = options.has_target(Target::Column).then(|| {
                model
                    .fields
                    .iter()
                    .map(|field| ColumnComment {
                        schema: model.schema.clone(),
                        table_name: model.db_name.clone(),
                        column_name: field.db_name.clone(),
                        comment: Self::field_comment(field, options),
                    })
                    .collect::<Vec<_>>()
            });

            comments.insert(model.qualified_name(), TableComments { table, columns });
        }

        comments
    }

    fn field_comment(field: &Field, options: &ProjectionOptions<'_>) -> String {
        let mut comment = options.documentation(field.documentation.as_deref());

        if options.include_enum_in_field_comment {
            if let Some(type_enum) = &field.type_enum {
                if !comment.is_empty() {
                    comment.push('\n');
                }
                comment.push_str(&type_enum.summary());
            }
        }

        comment
    }
}
