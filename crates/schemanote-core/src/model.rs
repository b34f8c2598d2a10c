//! Normalized schema model
//!
//! Dialect-independent view of the tables, columns and enums a schema declares.
//! Everything downstream (projection, diffing, rendering) works on these types.

use std::sync::Arc;

/// An enum type declared by the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEnum {
    /// Name of the enum in the database
    pub db_name: String,

    /// Logical name used by fields to reference the enum
    pub name: String,

    /// Stored value names, in declaration order
    pub values: Vec<String>,

    /// Documentation attached to the enum
    pub documentation: Option<String>,
}

impl TypeEnum {
    /// Create an enum whose database name equals its logical name
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        let name = name.into();
        Self {
            db_name: name.clone(),
            name,
            values,
            documentation: None,
        }
    }

    /// Set the database name
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Set documentation
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// One-line summary, e.g. `enum: user_role(admin, user)`
    pub fn summary(&self) -> String {
        format!("enum: {}({})", self.db_name, self.values.join(", "))
    }
}

/// A column-like member of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name in the database
    pub db_name: String,

    /// Documentation attached to the field
    pub documentation: Option<String>,

    /// Enum the column is typed with, shared with every other field using it
    pub type_enum: Option<Arc<TypeEnum>>,
}

impl Field {
    /// Create an undocumented field
    pub fn new(db_name: impl Into<String>) -> Self {
        Self {
            db_name: db_name.into(),
            documentation: None,
            type_enum: None,
        }
    }

    /// Set documentation
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Attach an enum type
    pub fn with_type_enum(mut self, type_enum: Arc<TypeEnum>) -> Self {
        self.type_enum = Some(type_enum);
        self
    }
}

/// A table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Database schema; `None` means the default schema
    pub schema: Option<String>,

    /// Table name in the database
    pub db_name: String,

    /// Documentation attached to the model
    pub documentation: Option<String>,

    /// Columns, in declaration order
    pub fields: Vec<Field>,
}

impl Model {
    /// Create an undocumented model in the default schema
    pub fn new(db_name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            schema: None,
            db_name: db_name.into(),
            documentation: None,
            fields,
        }
    }

    /// Set the database schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set documentation
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Key used for this table in a comment snapshot (`schema.table` or `table`)
    ///
    /// An empty schema counts as no schema.
    pub fn qualified_name(&self) -> String {
        match self.schema.as_deref().filter(|s| !s.is_empty()) {
            Some(schema) => format!("{}.{}", schema, self.db_name),
            None => self.db_name.clone(),
        }
    }
}
