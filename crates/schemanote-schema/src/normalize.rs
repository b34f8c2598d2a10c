//! Datamodel normalization
//!
//! Turns a [`Datamodel`] into the dialect-independent [`Model`] list the rest
//! of the pipeline consumes.

use crate::datamodel::{Datamodel, DatamodelEnum, DatamodelField, DatamodelModel, FieldKind};
use schemanote_core::{Field, Model, TypeEnum};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds normalized models from a datamodel
pub struct ModelNormalizer;

impl ModelNormalizer {
    /// Normalize every model of the datamodel, in declaration order
    pub fn normalize(datamodel: &Datamodel) -> Vec<Model> {
        let enums: HashMap<&str, Arc<TypeEnum>> = datamodel
            .enums
            .iter()
            .map(|e| (e.name.as_str(), Arc::new(Self::normalize_enum(e))))
            .collect();

        datamodel
            .models
            .iter()
            .map(|m| Self::normalize_model(m, &enums))
            .collect()
    }

    fn normalize_enum(datamodel_enum: &DatamodelEnum) -> TypeEnum {
        TypeEnum {
            db_name: datamodel_enum
                .db_name
                .clone()
                .unwrap_or_else(|| datamodel_enum.name.clone()),
            name: datamodel_enum.name.clone(),
            values: datamodel_enum
                .values
                .iter()
                .map(|v| v.db_name.clone().unwrap_or_else(|| v.name.clone()))
                .collect(),
            documentation: datamodel_enum.documentation.clone(),
        }
    }

    fn normalize_model(model: &DatamodelModel, enums: &HashMap<&str, Arc<TypeEnum>>) -> Model {
        Model {
            schema: model.schema.clone().filter(|s| !s.is_empty()),
            db_name: model.db_name.clone().unwrap_or_else(|| model.name.clone()),
            documentation: model.documentation.clone(),
            fields: model
                .fields
                .iter()
                .filter(|f| f.kind.is_column())
                .map(|f| Self::normalize_field(f, enums))
                .collect(),
        }
    }

    fn normalize_field(field: &DatamodelField, enums: &HashMap<&str, Arc<TypeEnum>>) -> Field {
        // An unknown enum reference leaves the field without an enum
        let type_enum = match field.kind {
            FieldKind::Enum => enums.get(field.field_type.as_str()).cloned(),
            _ => None,
        };

        Field {
            db_name: field.db_name.clone().unwrap_or_else(|| field.name.clone()),
            documentation: field.documentation.clone(),
            type_enum,
        }
    }
}
