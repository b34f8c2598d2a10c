//! Datamodel loading and normalization
//!
//! This crate handles:
//! - Parsing the datamodel JSON exported by the schema loader
//! - Normalizing it into [`schemanote_core::Model`] values

pub mod datamodel;
pub mod normalize;

pub use datamodel::{Datamodel, DatamodelEnum, DatamodelEnumValue, DatamodelModel, DatamodelField, FieldKind, DatamodelError};
pub use normalize::ModelNormalizer;

/// Parse a datamodel JSON document straight into normalized models
pub fn parse(json: &str) -> Result<Vec<schemanote_core::Model>, DatamodelError> {
    let datamodel = Datamodel::from_str(json)?;
    Ok(ModelNormalizer::normalize(&datamodel))
}
