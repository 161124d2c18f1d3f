//! Format loaders.
//!
//! Each loader parses its text format into [`Value`]s and hands the result to
//! an [`EnumFactory`], so loaded documents are ordinary [`EnumContainer`]s.

pub mod ini;
pub mod json;
pub mod yaml;

// Re-export key types
pub use ini::{convert_ini_value, load_ini, IniDocument, IniError, DEFAULT_SECTION};
pub use json::{load_json, load_json_with};
pub use yaml::{load_yaml, load_yaml_with};

use crate::container::EnumContainer;
use crate::error::EnumError;
use crate::factory::EnumFactory;
use crate::tokenizer::FieldConverter;
use crate::value::Value;

/// Build a container from a parsed document whose top level is a mapping.
/// Nested mappings go through the default factory.
fn build_document(
    document: Value,
    format: &'static str,
    field_converter: FieldConverter,
) -> Result<EnumContainer, EnumError> {
    let Value::Map(entries) = document else {
        return Err(EnumError::NotAMapping(format));
    };

    let container = EnumFactory::new()
        .field_converter(field_converter)
        .build_named(entries)?;

    tracing::debug!(format, fields = container.len(), "Loaded document");
    Ok(container)
}
