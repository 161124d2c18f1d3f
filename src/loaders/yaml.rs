//! YAML loader. Same contract as the JSON loader.

use crate::container::EnumContainer;
use crate::error::EnumError;
use crate::tokenizer::FieldConverter;
use crate::value::Value;

use super::build_document;

pub fn load_yaml(source: &str) -> Result<EnumContainer, EnumError> {
    load_yaml_with(source, FieldConverter::Upper)
}

/// Load a YAML mapping, converting top-level keys with `field_converter`.
///
/// Scalar keys (strings, numbers, booleans) are used as text; any other key
/// fails with [`EnumError::NotAFieldName`].
pub fn load_yaml_with(
    source: &str,
    field_converter: FieldConverter,
) -> Result<EnumContainer, EnumError> {
    let document: serde_yaml::Value = serde_yaml::from_str(source)?;
    build_document(Value::try_from(document)?, "YAML", field_converter)
}
