//! Error type shared by the factories, containers and loaders.

use std::fmt;

use crate::loaders::ini::IniError;
use crate::value::Value;

/// Error type for enum construction, lookup and loading
#[derive(Debug)]
pub enum EnumError {
    /// Reverse lookup found no field holding the value
    ValueNotFound(Value),
    /// Two inputs tokenized to the same field name
    DuplicateField(String),
    /// Access to a field the container does not define
    UndefinedField(String),
    /// Ordered mode met two values that cannot be compared
    Unorderable {
        left: Value,
        right: Value,
    },
    /// Sequence numbering left the i64 range at the given name index
    SequenceOverflow {
        index: usize,
    },
    /// A non-string value was used where a field name is required
    NotAFieldName(Value),
    /// A loader's top-level document is not a mapping
    NotAMapping(&'static str),
    IniError(IniError),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
}

impl From<IniError> for EnumError {
    fn from(err: IniError) -> Self {
        EnumError::IniError(err)
    }
}

impl From<serde_json::Error> for EnumError {
    fn from(err: serde_json::Error) -> Self {
        EnumError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for EnumError {
    fn from(err: serde_yaml::Error) -> Self {
        EnumError::YamlError(err)
    }
}

impl fmt::Display for EnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumError::ValueNotFound(value) => {
                write!(f, "Undefined value \"{}\" in enumeration", value)
            }
            EnumError::DuplicateField(name) => write!(f, "Duplicate field name: '{}'", name),
            EnumError::UndefinedField(name) => write!(f, "Undefined field: '{}'", name),
            EnumError::Unorderable { left, right } => {
                write!(f, "Cannot order values {:?} and {:?}", left, right)
            }
            EnumError::SequenceOverflow { index } => {
                write!(f, "Sequence value overflows at name index {}", index)
            }
            EnumError::NotAFieldName(value) => {
                write!(f, "Value {:?} cannot be used as a field name", value)
            }
            EnumError::NotAMapping(format) => {
                write!(f, "{} document must be a mapping at the top level", format)
            }
            EnumError::IniError(e) => write!(f, "INI error: {}", e),
            EnumError::JsonError(e) => write!(f, "JSON error: {}", e),
            EnumError::YamlError(e) => write!(f, "YAML error: {}", e),
        }
    }
}

impl std::error::Error for EnumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnumError::IniError(e) => Some(e),
            EnumError::JsonError(e) => Some(e),
            EnumError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_not_found_message() {
        let err = EnumError::ValueNotFound(Value::Int(7));
        assert_eq!(err.to_string(), "Undefined value \"7\" in enumeration");
    }

    #[test]
    fn test_json_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EnumError::from(json_err);

        assert!(matches!(err, EnumError::JsonError(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
