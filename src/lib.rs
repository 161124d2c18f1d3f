//! # Enumerator: Immutable Named-Field Constant Containers
//!
//! Enumerator builds immutable, enum-like containers of named constants from
//! plain strings, name/value pairs, or parsed INI, JSON and YAML documents.
//!
//! ## Features
//!
//! - **Enum factory**: positional strings and keyword entries become fields, with
//!   pluggable field-name and value conversion and optional ordering by value
//! - **Sequence factory**: numbers names from a start value by a fixed step
//! - **Reverse lookup**: find the field name holding a value
//! - **Nested containers**: mapping values become child containers, recursively
//! - **Format loaders**: INI (sections, defaults, interpolation, typed values),
//!   JSON and YAML
//!
//! ## Example: Constants
//!
//! ```
//! use enumerator::{build_enum, Value};
//!
//! let status = build_enum(["pending"], [("done", 2), ("failed", -1)]).unwrap();
//!
//! assert_eq!(status["PENDING"], Value::from("pending"));
//! assert_eq!(status["DONE"], Value::Int(2));
//! assert_eq!(status.field_for_value(&Value::Int(-1)).unwrap(), "FAILED");
//! ```
//!
//! ## Example: INI Configuration
//!
//! ```
//! use enumerator::{load_ini, Value};
//!
//! let config = load_ini("[DEFAULT]\nretries = 3\n\n[database]\nhost = db.local\n").unwrap();
//! let database = config["DATABASE"].as_enum().unwrap();
//!
//! assert_eq!(database["host"], Value::from("db.local"));
//! assert_eq!(database["retries"], Value::Int(3));
//! ```

// Core modules
pub mod value;
pub mod error;
pub mod tokenizer;
pub mod container;
pub mod factory;
pub mod sequence;

// Format loaders
pub mod loaders;

// Re-export key types
pub use value::Value;
pub use error::EnumError;
pub use tokenizer::{tokenize, FieldConverter};
pub use container::EnumContainer;
pub use factory::{build_enum, process_value, EnumFactory, ValueConverter};
pub use sequence::{build_sequence, SequenceFactory};

// Re-export loader entry points
pub use loaders::{
    load_ini, load_json, load_json_with, load_yaml, load_yaml_with, IniDocument, IniError
};

// Case styles for FieldConverter::Case
pub use convert_case::Case;
