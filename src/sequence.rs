//! Integer sequence factory.
//!
//! Assigns `start_value + index * step` to each name, in order, and builds the
//! container through an ordered [`EnumFactory`]. Since the values are monotonic
//! the sort keeps input order, except that a negative step reverses it.

use crate::container::EnumContainer;
use crate::error::EnumError;
use crate::factory::{EnumFactory, ValueConverter};
use crate::tokenizer::FieldConverter;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct SequenceFactory {
    value_converter: Option<ValueConverter>,
    field_converter: FieldConverter,
}

impl SequenceFactory {
    /// Identity value conversion, uppercase field names
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value_converter(mut self, converter: ValueConverter) -> Self {
        self.value_converter = Some(converter);
        self
    }

    pub fn field_converter(mut self, converter: FieldConverter) -> Self {
        self.field_converter = converter;
        self
    }

    /// Number `names` from 0 with step 1
    pub fn build<I, S>(&self, names: I) -> Result<EnumContainer, EnumError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_from(names, 0, 1)
    }

    /// Number `names` from `start_value`, advancing by `step`.
    ///
    /// A repeated name takes its last number, then sorts by it.
    ///
    /// # Example
    /// ```
    /// use enumerator::{SequenceFactory, Value};
    ///
    /// let codes = SequenceFactory::new().build_from(["a", "b", "c"], 5, 2).unwrap();
    /// assert_eq!(codes["A"], Value::Int(5));
    /// assert_eq!(codes["C"], Value::Int(9));
    /// ```
    pub fn build_from<I, S>(
        &self,
        names: I,
        start_value: i64,
        step: i64,
    ) -> Result<EnumContainer, EnumError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut numbered: Vec<(String, Value)> = Vec::new();
        let mut value = start_value;
        for (index, name) in names.into_iter().enumerate() {
            if index > 0 {
                value = value
                    .checked_add(step)
                    .ok_or(EnumError::SequenceOverflow { index })?;
            }
            numbered.push((name.into(), Value::Int(value)));
        }

        self.enum_factory().build_named(numbered)
    }

    fn enum_factory(&self) -> EnumFactory {
        let factory = EnumFactory::new()
            .field_converter(self.field_converter.clone())
            .ordered(true);
        match &self.value_converter {
            Some(converter) => factory.value_converter(converter.clone()),
            None => factory,
        }
    }
}

/// Number `names` from 0 with the default sequence configuration
pub fn build_sequence<I, S>(names: I) -> Result<EnumContainer, EnumError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SequenceFactory::default().build(names)
}
