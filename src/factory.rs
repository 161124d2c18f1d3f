//! Enum factory: configuration, value processing and container assembly.

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::container::EnumContainer;
use crate::error::EnumError;
use crate::tokenizer::{tokenize, FieldConverter};
use crate::value::Value;

/// Conversion applied to every field value before storage.
///
/// A `Function` converts scalars directly. A `Factory` is itself an enum
/// factory, so the values it receives become containers. Both also decide how
/// a nested mapping becomes a child container, see [`process_value`].
#[derive(Clone)]
pub enum ValueConverter {
    Function(Arc<dyn Fn(Value) -> Result<Value, EnumError> + Send + Sync>),
    Factory(Box<EnumFactory>),
}

impl ValueConverter {
    pub fn function<F>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, EnumError> + Send + Sync + 'static,
    {
        ValueConverter::Function(Arc::new(func))
    }

    pub fn factory(factory: EnumFactory) -> Self {
        ValueConverter::Factory(Box::new(factory))
    }

    fn convert(&self, value: Value) -> Result<Value, EnumError> {
        match self {
            ValueConverter::Function(func) => func(value),
            ValueConverter::Factory(factory) => match value {
                Value::Str(field) => Ok(Value::Enum(factory.build_fields([field])?)),
                other => Err(EnumError::NotAFieldName(other)),
            },
        }
    }

    fn convert_mapping(
        &self,
        entries: IndexMap<String, Value>,
    ) -> Result<EnumContainer, EnumError> {
        match self {
            ValueConverter::Function(_) => EnumFactory::new()
                .value_converter(self.clone())
                .build_named(entries),
            ValueConverter::Factory(factory) => factory.build_named(entries),
        }
    }
}

impl fmt::Debug for ValueConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueConverter::Function(_) => write!(f, "Function(..)"),
            ValueConverter::Factory(factory) => f.debug_tuple("Factory").field(factory).finish(),
        }
    }
}

/// Convert one raw value for storage.
///
/// Mappings become child containers. With a converter the child follows the
/// converter's rules; without one it is built by a default [`EnumFactory`].
/// Any other value goes through the converter, or is returned unchanged.
pub fn process_value(value: Value, converter: Option<&ValueConverter>) -> Result<Value, EnumError> {
    match (value, converter) {
        (Value::Map(entries), Some(converter)) => {
            converter.convert_mapping(entries).map(Value::Enum)
        }
        (Value::Map(entries), None) => EnumFactory::default().build_named(entries).map(Value::Enum),
        (other, Some(converter)) => converter.convert(other),
        (other, None) => Ok(other),
    }
}

/// Builds immutable [`EnumContainer`]s from positional and keyword inputs.
///
/// # Example
///
/// ```
/// use enumerator::{EnumFactory, Value};
///
/// let levels = EnumFactory::new()
///     .ordered(true)
///     .build_named([("high", 3), ("low", 1), ("mid", 2)])
///     .unwrap();
///
/// let names: Vec<&str> = levels.field_names().collect();
/// assert_eq!(names, ["LOW", "MID", "HIGH"]);
/// assert_eq!(levels.field_for_value(&Value::Int(2)).unwrap(), "MID");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumFactory {
    value_converter: Option<ValueConverter>,
    field_converter: FieldConverter,
    ordered: bool,
}

impl EnumFactory {
    /// Factory with no value conversion, uppercase field names, input order
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

    /// Sort keyword entries by value before assignment
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Tokenize a field name with this factory's field converter
    pub fn tokenize(&self, word: &str) -> String {
        tokenize(word, &self.field_converter)
    }

    /// Build a container from positional fields and keyword entries.
    ///
    /// Positional fields come first, each mapping its token to the string as
    /// given. Keyword entries follow, sorted by value when the factory is
    /// ordered. A repeated keyword key replaces the earlier value in place.
    ///
    /// # Errors
    /// * [`EnumError::DuplicateField`] - two inputs share a token
    /// * [`EnumError::Unorderable`] - ordered mode met incomparable values
    /// * any error raised by the value converter
    pub fn build<F, S, N, K, V>(&self, fields: F, named: N) -> Result<EnumContainer, EnumError>
    where
        F: IntoIterator<Item = S>,
        S: Into<String>,
        N: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let positional = fields.into_iter().map(|field| {
            let field: String = field.into();
            (field.clone(), Value::Str(field))
        });

        let keywords: IndexMap<String, Value> = named
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let mut keywords: Vec<(String, Value)> = keywords.into_iter().collect();
        if self.ordered {
            sort_by_value(&mut keywords)?;
        }

        let mut container: IndexMap<String, Value> = IndexMap::new();
        for (name, value) in positional.chain(keywords) {
            let token = self.tokenize(&name);
            if container.contains_key(&token) {
                return Err(EnumError::DuplicateField(token));
            }
            tracing::trace!(field = %name, token = %token, "Tokenized field");
            let value = process_value(value, self.value_converter.as_ref())?;
            container.insert(token, value);
        }

        tracing::debug!(
            fields = container.len(),
            ordered = self.ordered,
            "Built enum container"
        );
        Ok(EnumContainer::new(container))
    }

    /// Build from positional fields only
    pub fn build_fields<F, S>(&self, fields: F) -> Result<EnumContainer, EnumError>
    where
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build(fields, std::iter::empty::<(String, Value)>())
    }

    /// Build from keyword entries only
    pub fn build_named<N, K, V>(&self, named: N) -> Result<EnumContainer, EnumError>
    where
        N: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.build(std::iter::empty::<String>(), named)
    }
}

/// Stable sort by value; ties keep their input order.
///
/// Every value is checked against the others first, so the sort only ever
/// sees a total order.
fn sort_by_value(entries: &mut [(String, Value)]) -> Result<(), EnumError> {
    let values: Vec<&Value> = entries.iter().map(|(_, value)| value).collect();
    check_orderable(&values)?;

    entries.sort_by(|(_, left), (_, right)| left.compare(right).unwrap_or(Ordering::Equal));
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKind {
    Number,
    Bool,
    Str,
    List,
}

fn sort_kind(value: &Value) -> Option<SortKind> {
    match value {
        Value::Int(_) => Some(SortKind::Number),
        Value::Float(f) if !f.is_nan() => Some(SortKind::Number),
        Value::Bool(_) => Some(SortKind::Bool),
        Value::Str(_) => Some(SortKind::Str),
        Value::List(_) => Some(SortKind::List),
        _ => None,
    }
}

/// All values share one kind; list elements share one kind per position.
fn check_orderable(values: &[&Value]) -> Result<(), EnumError> {
    let [first, rest @ ..] = values else {
        return Ok(());
    };
    if rest.is_empty() {
        return Ok(());
    }

    let kind = sort_kind(first).ok_or_else(|| unorderable(first, rest[0]))?;
    if let Some(other) = rest.iter().find(|value| sort_kind(value) != Some(kind)) {
        return Err(unorderable(first, other));
    }

    if kind == SortKind::List {
        let lists: Vec<&[Value]> = values.iter().filter_map(|value| value.as_list()).collect();
        let longest = lists.iter().map(|items| items.len()).max().unwrap_or(0);
        for position in 0..longest {
            let column: Vec<&Value> =
                lists.iter().filter_map(|items| items.get(position)).collect();
            check_orderable(&column)?;
        }
    }
    Ok(())
}

fn unorderable(left: &Value, right: &Value) -> EnumError {
    EnumError::Unorderable {
        left: left.clone(),
        right: right.clone(),
    }
}

/// Build a container with the default factory configuration
pub fn build_enum<F, S, N, K, V>(fields: F, named: N) -> Result<EnumContainer, EnumError>
where
    F: IntoIterator<Item = S>,
    S: Into<String>,
    N: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    EnumFactory::default().build(fields, named)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(container: &EnumContainer) -> Vec<&str> {
        container.field_names().collect()
    }

    #[test]
    fn test_positional_fields_map_to_input() {
        let container = EnumFactory::new().build_fields(["red", "dark green"]).unwrap();

        assert_eq!(names(&container), vec!["RED", "DARK_GREEN"]);
        assert_eq!(container["RED"], Value::from("red"));
        assert_eq!(container["DARK_GREEN"], Value::from("dark green"));
    }

    #[test]
    fn test_positional_before_keywords() {
        let container = build_enum(["first"], [("second", 2), ("third", 3)]).unwrap();

        assert_eq!(names(&container), vec!["FIRST", "SECOND", "THIRD"]);
        assert_eq!(container["SECOND"], Value::Int(2));
    }

    #[test]
    fn test_ordered_sorts_keywords_only() {
        let container = EnumFactory::new()
            .ordered(true)
            .build(["z_positional"], [("b", 2), ("a", 1), ("c", 0)])
            .unwrap();

        assert_eq!(names(&container), vec!["Z_POSITIONAL", "C", "A", "B"]);
    }

    #[test]
    fn test_ordered_sort_is_stable() {
        let container = EnumFactory::new()
            .ordered(true)
            .build_named([("x", 1), ("y", 0), ("z", 1), ("w", 0)])
            .unwrap();

        assert_eq!(names(&container), vec!["Y", "W", "X", "Z"]);
    }

    #[test]
    fn test_ordered_rejects_mixed_types() {
        let result = EnumFactory::new()
            .ordered(true)
            .build_named([("a", Value::Int(1)), ("b", Value::from("one"))]);

        assert!(matches!(result, Err(EnumError::Unorderable { .. })));
    }

    #[test]
    fn test_ordered_rejects_many_interleaved_types() {
        for count in [8, 21, 40, 64, 200, 1000] {
            let entries: Vec<(String, Value)> = (0..count)
                .map(|i| {
                    let value = if i % 3 == 0 {
                        Value::Str(format!("s{}", i))
                    } else {
                        Value::Int(i as i64)
                    };
                    (format!("f{}", i), value)
                })
                .collect();

            let result = EnumFactory::new().ordered(true).build_named(entries);
            assert!(
                matches!(result, Err(EnumError::Unorderable { .. })),
                "count {}",
                count
            );
        }
    }

    #[test]
    fn test_ordered_rejects_unorderable_values() {
        let nulls = EnumFactory::new()
            .ordered(true)
            .build_named([("a", Value::Null), ("b", Value::Null)]);
        assert!(matches!(nulls, Err(EnumError::Unorderable { .. })));

        let nan = EnumFactory::new()
            .ordered(true)
            .build_named([("a", Value::Int(1)), ("b", Value::Float(f64::NAN))]);
        assert!(matches!(
            nan,
            Err(EnumError::Unorderable { left: Value::Int(1), .. })
        ));

        let lists = EnumFactory::new().ordered(true).build_named([
            ("a", Value::from(vec![Value::Int(1), Value::Int(2)])),
            ("b", Value::from(vec![Value::Int(1), Value::from("x")])),
        ]);
        assert!(matches!(lists, Err(EnumError::Unorderable { .. })));
    }

    #[test]
    fn test_ordered_single_value_needs_no_comparison() {
        let container = EnumFactory::new()
            .ordered(true)
            .build_named([("only", Value::from(json!({"k": 1})))])
            .unwrap();

        assert!(container["ONLY"].as_enum().is_some());
    }

    #[test]
    fn test_ordered_mixed_numbers_and_lists() {
        let numbers = EnumFactory::new()
            .ordered(true)
            .build_named([("a", Value::Float(2.5)), ("b", Value::Int(1)), ("c", Value::Int(3))])
            .unwrap();
        assert_eq!(names(&numbers), vec!["B", "A", "C"]);

        let lists = EnumFactory::new()
            .ordered(true)
            .build_named([
                ("long", Value::from(vec![1, 2, 3])),
                ("short", Value::from(vec![1, 2])),
                ("first", Value::from(vec![0])),
            ])
            .unwrap();
        assert_eq!(names(&lists), vec!["FIRST", "SHORT", "LONG"]);
    }

    #[test]
    fn test_unordered_keeps_input_order() {
        let container = build_enum(std::iter::empty::<String>(), [("b", 2), ("a", 1)]).unwrap();
        assert_eq!(names(&container), vec!["B", "A"]);
    }

    #[test]
    fn test_token_collision_is_an_error() {
        let result = EnumFactory::new().build_fields(["a b", "a-b"]);
        assert!(matches!(result, Err(EnumError::DuplicateField(token)) if token == "A_B"));

        let result = build_enum(["x"], [("X", 1)]);
        assert!(matches!(result, Err(EnumError::DuplicateField(_))));
    }

    #[test]
    fn test_repeated_keyword_replaces_value() {
        let container = EnumFactory::new()
            .build_named([("a", 1), ("b", 2), ("a", 3)])
            .unwrap();

        assert_eq!(names(&container), vec!["A", "B"]);
        assert_eq!(container["A"], Value::Int(3));
    }

    #[test]
    fn test_function_converter_applies_to_scalars() {
        let doubled = ValueConverter::function(|value| match value {
            Value::Int(i) => Ok(Value::Int(i * 2)),
            other => Ok(other),
        });
        let container = EnumFactory::new()
            .value_converter(doubled)
            .build_named([("a", 1), ("b", 5)])
            .unwrap();

        assert_eq!(container["A"], Value::Int(2));
        assert_eq!(container["B"], Value::Int(10));
    }

    #[test]
    fn test_function_converter_applies_to_nested_mapping() {
        let stringify = ValueConverter::function(|value| Ok(Value::Str(value.to_string())));
        let container = EnumFactory::new()
            .field_converter(FieldConverter::Lower)
            .value_converter(stringify)
            .build_named([("Outer", Value::from(json!({"inner": 7})))])
            .unwrap();

        let outer = container["outer"].as_enum().unwrap();
        assert_eq!(outer["INNER"], Value::from("7"));
    }

    #[test]
    fn test_converter_error_propagates() {
        let failing = ValueConverter::function(|value| Err(EnumError::NotAFieldName(value)));
        let result = EnumFactory::new().value_converter(failing).build_fields(["a"]);

        assert!(matches!(result, Err(EnumError::NotAFieldName(_))));
    }

    #[test]
    fn test_nested_mapping_without_converter_uses_default_factory() {
        let container = EnumFactory::new()
            .field_converter(FieldConverter::Lower)
            .build_named([("Outer", Value::from(json!({"inner": {"deep": true}})))])
            .unwrap();

        let outer = container["outer"].as_enum().unwrap();
        let inner = outer["INNER"].as_enum().unwrap();
        assert_eq!(inner["DEEP"], Value::Bool(true));
    }

    #[test]
    fn test_factory_converter_builds_children() {
        let child = EnumFactory::new().field_converter(FieldConverter::Preserve);
        let container = EnumFactory::new()
            .value_converter(ValueConverter::factory(child))
            .build_named([
                ("group", Value::from(json!({"Key": 1}))),
                ("single", Value::from("only one")),
            ])
            .unwrap();

        let group = container["GROUP"].as_enum().unwrap();
        assert_eq!(group["Key"], Value::Int(1));

        let single = container["SINGLE"].as_enum().unwrap();
        assert_eq!(single["only_one"], Value::from("only one"));
    }

    #[test]
    fn test_factory_converter_rejects_non_string_scalar() {
        let result = EnumFactory::new()
            .value_converter(ValueConverter::factory(EnumFactory::new()))
            .build_named([("n", 1)]);

        assert!(matches!(result, Err(EnumError::NotAFieldName(Value::Int(1)))));
    }

    #[test]
    fn test_lists_pass_through() {
        let container = build_enum(
            std::iter::empty::<String>(),
            [("items", Value::from(json!([{"a": 1}, 2])))],
        )
        .unwrap();

        let items = container["ITEMS"].as_list().unwrap();
        assert!(matches!(items[0], Value::Map(_)));
        assert_eq!(items[1], Value::Int(2));
    }

    #[test]
    fn test_same_inputs_build_equal_containers() {
        let factory = EnumFactory::new().ordered(true);
        let first = factory.build(["x"], [("b", 2), ("a", 1)]).unwrap();
        let second = factory.build(["x"], [("b", 2), ("a", 1)]).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_build() {
        let container = EnumFactory::new().build_fields(Vec::<String>::new()).unwrap();
        assert!(container.is_empty());
    }
}
