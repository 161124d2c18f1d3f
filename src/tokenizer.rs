//! Field-name tokenization.
//!
//! Any string becomes an identifier-like token: each run of non-word
//! characters collapses to a single underscore, then a [`FieldConverter`]
//! sets the case.
//!
//! The token is not validated. Callers must pass strings that yield a valid
//! identifier (first character a letter or underscore).

use convert_case::{Case, Casing};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Conversion applied to every field name after non-word substitution
#[derive(Clone, Default)]
pub enum FieldConverter {
    /// Uppercase the whole token
    #[default]
    Upper,
    /// Lowercase the whole token
    Lower,
    /// Keep the token as is
    Preserve,
    /// Re-case with convert_case (snake, pascal, camel, ...)
    Case(Case),
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl FieldConverter {
    /// Wrap an arbitrary conversion function
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        FieldConverter::Custom(Arc::new(func))
    }

    pub fn apply(&self, name: &str) -> String {
        match self {
            FieldConverter::Upper => name.to_uppercase(),
            FieldConverter::Lower => name.to_lowercase(),
            FieldConverter::Preserve => name.to_string(),
            FieldConverter::Case(case) => name.to_case(*case),
            FieldConverter::Custom(func) => func(name),
        }
    }
}

impl fmt::Debug for FieldConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldConverter::Upper => write!(f, "Upper"),
            FieldConverter::Lower => write!(f, "Lower"),
            FieldConverter::Preserve => write!(f, "Preserve"),
            FieldConverter::Case(case) => write!(f, "Case({:?})", case),
            FieldConverter::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Tokenize `word` into a field name
///
/// # Example
/// ```
/// use enumerator::{tokenize, FieldConverter};
///
/// assert_eq!(tokenize("max-retry count", &FieldConverter::Upper), "MAX_RETRY_COUNT");
/// assert_eq!(tokenize("Max.Size", &FieldConverter::Lower), "max_size");
/// ```
pub fn tokenize(word: &str, converter: &FieldConverter) -> String {
    let substituted = NON_WORD.replace_all(word, "_");
    converter.apply(&substituted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_non_word_runs() {
        assert_eq!(tokenize("a  -- b", &FieldConverter::Preserve), "a_b");
        assert_eq!(tokenize("a b c", &FieldConverter::Upper), "A_B_C");
        assert_eq!(tokenize("already_valid", &FieldConverter::Upper), "ALREADY_VALID");
    }

    #[test]
    fn test_edges_become_underscores() {
        assert_eq!(tokenize(" padded ", &FieldConverter::Preserve), "_padded_");
        assert_eq!(tokenize("", &FieldConverter::Upper), "");
    }

    #[test]
    fn test_unicode_word_characters_kept() {
        assert_eq!(tokenize("größe wert", &FieldConverter::Preserve), "größe_wert");
    }

    #[test]
    fn test_leading_digit_not_rejected() {
        assert_eq!(tokenize("1st place", &FieldConverter::Upper), "1ST_PLACE");
    }

    #[test]
    fn test_case_converters() {
        assert_eq!(tokenize("http status", &FieldConverter::Case(Case::Pascal)), "HttpStatus");
        assert_eq!(tokenize("HttpStatus", &FieldConverter::Case(Case::Snake)), "http_status");
        assert_eq!(tokenize("Mixed Case", &FieldConverter::Lower), "mixed_case");
    }

    #[test]
    fn test_custom_converter() {
        let prefixed = FieldConverter::custom(|name| format!("K_{}", name.to_uppercase()));
        assert_eq!(tokenize("x y", &prefixed), "K_X_Y");
        assert_eq!(format!("{:?}", prefixed), "Custom(..)");
    }
}
