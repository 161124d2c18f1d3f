//! INI loader.
//!
//! Parses INI text into sections of string options and loads them as a
//! two-level container: one field per section (a `DEFAULT` field comes first),
//! each holding a container of lower-cased options with typed values.
//!
//! Parsing rules:
//! - `[name]` opens a section; names are case-sensitive
//! - `key = value` or `key: value`, split at the first delimiter; keys are
//!   lower-cased, keys and values are stripped
//! - full-line comments start with `#` or `;`; inline comments are kept
//! - lines indented deeper than their option continue its value
//! - `[DEFAULT]` options are inherited by every section
//! - `%(name)s` interpolates another option of the section, `%%` is a literal `%`

use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::container::EnumContainer;
use crate::error::EnumError;
use crate::factory::{EnumFactory, ValueConverter};
use crate::tokenizer::FieldConverter;
use crate::value::Value;

/// Name of the section holding inherited defaults
pub const DEFAULT_SECTION: &str = "DEFAULT";

const MAX_INTERPOLATION_DEPTH: usize = 10;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<header>.+)\]").expect("section pattern is valid"));

static OPTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<option>.*?)\s*[=:]\s*(?P<value>.*)$").expect("option pattern is valid")
});

static INTERPOLATION_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%\(([^)]+)\)s").expect("interpolation pattern is valid"));

/// Error type for INI parsing and interpolation
#[derive(Debug, Clone, PartialEq)]
pub enum IniError {
    MissingSectionHeader {
        line: usize,
        content: String,
    },
    DuplicateSection {
        line: usize,
        section: String,
    },
    DuplicateOption {
        line: usize,
        section: String,
        option: String,
    },
    Syntax {
        line: usize,
        content: String,
    },
    InterpolationMissingOption {
        section: String,
        option: String,
        reference: String,
    },
    InterpolationSyntax {
        section: String,
        option: String,
        detail: String,
    },
    InterpolationDepthExceeded {
        section: String,
        option: String,
    },
}

impl fmt::Display for IniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniError::MissingSectionHeader { line, content } => {
                write!(f, "No section header before line {}: {:?}", line, content)
            }
            IniError::DuplicateSection { line, section } => {
                write!(f, "Section '{}' already exists (line {})", section, line)
            }
            IniError::DuplicateOption { line, section, option } => write!(
                f,
                "Option '{}' in section '{}' already exists (line {})",
                option, section, line
            ),
            IniError::Syntax { line, content } => {
                write!(f, "Parse error at line {}: {:?}", line, content)
            }
            IniError::InterpolationMissingOption { section, option, reference } => write!(
                f,
                "Option '{}' in section '{}' references missing option '{}'",
                option, section, reference
            ),
            IniError::InterpolationSyntax { section, option, detail } => write!(
                f,
                "Bad interpolation in option '{}' of section '{}': {}",
                option, section, detail
            ),
            IniError::InterpolationDepthExceeded { section, option } => write!(
                f,
                "Interpolation depth exceeded in option '{}' of section '{}'",
                option, section
            ),
        }
    }
}

impl std::error::Error for IniError {}

/// Parsed INI document with raw (uninterpolated) option values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    defaults: IndexMap<String, String>,
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl IniDocument {
    /// Parse INI text.
    ///
    /// # Errors
    /// Returns the first structural error met, with its 1-based line number.
    pub fn parse(source: &str) -> Result<Self, IniError> {
        // DEFAULT sits at index 0 and is split out once parsing is done
        let mut raw: IndexMap<String, IndexMap<String, Vec<String>>> = IndexMap::new();
        raw.insert(DEFAULT_SECTION.to_string(), IndexMap::new());

        let mut current_section: Option<String> = None;
        let mut current_option: Option<String> = None;
        let mut indent_level = 0;

        for (index, line) in source.lines().enumerate() {
            let line_number = index + 1;
            let stripped = line.trim();

            if stripped.starts_with('#') || stripped.starts_with(';') {
                continue;
            }

            if stripped.is_empty() {
                // Kept so that a later continuation line preserves the gap
                if let Some(lines) = option_lines(&mut raw, &current_section, &current_option) {
                    lines.push(String::new());
                }
                continue;
            }

            let line_indent = line.len() - line.trim_start().len();
            if line_indent > indent_level {
                if let Some(lines) = option_lines(&mut raw, &current_section, &current_option) {
                    lines.push(stripped.to_string());
                    continue;
                }
            }
            indent_level = line_indent;

            if let Some(caps) = SECTION_HEADER.captures(stripped) {
                let name = caps["header"].to_string();
                if name != DEFAULT_SECTION && raw.contains_key(&name) {
                    return Err(IniError::DuplicateSection {
                        line: line_number,
                        section: name,
                    });
                }
                raw.entry(name.clone()).or_default();
                current_section = Some(name);
                current_option = None;
                continue;
            }

            let Some(section) = current_section.as_ref() else {
                return Err(IniError::MissingSectionHeader {
                    line: line_number,
                    content: line.to_string(),
                });
            };

            let syntax_error = || IniError::Syntax {
                line: line_number,
                content: line.to_string(),
            };
            let caps = OPTION_LINE.captures(stripped).ok_or_else(syntax_error)?;
            let option = caps["option"].trim_end().to_lowercase();
            if option.is_empty() {
                return Err(syntax_error());
            }

            let options = raw.entry(section.clone()).or_default();
            if options.contains_key(&option) {
                return Err(IniError::DuplicateOption {
                    line: line_number,
                    section: section.clone(),
                    option,
                });
            }
            options.insert(option.clone(), vec![caps["value"].trim().to_string()]);
            current_option = Some(option);
        }

        let mut document = IniDocument::default();
        for (name, options) in raw {
            let joined: IndexMap<String, String> = options
                .into_iter()
                .map(|(option, lines)| (option, lines.join("\n").trim_end().to_string()))
                .collect();
            if name == DEFAULT_SECTION {
                document.defaults = joined;
            } else {
                document.sections.insert(name, joined);
            }
        }

        Ok(document)
    }

    /// Raw options of the `DEFAULT` section
    pub fn defaults(&self) -> &IndexMap<String, String> {
        &self.defaults
    }

    /// Section names in document order, `DEFAULT` excluded
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// All sections with defaults merged in and values interpolated.
    ///
    /// `DEFAULT` comes first. Within a section its own options come first,
    /// followed by the defaults it does not override.
    pub fn items(&self) -> Result<Vec<(String, IndexMap<String, String>)>, IniError> {
        let mut items = Vec::with_capacity(self.sections.len() + 1);
        items.push((
            DEFAULT_SECTION.to_string(),
            self.resolve(DEFAULT_SECTION, &IndexMap::new())?,
        ));
        for (name, options) in &self.sections {
            items.push((name.clone(), self.resolve(name, options)?));
        }
        Ok(items)
    }

    fn resolve(
        &self,
        section: &str,
        options: &IndexMap<String, String>,
    ) -> Result<IndexMap<String, String>, IniError> {
        let mut merged = options.clone();
        for (option, value) in &self.defaults {
            merged
                .entry(option.clone())
                .or_insert_with(|| value.clone());
        }

        merged
            .iter()
            .map(|(option, raw)| {
                let mut resolved = String::with_capacity(raw.len());
                interpolate(section, option, raw, &merged, 1, &mut resolved)?;
                Ok((option.clone(), resolved))
            })
            .collect()
    }
}

fn option_lines<'a>(
    raw: &'a mut IndexMap<String, IndexMap<String, Vec<String>>>,
    section: &Option<String>,
    option: &Option<String>,
) -> Option<&'a mut Vec<String>> {
    raw.get_mut(section.as_ref()?)?.get_mut(option.as_ref()?)
}

fn interpolate(
    section: &str,
    option: &str,
    value: &str,
    vars: &IndexMap<String, String>,
    depth: usize,
    out: &mut String,
) -> Result<(), IniError> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(IniError::InterpolationDepthExceeded {
            section: section.to_string(),
            option: option.to_string(),
        });
    }

    let mut rest = value;
    while let Some(position) = rest.find('%') {
        out.push_str(&rest[..position]);
        rest = &rest[position..];

        match rest[1..].chars().next() {
            Some('%') => {
                out.push('%');
                rest = &rest[2..];
            }
            Some('(') => {
                let caps = INTERPOLATION_KEY.captures(rest).ok_or_else(|| {
                    IniError::InterpolationSyntax {
                        section: section.to_string(),
                        option: option.to_string(),
                        detail: format!("bad interpolation variable reference {:?}", rest),
                    }
                })?;
                let consumed = caps[0].len();
                let reference = caps[1].to_lowercase();
                rest = &rest[consumed..];

                let replacement = vars.get(&reference).ok_or_else(|| {
                    IniError::InterpolationMissingOption {
                        section: section.to_string(),
                        option: option.to_string(),
                        reference: reference.clone(),
                    }
                })?;
                if replacement.contains('%') {
                    interpolate(section, option, replacement, vars, depth + 1, out)?;
                } else {
                    out.push_str(replacement);
                }
            }
            _ => {
                return Err(IniError::InterpolationSyntax {
                    section: section.to_string(),
                    option: option.to_string(),
                    detail: format!("'%' must be followed by '%' or '(', found: {:?}", rest),
                });
            }
        }
    }
    out.push_str(rest);

    Ok(())
}

/// Convert a raw option value: boolean, then integer, then float, else string
pub fn convert_ini_value(raw: &str) -> Value {
    match raw.to_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Some(i) = parse_int(raw) {
        return Value::Int(i);
    }
    if let Some(f) = parse_float(raw) {
        return Value::Float(f);
    }
    Value::Str(raw.to_string())
}

fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return None;
    }
    if !underscores_between_digits(digits) {
        return None;
    }
    trimmed.replace('_', "").parse().ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !underscores_between_digits(trimmed) {
        return None;
    }
    trimmed.replace('_', "").parse().ok()
}

/// Digit separators are only valid between two digits
fn underscores_between_digits(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    })
}

fn section_factory() -> EnumFactory {
    EnumFactory::new()
        .field_converter(FieldConverter::Lower)
        .value_converter(ValueConverter::function(|value| {
            Ok(match value {
                Value::Str(raw) => convert_ini_value(&raw),
                other => other,
            })
        }))
}

/// Load INI text as a two-level container.
///
/// # Example
/// ```
/// use enumerator::{load_ini, Value};
///
/// let config = load_ini("[server]\nport = 8080\ndebug = false\n").unwrap();
/// let server = config["SERVER"].as_enum().unwrap();
/// assert_eq!(server["port"], Value::Int(8080));
/// assert_eq!(server["debug"], Value::Bool(false));
/// ```
pub fn load_ini(source: &str) -> Result<EnumContainer, EnumError> {
    let document = IniDocument::parse(source)?;
    let sections = document.items()?;

    let loader = EnumFactory::new().value_converter(ValueConverter::factory(section_factory()));
    let container = loader.build_named(sections.into_iter().map(|(name, options)| {
        let options: IndexMap<String, Value> = options
            .into_iter()
            .map(|(option, value)| (option, Value::Str(value)))
            .collect();
        (name, Value::Map(options))
    }))?;

    tracing::debug!(sections = container.len(), "Loaded INI document");
    Ok(container)
}
