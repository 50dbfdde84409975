//! Identifier casing transforms for column labels.
//!
//! Column labels in real datasets are rarely valid identifiers: they carry spaces,
//! dots, dashes and arbitrary capitalisation. The two transforms here normalise a
//! label into `snake_case` or `lowerCamelCase`. Both are total over any input.
//!
//! # Example
//!
//! ```rust
//! use djmodel::casing::{camel_case, snake_case};
//!
//! assert_eq!(snake_case("order date"), "order_date");
//! assert_eq!(snake_case("orderDate"), "order_date");
//! assert_eq!(camel_case("order_date"), "orderDate");
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static SNAKE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\-\.\s]").expect("snake separator pattern is valid"));

static ASCII_UPPERCASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]").expect("uppercase pattern is valid"));

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\-_\.\s]([a-z])").expect("camel boundary pattern is valid"));

/// Returns true when the label has at least one cased character and none of them
/// is lowercase ("shouting case").
fn is_shouting(label: &str) -> bool {
    let mut has_cased = false;
    for c in label.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Capitalises the first character of every whitespace-delimited word and
/// lowercases the rest.
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut word_start = true;
    for c in label.chars() {
        if c.is_whitespace() {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Converts a label to `snake_case`.
///
/// Every `-`, `.` and whitespace character becomes one underscore; runs are not
/// collapsed, so four spaces yield four underscores. The first character is kept
/// as-is and every later uppercase ASCII letter is prefixed with an underscore
/// before the remainder is lowercased. All-caps labels are lowercased first.
pub fn snake_case(label: &str) -> String {
    let label = if is_shouting(label) {
        label.to_lowercase()
    } else {
        label.to_string()
    };
    let label = SNAKE_SEPARATOR.replace_all(&label, "_");

    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = ASCII_UPPERCASE
        .replace_all(chars.as_str(), "_${0}")
        .to_lowercase();

    format!("{first}{rest}")
}

/// Converts a label to `lowerCamelCase`.
///
/// All-caps labels are title-cased first. A single leading `-`, `_` or `.` is
/// dropped, the first character is lowercased, and every separator followed by a
/// lowercase ASCII letter is folded into an uppercase letter. Leftover whitespace
/// is removed.
pub fn camel_case(label: &str) -> String {
    let normalized = if is_shouting(label) {
        title_case(label)
    } else {
        label.to_string()
    };
    let label = normalized
        .strip_prefix(['-', '_', '.'])
        .unwrap_or(normalized.as_str());

    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = CAMEL_BOUNDARY.replace_all(chars.as_str(), |caps: &Captures| caps[1].to_uppercase());
    let rest: String = rest.chars().filter(|c| !c.is_whitespace()).collect();

    format!("{}{rest}", first.to_lowercase())
}

/// How column labels are turned into model field names.
///
/// Parsing never fails: `"snake"` and `"camel"` select a transform and any other
/// value keeps labels unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnCasing {
    /// `snake_case` field names.
    #[default]
    Snake,
    /// `lowerCamelCase` field names.
    Camel,
    /// Labels are used as-is.
    Preserve,
}

impl ColumnCasing {
    /// Applies this casing to a column label.
    pub fn apply(&self, label: &str) -> String {
        match self {
            ColumnCasing::Snake => snake_case(label),
            ColumnCasing::Camel => camel_case(label),
            ColumnCasing::Preserve => label.to_string(),
        }
    }

    /// Returns the configuration name of this casing.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnCasing::Snake => "snake",
            ColumnCasing::Camel => "camel",
            ColumnCasing::Preserve => "preserve",
        }
    }
}

impl FromStr for ColumnCasing {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "snake" => ColumnCasing::Snake,
            "camel" => ColumnCasing::Camel,
            _ => ColumnCasing::Preserve,
        })
    }
}

impl From<String> for ColumnCasing {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(casing) => casing,
            Err(never) => match never {},
        }
    }
}

impl From<ColumnCasing> for String {
    fn from(value: ColumnCasing) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ColumnCasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
