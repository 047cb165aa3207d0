//! Naming convention utilities.
//!
//! This module covers three concerns:
//!
//! - Qualified-name handling ([`simple_name`], [`package_of`], [`qualify`]),
//!   accepting both `.` (Java) and `::` (Rust) separators
//! - The DTO class naming convention ([`NamingConvention`])
//! - Identifier case conversions used for Java field names and JSON property
//!   names ([`to_camel_case`], [`NameStyle`])
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `com.shop.Order` | [`simple_name`] | `Order` |
//! | `com.shop.Order` | [`package_of`] | `com.shop` |
//! | `display_name` | [`to_camel_case`] | `displayName` |
//! | `Order` + suffix `Dto` | [`NamingConvention::apply`] | `OrderDto` |

use serde::{Deserialize, Serialize};

/// Last path segment of a qualified name.
///
/// # Examples
///
/// ```
/// use dtoforge_core::naming::simple_name;
///
/// assert_eq!(simple_name("com.shop.Order"), "Order");
/// assert_eq!(simple_name("crate::model::Order"), "Order");
/// assert_eq!(simple_name("Order"), "Order");
/// ```
pub fn simple_name(qualified: &str) -> &str {
    let after_dot = qualified.rsplit('.').next().unwrap_or(qualified);
    after_dot.rsplit("::").next().unwrap_or(after_dot)
}

/// Everything before the last path segment, or `""` for unqualified names.
///
/// # Examples
///
/// ```
/// use dtoforge_core::naming::package_of;
///
/// assert_eq!(package_of("com.shop.Order"), "com.shop");
/// assert_eq!(package_of("Order"), "");
/// ```
pub fn package_of(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[..idx],
        None => "",
    }
}

/// Join a package and a simple name.
pub fn qualify(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{package}.{simple}")
    }
}

/// Rule for turning a source class name into a DTO class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConvention {
    pub prefix: String,
    pub suffix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::suffix("Dto")
    }
}

impl NamingConvention {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self::new("", suffix)
    }

    /// Apply the convention to a simple class name.
    ///
    /// # Examples
    ///
    /// ```
    /// use dtoforge_core::naming::NamingConvention;
    ///
    /// assert_eq!(NamingConvention::suffix("Dto").apply("Order"), "OrderDto");
    /// assert_eq!(NamingConvention::new("Api", "").apply("Order"), "ApiOrder");
    /// ```
    pub fn apply(&self, simple: &str) -> String {
        format!("{}{}{}", self.prefix, simple, self.suffix)
    }

    /// Whether prefix and suffix only contain Java identifier characters.
    pub fn is_valid(&self) -> bool {
        self.prefix
            .chars()
            .chain(self.suffix.chars())
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    }
}

/// Convert snake_case to camelCase.
///
/// # Examples
///
/// ```
/// use dtoforge_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("hello_world"), "helloWorld");
/// assert_eq!(to_camel_case("display_name"), "displayName");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.push_str(&c.to_uppercase().to_string());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Java field name for a source field name: lowerCamelCase.
pub fn java_field_name(source: &str) -> String {
    decapitalize(&to_camel_case(source))
}

/// Split an identifier into lowercase words.
///
/// Word boundaries are `_`, `-`, whitespace and lower-to-upper case changes.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Naming style applied to JSON property names and aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    /// Source name unchanged
    Original,
    /// `USERNAME`
    Upper,
    /// `username`
    Lower,
    /// `USER_NAME`
    UpperSnake,
    /// `userName`
    LowerCamel,
    /// `UserName`
    UpperCamel,
}

impl NameStyle {
    /// Format a source field name in this style.
    ///
    /// # Examples
    ///
    /// ```
    /// use dtoforge_core::naming::NameStyle;
    ///
    /// assert_eq!(NameStyle::UpperSnake.apply("userName"), "USER_NAME");
    /// assert_eq!(NameStyle::LowerCamel.apply("USER_NAME"), "userName");
    /// ```
    pub fn apply(&self, name: &str) -> String {
        match self {
            NameStyle::Original => name.to_string(),
            NameStyle::Upper => name.to_uppercase(),
            NameStyle::Lower => name.to_lowercase(),
            NameStyle::UpperSnake => words(name)
                .iter()
                .map(|w| w.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
            NameStyle::LowerCamel => {
                decapitalize(&words(name).iter().map(|w| capitalize(w)).collect::<String>())
            }
            NameStyle::UpperCamel => words(name).iter().map(|w| capitalize(w)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "naming/naming_tests.rs"]
mod naming_tests;
