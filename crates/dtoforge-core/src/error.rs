//! Error types for DTO generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Error type for generation operations
///
/// The first three variants form the recoverable taxonomy: they are collected
/// as diagnostics next to a (possibly partial) forest and never abort a
/// generation request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A field's declared type could not be classified
    #[error("unsupported field type `{type_name}` for {class}.{field}: {reason}")]
    UnsupportedFieldType {
        class: String,
        field: String,
        type_name: String,
        reason: String,
    },

    /// The source reader could not resolve a referenced type
    #[error("type not found: {type_name}{}", .referenced_from.as_ref().map(|r| format!(" (referenced from {r})")).unwrap_or_default())]
    TypeNotFound {
        type_name: String,
        referenced_from: Option<String>,
    },

    /// Two generated classes would share the same final qualified name
    #[error("render conflict: {qualified_name} would be generated from {}", .sources.join(", "))]
    RenderConflict {
        qualified_name: String,
        sources: Vec<String>,
    },

    /// The generation request itself is unusable
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A type catalog could not be loaded
    #[error("catalog error: {0}")]
    CatalogError(String),

    /// Source text could not be parsed
    #[error("parse error: {0}")]
    ParseError(String),
}

impl GenerationError {
    /// Returns a stable numeric code for this error kind
    pub fn error_code(&self) -> u32 {
        match self {
            GenerationError::UnsupportedFieldType { .. } => 1,
            GenerationError::TypeNotFound { .. } => 2,
            GenerationError::RenderConflict { .. } => 3,
            GenerationError::InvalidRequest(_) => 4,
            GenerationError::CatalogError(_) => 5,
            GenerationError::ParseError(_) => 6,
        }
    }

    /// Whether generation continues past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GenerationError::UnsupportedFieldType { .. }
                | GenerationError::TypeNotFound { .. }
                | GenerationError::RenderConflict { .. }
        )
    }

    /// Shorthand for a `TypeNotFound` raised by a lookup with no known referrer
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        GenerationError::TypeNotFound {
            type_name: type_name.into(),
            referenced_from: None,
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::CatalogError(err.to_string())
    }
}

impl From<toml::de::Error> for GenerationError {
    fn from(err: toml::de::Error) -> Self {
        GenerationError::CatalogError(err.to_string())
    }
}

impl From<syn::Error> for GenerationError {
    fn from(err: syn::Error) -> Self {
        GenerationError::ParseError(err.to_string())
    }
}
