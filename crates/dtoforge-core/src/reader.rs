//! Source reader contract and the precomputed type catalog.
//!
//! A [`SourceReader`] supplies the structure of domain classes by qualified
//! name. The engine only ever reads through this trait; where the structure
//! comes from (a catalog file, a parsed Rust source, an IDE index) is the
//! reader's concern.
//!
//! # Catalog format
//!
//! ```toml
//! [[classes]]
//! qualified_name = "com.shop.Order"
//!
//! [[classes.fields]]
//! name = "id"
//! type = "Long"
//! required = true
//!
//! [[classes.fields]]
//! name = "items"
//! type = "List<LineItem>"
//!
//! [[enums]]
//! qualified_name = "com.shop.Status"
//! values = ["NEW", "PAID"]
//! ```
//!
//! Field constraint hints (`required`, `min_length`, `max`, `digits`, ...) sit
//! directly on the field table. The same layout is accepted as JSON.

use crate::error::{GenerationError, GenerationResult};
use crate::model::ConstraintHints;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A field as the source reader reports it, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceField {
    pub name: String,

    /// Type expression as written, e.g. `List<LineItem>` or `Option<u32>`.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(flatten)]
    pub hints: ConstraintHints,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_name: Option<String>,
}

impl SourceField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            hints: ConstraintHints::default(),
            comment: None,
            serialized_name: None,
        }
    }

    pub fn with_hints(mut self, hints: ConstraintHints) -> Self {
        self.hints = hints;
        self
    }
}

/// A class as the source reader reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceClass {
    pub qualified_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,

    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<SourceField>,
}

impl SourceClass {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            type_params: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: SourceField) -> Self {
        self.fields.push(field);
        self
    }
}

/// An enumeration and its constants in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEnum {
    pub qualified_name: String,

    #[serde(default)]
    pub values: Vec<String>,
}

/// Structural lookups against a project.
///
/// Must be deterministic for a fixed project state within one generation call.
pub trait SourceReader {
    /// Ordered field list of a class.
    ///
    /// Fails with [`GenerationError::TypeNotFound`] when the class is unknown.
    fn resolve_fields(&self, qualified_name: &str) -> GenerationResult<SourceClass>;

    /// Constants of an enumeration, or `None` if the name is not an enum.
    fn resolve_enum(&self, qualified_name: &str) -> Option<Vec<String>>;

    /// Resolve a type name as written inside class `from` to a qualified name.
    fn resolve_name(&self, name: &str, from: &str) -> Option<String>;
}

impl<R: SourceReader + ?Sized> SourceReader for &R {
    fn resolve_fields(&self, qualified_name: &str) -> GenerationResult<SourceClass> {
        (**self).resolve_fields(qualified_name)
    }

    fn resolve_enum(&self, qualified_name: &str) -> Option<Vec<String>> {
        (**self).resolve_enum(qualified_name)
    }

    fn resolve_name(&self, name: &str, from: &str) -> Option<String> {
        (**self).resolve_name(name, from)
    }
}

/// On-disk catalog layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    classes: Vec<SourceClass>,

    #[serde(default)]
    enums: Vec<SourceEnum>,
}

/// In-memory catalog of classes and enums keyed by qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCatalog {
    classes: BTreeMap<String, SourceClass>,
    enums: BTreeMap<String, Vec<String>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON.
    pub fn from_json(content: &str) -> GenerationResult<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_file_layout(file)
    }

    /// Parse a catalog from TOML.
    pub fn from_toml(content: &str) -> GenerationResult<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_file_layout(file)
    }

    /// Load a catalog file; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> GenerationResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenerationError::CatalogError(format!("failed to read {}: {e}", path.display()))
        })?;

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    fn from_file_layout(file: CatalogFile) -> GenerationResult<Self> {
        let mut catalog = Self::new();
        for class in file.classes {
            catalog.insert_class(class)?;
        }
        for source_enum in file.enums {
            catalog.insert_enum(source_enum)?;
        }
        debug!(
            classes = catalog.classes.len(),
            enums = catalog.enums.len(),
            "Loaded type catalog"
        );
        Ok(catalog)
    }

    /// Add a class. Qualified names must be unique across classes and enums.
    pub fn insert_class(&mut self, class: SourceClass) -> GenerationResult<()> {
        self.ensure_new(&class.qualified_name)?;
        self.classes.insert(class.qualified_name.clone(), class);
        Ok(())
    }

    pub fn insert_enum(&mut self, source_enum: SourceEnum) -> GenerationResult<()> {
        self.ensure_new(&source_enum.qualified_name)?;
        self.enums
            .insert(source_enum.qualified_name, source_enum.values);
        Ok(())
    }

    fn ensure_new(&self, qualified_name: &str) -> GenerationResult<()> {
        if qualified_name.is_empty() {
            return Err(GenerationError::CatalogError(
                "qualified name cannot be empty".to_string(),
            ));
        }
        if self.contains(qualified_name) {
            return Err(GenerationError::CatalogError(format!(
                "duplicate type: {qualified_name}"
            )));
        }
        Ok(())
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.classes.contains_key(qualified_name) || self.enums.contains_key(qualified_name)
    }

    /// Classes in qualified-name order.
    pub fn classes(&self) -> impl Iterator<Item = &SourceClass> {
        self.classes.values()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SourceReader for TypeCatalog {
    fn resolve_fields(&self, qualified_name: &str) -> GenerationResult<SourceClass> {
        self.classes
            .get(qualified_name)
            .cloned()
            .ok_or_else(|| GenerationError::type_not_found(qualified_name))
    }

    fn resolve_enum(&self, qualified_name: &str) -> Option<Vec<String>> {
        self.enums.get(qualified_name).cloned()
    }

    /// Exact match, then the referencing class's package, then a unique
    /// simple-name match. Rust paths (`crate::model::Order`) are matched by
    /// their last segment.
    fn resolve_name(&self, name: &str, from: &str) -> Option<String> {
        if self.contains(name) {
            return Some(name.to_string());
        }

        // A dotted name that missed the exact lookup is taken at its word
        if name.contains('.') {
            return None;
        }

        let simple = naming::simple_name(name);
        let sibling = naming::qualify(naming::package_of(from), simple);
        if self.contains(&sibling) {
            return Some(sibling);
        }

        let mut matches = self
            .classes
            .keys()
            .chain(self.enums.keys())
            .filter(|candidate| naming::simple_name(candidate) == simple);
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "reader/reader_tests.rs"]
mod reader_tests;
