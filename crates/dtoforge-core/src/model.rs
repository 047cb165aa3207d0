//! Type descriptors and class models.
//!
//! This module defines the language-neutral view of a class that every other
//! stage works on:
//!
//! - [`TypeDescriptor`]: the classified shape of one field's type
//! - [`ConstraintHints`]: validation metadata carried over from the domain field
//! - [`Field`]: a named, typed member of a class
//! - [`ClassModel`]: an ordered snapshot of a class and where it came from
//!
//! The same [`ClassModel`] type describes both source classes (as built from a
//! [`SourceReader`](crate::reader::SourceReader)) and generated DTO classes.
//! Generated fields additionally carry their resolved annotations.

use crate::annotation::Annotation;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar value kinds recognised without consulting the source reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Text,
    Char,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    BigInteger,
    Float,
    Double,
    Decimal,
    /// Legacy `java.util.Date`
    Date,
    Timestamp,
    LocalDate,
    LocalTime,
    LocalDateTime,
    Instant,
    Uuid,
}

impl PrimitiveKind {
    /// Look up a primitive by its type name.
    ///
    /// Accepts Java names (boxed and unboxed, simple or `java.*` qualified),
    /// Rust names, common chrono/uuid names and the lowercase aliases used by
    /// hand-written field tables (`string`, `decimal`, `datetime`, ...).
    pub fn from_type_name(name: &str) -> Option<Self> {
        let simple = naming::simple_name(name);
        let kind = match simple {
            "String" | "string" | "str" | "CharSequence" | "text" => PrimitiveKind::Text,
            "char" | "Character" => PrimitiveKind::Char,
            "boolean" | "Boolean" | "bool" => PrimitiveKind::Boolean,
            "byte" | "Byte" | "i8" | "u8" => PrimitiveKind::Byte,
            "short" | "Short" | "i16" | "u16" => PrimitiveKind::Short,
            "int" | "integer" | "Integer" | "i32" | "u32" => PrimitiveKind::Integer,
            "long" | "Long" | "i64" | "u64" | "isize" | "usize" => PrimitiveKind::Long,
            "BigInteger" | "biginteger" | "i128" | "u128" => PrimitiveKind::BigInteger,
            "float" | "Float" | "f32" => PrimitiveKind::Float,
            "double" | "Double" | "f64" => PrimitiveKind::Double,
            "BigDecimal" | "bigdecimal" | "decimal" | "Decimal" => PrimitiveKind::Decimal,
            "Date" | "date" => PrimitiveKind::Date,
            "Timestamp" | "timestamp" => PrimitiveKind::Timestamp,
            "LocalDate" | "localdate" | "NaiveDate" => PrimitiveKind::LocalDate,
            "LocalTime" | "localtime" | "NaiveTime" => PrimitiveKind::LocalTime,
            "LocalDateTime" | "localdatetime" | "datetime" | "NaiveDateTime" | "DateTime" => {
                PrimitiveKind::LocalDateTime
            }
            "Instant" | "SystemTime" | "OffsetDateTime" => PrimitiveKind::Instant,
            "UUID" | "Uuid" | "uuid" => PrimitiveKind::Uuid,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, PrimitiveKind::Text)
    }

    /// Whole-number kinds (eligible for min/max annotations)
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Byte
                | PrimitiveKind::Short
                | PrimitiveKind::Integer
                | PrimitiveKind::Long
                | PrimitiveKind::BigInteger
        )
    }

    /// Fractional kinds (eligible for decimal-min/decimal-max annotations)
    pub fn is_fractional(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Float | PrimitiveKind::Double | PrimitiveKind::Decimal
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integral() || self.is_fractional()
    }
}

/// Whether a collection keeps element order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Ordered,
    Unordered,
}

/// The classified shape of a field's type.
///
/// Every descriptor is finite as written; cycles only exist at the type-graph
/// level, through [`TypeDescriptor::Reference`] names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Scalar value. `name` is the type name as written in the source.
    Primitive { kind: PrimitiveKind, name: String },

    /// Named composite type, by qualified name.
    Reference { name: String },

    /// Ordered or unordered collection of elements.
    Collection {
        kind: CollectionKind,
        element: Box<TypeDescriptor>,
    },

    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },

    Array { element: Box<TypeDescriptor> },

    /// Enumeration, by qualified name, with its constants in declaration order.
    Enum { name: String, values: Vec<String> },

    /// Unresolved type parameter of the owning class.
    Generic { parameter: String },
}

impl TypeDescriptor {
    pub fn primitive(kind: PrimitiveKind, name: impl Into<String>) -> Self {
        TypeDescriptor::Primitive {
            kind,
            name: name.into(),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeDescriptor::Reference { name: name.into() }
    }

    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::Collection {
            kind: CollectionKind::Ordered,
            element: Box::new(element),
        }
    }

    pub fn set(element: TypeDescriptor) -> Self {
        TypeDescriptor::Collection {
            kind: CollectionKind::Unordered,
            element: Box::new(element),
        }
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn array(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array {
            element: Box::new(element),
        }
    }

    pub fn enumeration(name: impl Into<String>, values: Vec<String>) -> Self {
        TypeDescriptor::Enum {
            name: name.into(),
            values,
        }
    }

    pub fn generic(parameter: impl Into<String>) -> Self {
        TypeDescriptor::Generic {
            parameter: parameter.into(),
        }
    }

    /// Reference or any structural wrapper (collection, map, array).
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Reference { .. }
                | TypeDescriptor::Collection { .. }
                | TypeDescriptor::Map { .. }
                | TypeDescriptor::Array { .. }
        )
    }

    /// Collection, map or array.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Collection { .. }
                | TypeDescriptor::Map { .. }
                | TypeDescriptor::Array { .. }
        )
    }

    /// The primitive kind, if this is a bare primitive.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDescriptor::Primitive { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Every reference name reachable inside this descriptor, in written order.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            TypeDescriptor::Reference { name } => names.push(name),
            TypeDescriptor::Collection { element, .. } | TypeDescriptor::Array { element } => {
                element.collect_references(names)
            }
            TypeDescriptor::Map { key, value } => {
                key.collect_references(names);
                value.collect_references(names);
            }
            TypeDescriptor::Primitive { .. }
            | TypeDescriptor::Enum { .. }
            | TypeDescriptor::Generic { .. } => {}
        }
    }

    pub fn contains_reference(&self) -> bool {
        !self.referenced_types().is_empty()
    }

    /// Rebuild this descriptor with every reference name replaced.
    ///
    /// Wrapper structure is preserved exactly; only the leaves change.
    pub fn map_references<F>(&self, f: &mut F) -> TypeDescriptor
    where
        F: FnMut(&str) -> String,
    {
        match self {
            TypeDescriptor::Reference { name } => TypeDescriptor::reference(f(name)),
            TypeDescriptor::Collection { kind, element } => TypeDescriptor::Collection {
                kind: *kind,
                element: Box::new(element.map_references(f)),
            },
            TypeDescriptor::Map { key, value } => {
                let key = key.map_references(f);
                let value = value.map_references(f);
                TypeDescriptor::map(key, value)
            }
            TypeDescriptor::Array { element } => TypeDescriptor::array(element.map_references(f)),
            other => other.clone(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive { name, .. } => write!(f, "{name}"),
            TypeDescriptor::Reference { name } => write!(f, "{name}"),
            TypeDescriptor::Collection {
                kind: CollectionKind::Ordered,
                element,
            } => write!(f, "List<{element}>"),
            TypeDescriptor::Collection {
                kind: CollectionKind::Unordered,
                element,
            } => write!(f, "Set<{element}>"),
            TypeDescriptor::Map { key, value } => write!(f, "Map<{key}, {value}>"),
            TypeDescriptor::Array { element } => write!(f, "{element}[]"),
            TypeDescriptor::Enum { name, .. } => write!(f, "{name}"),
            TypeDescriptor::Generic { parameter } => write!(f, "{parameter}"),
        }
    }
}

/// Digit limits for exact numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitsHint {
    pub integer: u32,
    pub fraction: u32,
}

/// Validation metadata carried over from a domain field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintHints {
    /// Field must be present
    pub required: bool,

    /// Minimum length of text or element count of a container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    /// Maximum length of text or element count of a container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    /// Lower numeric bound (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    /// Upper numeric bound (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub digits: Option<DigitsHint>,

    /// Regular expression the text must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Closed set of accepted text values
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl ConstraintHints {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A named, typed member of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within its owning class.
    pub name: String,

    pub ty: TypeDescriptor,

    #[serde(default)]
    pub hints: ConstraintHints,

    /// Human-readable description from the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Wire name declared on the source field, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_name: Option<String>,

    /// Resolved validation annotations. Empty on source models.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            hints: ConstraintHints::default(),
            comment: None,
            serialized_name: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_hints(mut self, hints: ConstraintHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Where a class model came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// The class the request was made for.
    Root,

    /// First discovered through `field` of the generated class `parent`.
    Nested { parent: String, field: String },
}

/// An ordered snapshot of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    pub qualified_name: String,

    /// Declared type parameters, in order.
    #[serde(default)]
    pub type_params: Vec<String>,

    /// Fields in declaration order.
    pub fields: Vec<Field>,

    pub provenance: Provenance,
}

impl ClassModel {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            type_params: Vec::new(),
            fields: Vec::new(),
            provenance: Provenance::Root,
        }
    }

    pub fn simple_name(&self) -> &str {
        naming::simple_name(&self.qualified_name)
    }

    pub fn package(&self) -> &str {
        naming::package_of(&self.qualified_name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "model/model_tests.rs"]
mod model_tests;
