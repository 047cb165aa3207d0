//! Source reader backed by a static analysis pass over Rust source.
//!
//! Parses a Rust file with [`syn`] and exposes its domain types through the
//! [`SourceReader`] contract:
//!
//! - Structs with named fields (and unit structs) become classes, with their
//!   generic type parameters as declared type parameters
//! - Field-less enums become enumerations
//! - Tuple structs and data-carrying enums are skipped
//!
//! Field metadata is read from attributes:
//!
//! - Doc comments (`///`) become the field comment
//! - `#[serde(rename = "...")]` becomes the serialized name; `#[serde(skip)]`
//!   drops the field
//! - `#[validate(...)]` or `#[dto(...)]` with `required`, `length(min, max,
//!   equal)`, `range(min, max)`, `digits(integer, fraction)`,
//!   `pattern = "..."` and `one_of("A", "B")` become constraint hints
//!
//! # Example
//!
//! ```rust
//! use dtoforge_core::reader::SourceReader;
//! use dtoforge_core::rust_source::RustSourceReader;
//!
//! let reader = RustSourceReader::parse_source(
//!     r#"
//!     pub struct Customer {
//!         /// Full name.
//!         #[validate(required, length(max = 80))]
//!         pub name: String,
//!     }
//!     "#,
//!     "com.shop",
//! )
//! .unwrap();
//!
//! let customer = reader.resolve_fields("com.shop.Customer").unwrap();
//! assert_eq!(customer.fields[0].comment.as_deref(), Some("Full name."));
//! assert_eq!(customer.fields[0].hints.max_length, Some(80));
//! ```

use crate::error::{GenerationError, GenerationResult};
use crate::model::{ConstraintHints, DigitsHint};
use crate::naming;
use crate::reader::{SourceClass, SourceEnum, SourceField, SourceReader, TypeCatalog};
use quote::ToTokens;
use std::path::Path;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Fields, Lit, LitStr, Meta, Token, UnOp};
use tracing::debug;

/// Reader over the types declared in one Rust source file.
#[derive(Debug, Clone)]
pub struct RustSourceReader {
    catalog: TypeCatalog,
}

impl RustSourceReader {
    /// Parse a Rust source file, placing its types in `package`.
    pub fn parse_file(path: &Path, package: &str) -> GenerationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenerationError::ParseError(format!("failed to read {}: {e}", path.display()))
        })?;

        Self::parse_source(&content, package)
    }

    /// Parse Rust source code, placing its types in `package`.
    pub fn parse_source(source: &str, package: &str) -> GenerationResult<Self> {
        let file = syn::parse_file(source)?;

        let mut catalog = TypeCatalog::new();
        collect_items(&file.items, package, &mut catalog)?;

        debug!(package, types = catalog.len(), "Parsed Rust source");
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> TypeCatalog {
        self.catalog
    }
}

impl SourceReader for RustSourceReader {
    fn resolve_fields(&self, qualified_name: &str) -> GenerationResult<SourceClass> {
        self.catalog.resolve_fields(qualified_name)
    }

    fn resolve_enum(&self, qualified_name: &str) -> Option<Vec<String>> {
        self.catalog.resolve_enum(qualified_name)
    }

    fn resolve_name(&self, name: &str, from: &str) -> Option<String> {
        self.catalog.resolve_name(name, from)
    }
}

/// Walk items, descending into inline modules.
fn collect_items(
    items: &[syn::Item],
    package: &str,
    catalog: &mut TypeCatalog,
) -> GenerationResult<()> {
    for item in items {
        match item {
            syn::Item::Struct(s) => {
                if let Some(class) = class_from_struct(s, package)? {
                    catalog.insert_class(class)?;
                }
            }
            syn::Item::Enum(e) => {
                if let Some(source_enum) = enum_from_item(e, package) {
                    catalog.insert_enum(source_enum)?;
                }
            }
            syn::Item::Mod(m) => {
                if let Some((_, items)) = &m.content {
                    collect_items(items, package, catalog)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn class_from_struct(
    s: &syn::ItemStruct,
    package: &str,
) -> GenerationResult<Option<SourceClass>> {
    let mut class = SourceClass::new(naming::qualify(package, &s.ident.to_string()));
    class.type_params = s
        .generics
        .type_params()
        .map(|param| param.ident.to_string())
        .collect();

    match &s.fields {
        Fields::Named(named) => {
            for field in &named.named {
                if let Some(source_field) = source_field(field)? {
                    class.fields.push(source_field);
                }
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(_) => {
            debug!(name = %s.ident, "Skipping tuple struct");
            return Ok(None);
        }
    }

    Ok(Some(class))
}

fn enum_from_item(e: &syn::ItemEnum, package: &str) -> Option<SourceEnum> {
    if e.variants.iter().any(|v| !matches!(v.fields, Fields::Unit)) {
        debug!(name = %e.ident, "Skipping data-carrying enum");
        return None;
    }

    Some(SourceEnum {
        qualified_name: naming::qualify(package, &e.ident.to_string()),
        values: e.variants.iter().map(|v| v.ident.to_string()).collect(),
    })
}

/// Serde attributes relevant to a field.
#[derive(Debug, Default)]
struct SerdeAttrs {
    rename: Option<String>,
    skip: bool,
}

fn source_field(field: &syn::Field) -> GenerationResult<Option<SourceField>> {
    let Some(ident) = &field.ident else {
        return Ok(None);
    };

    let mut serde_attrs = SerdeAttrs::default();
    let mut hints = ConstraintHints::default();
    for attr in &field.attrs {
        if attr.path().is_ident("serde") {
            parse_serde(attr, &mut serde_attrs)?;
        } else if attr.path().is_ident("validate") || attr.path().is_ident("dto") {
            parse_constraints(attr, &mut hints)?;
        }
    }

    if serde_attrs.skip {
        return Ok(None);
    }

    let docs = extract_docs(&field.attrs);
    Ok(Some(SourceField {
        name: ident.unraw().to_string(),
        type_name: field.ty.to_token_stream().to_string(),
        hints,
        comment: (!docs.is_empty()).then(|| docs.join(" ")),
        serialized_name: serde_attrs.rename,
    }))
}

/// Extract documentation comments from attributes.
fn extract_docs(attrs: &[Attribute]) -> Vec<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let Expr::Lit(expr_lit) = &meta.value {
                if let Lit::Str(lit_str) = &expr_lit.lit {
                    let doc = lit_str.value();
                    let doc = doc.trim();
                    if !doc.is_empty() {
                        docs.push(doc.to_string());
                    }
                }
            }
        }
    }

    docs
}

fn parse_serde(attr: &Attribute, out: &mut SerdeAttrs) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("rename") {
            if meta.input.peek(Token![=]) {
                let name: LitStr = meta.value()?.parse()?;
                out.rename = Some(name.value());
            } else {
                // rename(serialize = "...", deserialize = "...")
                meta.parse_nested_meta(|inner| {
                    if inner.path.is_ident("serialize") {
                        let name: LitStr = inner.value()?.parse()?;
                        out.rename = Some(name.value());
                    } else {
                        skip_value(&inner)?;
                    }
                    Ok(())
                })?;
            }
        } else if meta.path.is_ident("skip") {
            out.skip = true;
        } else {
            skip_value(&meta)?;
        }
        Ok(())
    })
}

fn parse_constraints(attr: &Attribute, hints: &mut ConstraintHints) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("required") {
            hints.required = true;
        } else if meta.path.is_ident("length") {
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("min") {
                    hints.min_length = unsigned_value(&inner)?;
                } else if inner.path.is_ident("max") {
                    hints.max_length = unsigned_value(&inner)?;
                } else if inner.path.is_ident("equal") {
                    let value = unsigned_value(&inner)?;
                    hints.min_length = value;
                    hints.max_length = value;
                } else {
                    skip_value(&inner)?;
                }
                Ok(())
            })?;
        } else if meta.path.is_ident("range") {
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("min") {
                    hints.min = int_value(&inner)?;
                } else if inner.path.is_ident("max") {
                    hints.max = int_value(&inner)?;
                } else {
                    skip_value(&inner)?;
                }
                Ok(())
            })?;
        } else if meta.path.is_ident("digits") {
            let mut integer = None;
            let mut fraction = None;
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("integer") {
                    integer = int_value(&inner)?.and_then(|v| u32::try_from(v).ok());
                } else if inner.path.is_ident("fraction") {
                    fraction = int_value(&inner)?.and_then(|v| u32::try_from(v).ok());
                } else {
                    skip_value(&inner)?;
                }
                Ok(())
            })?;
            hints.digits = integer.map(|integer| DigitsHint {
                integer,
                fraction: fraction.unwrap_or(0),
            });
        } else if meta.path.is_ident("pattern") {
            let pattern: LitStr = meta.value()?.parse()?;
            hints.pattern = Some(pattern.value());
        } else if meta.path.is_ident("one_of") {
            let content;
            syn::parenthesized!(content in meta.input);
            let values = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            hints.allowed_values = values.iter().map(LitStr::value).collect();
        } else {
            skip_value(&meta)?;
        }
        Ok(())
    })
}

/// Consume `= expr` or `(...)` after an attribute key this reader ignores.
fn skip_value(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// `key = <integer literal>`; non-integer expressions yield `None`.
fn int_value(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<i64>> {
    let expr: Expr = meta.value()?.parse()?;
    Ok(int_literal(&expr))
}

fn unsigned_value(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<u64>> {
    Ok(int_value(meta)?.and_then(|v| u64::try_from(v).ok()))
}

fn int_literal(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int.base10_parse().ok(),
            _ => None,
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
            int_literal(&unary.expr).and_then(i64::checked_neg)
        }
        _ => None,
    }
}
