//! dtoforge-core - Engine that synthesizes validated DTO class trees
//!
//! Given a root domain class, this crate walks every type reachable from it
//! and produces a forest of data transfer classes:
//! - [`SourceReader`] supplies class structure ([`TypeCatalog`], [`RustSourceReader`])
//! - [`classify`] turns declared field types into [`TypeDescriptor`]s
//! - [`AnnotationPolicy`] maps constraint hints to validation annotations
//! - [`DtoSynthesizer`] builds the cycle-safe, deduplicated [`GeneratedForest`]
//! - [`JavaRenderer`] projects the forest into Java source text
//!
//! [`generate`] runs the whole pipeline for one [`GenerationRequest`].
//!
//! ```
//! use dtoforge_core::prelude::*;
//!
//! let catalog = TypeCatalog::from_toml(r#"
//! [[classes]]
//! qualified_name = "shop.Order"
//!
//! [[classes.fields]]
//! name = "id"
//! type = "Long"
//! required = true
//! "#).unwrap();
//!
//! let output = generate(&catalog, &GenerationRequest::new("shop.Order"));
//! assert!(output.is_clean());
//! assert!(output.rendered[0].source.contains("@NotNull"));
//! ```

pub mod annotation;
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod reader;
pub mod render;
pub mod rust_source;
pub mod synth;

pub use annotation::{
    Annotation, AnnotationKind, AnnotationPolicy, DefaultAnnotationPolicy, FieldInput,
    MessageTemplates, ParamValue, PolicyOptions,
};
pub use classify::{build_class_model, class_model_from_source};
pub use config::{GenerationOptions, GenerationRequest, ValidationNamespace};
pub use error::{GenerationError, GenerationResult};
pub use model::{
    ClassModel, CollectionKind, ConstraintHints, DigitsHint, Field, PrimitiveKind, Provenance,
    TypeDescriptor,
};
pub use naming::{NameStyle, NamingConvention};
pub use pipeline::{GenerationOutput, generate, generate_with_policy};
pub use reader::{SourceClass, SourceEnum, SourceField, SourceReader, TypeCatalog};
pub use render::{JavaRenderer, RenderedClass};
pub use rust_source::RustSourceReader;
pub use synth::{DtoSynthesizer, GeneratedClass, GeneratedForest, Signature, VisitState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnnotationPolicy, ClassModel, DefaultAnnotationPolicy, DtoSynthesizer, GeneratedForest,
        GenerationError, GenerationOptions, GenerationOutput, GenerationRequest,
        GenerationResult, JavaRenderer, NamingConvention, RenderedClass, RustSourceReader,
        SourceReader, TypeCatalog, TypeDescriptor, generate, generate_with_policy,
    };
}
