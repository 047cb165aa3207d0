//! DTO synthesis.
//!
//! Walks the type graph reachable from a root class and produces one generated
//! [`ClassModel`] per distinct canonical [`Signature`]:
//!
//! 1. The root is allocated and queued.
//! 2. Each queued class has its fields copied in declaration order. Every
//!    reference inside a field's type (bare, or wrapped in a collection, map or
//!    array) is replaced by the generated name for that type, allocating and
//!    queueing a new class the first time a signature is seen.
//! 3. A class is marked [`VisitState::InProgress`] when allocated, before its
//!    own fields are expanded, so a cycle back to it reuses the existing name
//!    instead of recursing.
//!
//! Classes come out in breadth-first, first-discovered order. All state lives
//! in the returned [`GeneratedForest`]; nothing is shared across calls.

use crate::annotation::{AnnotationPolicy, FieldInput};
use crate::classify::build_class_model;
use crate::error::GenerationError;
use crate::model::{ClassModel, Field, Provenance};
use crate::naming::{self, NamingConvention};
use crate::reader::SourceReader;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Canonical deduplication key: source type plus the applied convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    pub source: String,
    pub convention: NamingConvention,
}

impl Signature {
    pub fn new(source: impl Into<String>, convention: &NamingConvention) -> Self {
        Self {
            source: source.into(),
            convention: convention.clone(),
        }
    }
}

/// Expansion state of one signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitState {
    Unvisited,
    /// Allocated and named, fields not yet (fully) expanded
    InProgress,
    Complete,
}

/// One generated DTO class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedClass {
    pub signature: Signature,

    /// The generated class; `model.qualified_name` is the DTO name.
    pub model: ClassModel,

    pub state: VisitState,
}

impl GeneratedClass {
    /// Qualified name of the source type this class was generated from.
    pub fn source_name(&self) -> &str {
        &self.signature.source
    }

    pub fn qualified_name(&self) -> &str {
        &self.model.qualified_name
    }
}

/// The classes produced for one generation request, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedForest {
    classes: Vec<GeneratedClass>,

    #[serde(skip)]
    index: HashMap<Signature, usize>,
}

impl GeneratedForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classes in breadth-first, first-discovered order.
    pub fn classes(&self) -> &[GeneratedClass] {
        &self.classes
    }

    pub fn get(&self, signature: &Signature) -> Option<&GeneratedClass> {
        self.index.get(signature).map(|&i| &self.classes[i])
    }

    /// Look up a generated class by its source type.
    pub fn by_source(&self, source: &str) -> Option<&GeneratedClass> {
        self.classes.iter().find(|c| c.source_name() == source)
    }

    /// Look up a generated class by its own qualified name.
    pub fn by_name(&self, qualified_name: &str) -> Option<&GeneratedClass> {
        self.classes
            .iter()
            .find(|c| c.qualified_name() == qualified_name)
    }

    pub fn state(&self, signature: &Signature) -> VisitState {
        self.get(signature)
            .map(|c| c.state)
            .unwrap_or(VisitState::Unvisited)
    }

    /// Generated qualified names in emission order.
    pub fn emission_order(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.qualified_name()).collect()
    }

    pub fn root(&self) -> Option<&GeneratedClass> {
        self.classes.first()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn allocate(&mut self, class: GeneratedClass) -> usize {
        let index = self.classes.len();
        self.index.insert(class.signature.clone(), index);
        self.classes.push(class);
        index
    }
}

/// Builds the generated forest for a root class.
pub struct DtoSynthesizer<'a, R: ?Sized, P: ?Sized> {
    reader: &'a R,
    policy: &'a P,
    convention: &'a NamingConvention,
    target_package: Option<&'a str>,
}

impl<'a, R, P> DtoSynthesizer<'a, R, P>
where
    R: SourceReader + ?Sized,
    P: AnnotationPolicy + ?Sized,
{
    pub fn new(reader: &'a R, policy: &'a P, convention: &'a NamingConvention) -> Self {
        Self {
            reader,
            policy,
            convention,
            target_package: None,
        }
    }

    /// Place every generated class in `package` instead of its source package.
    pub fn with_target_package(mut self, package: Option<&'a str>) -> Self {
        self.target_package = package;
        self
    }

    /// Generated qualified name for a source type.
    pub fn generated_name(&self, source: &str) -> String {
        let package = self
            .target_package
            .unwrap_or_else(|| naming::package_of(source));
        naming::qualify(package, &self.convention.apply(naming::simple_name(source)))
    }

    /// Synthesize the forest for `root`.
    ///
    /// Never fails: unresolvable types and unsupported fields are returned as
    /// diagnostics next to whatever could be generated.
    pub fn synthesize(&self, root: &str) -> (GeneratedForest, Vec<GenerationError>) {
        let mut walk = Walk {
            forest: GeneratedForest::new(),
            queue: VecDeque::new(),
            diagnostics: Vec::new(),
        };

        let (root_model, root_diagnostics) = match build_class_model(self.reader, root) {
            Ok(built) => built,
            Err(err) => {
                walk.diagnostics.push(err);
                return (walk.forest, walk.diagnostics);
            }
        };
        walk.diagnostics.extend(root_diagnostics);

        let index = self.allocate(
            &mut walk,
            &root_model,
            Provenance::Root,
            VisitState::InProgress,
        );
        walk.queue.push_back((index, root_model));

        while let Some((index, source)) = walk.queue.pop_front() {
            self.expand(&mut walk, index, &source);
        }

        (walk.forest, walk.diagnostics)
    }

    /// Copy the fields of `source` into generated class `index`.
    fn expand(&self, walk: &mut Walk, index: usize, source: &ClassModel) {
        let parent = walk.forest.classes[index].model.qualified_name.clone();

        for field in &source.fields {
            let ty = field
                .ty
                .map_references(&mut |name| self.resolve(walk, name, &parent, &field.name));

            let input = FieldInput {
                name: &field.name,
                ty: &field.ty,
                hints: &field.hints,
                comment: field.comment.as_deref(),
            };
            let annotations = self.policy.annotate(&input);

            walk.forest.classes[index].model.fields.push(Field {
                name: field.name.clone(),
                ty,
                hints: field.hints.clone(),
                comment: field.comment.clone(),
                serialized_name: field.serialized_name.clone(),
                annotations,
            });
        }

        walk.forest.classes[index].state = VisitState::Complete;
    }

    /// Generated name for a referenced source type, allocating on first sight.
    fn resolve(&self, walk: &mut Walk, source: &str, parent: &str, field: &str) -> String {
        let signature = Signature::new(source, self.convention);
        if let Some(existing) = walk.forest.get(&signature) {
            debug!(
                source,
                generated = %existing.model.qualified_name,
                state = ?existing.state,
                "Reusing generated class"
            );
            return existing.model.qualified_name.clone();
        }

        let provenance = Provenance::Nested {
            parent: parent.to_string(),
            field: field.to_string(),
        };

        match build_class_model(self.reader, source) {
            Ok((model, diagnostics)) => {
                walk.diagnostics.extend(diagnostics);
                let index = self.allocate(walk, &model, provenance, VisitState::InProgress);
                let name = walk.forest.classes[index].model.qualified_name.clone();
                walk.queue.push_back((index, model));
                name
            }
            Err(err) => {
                // Treated as a type with no resolvable substructure
                walk.diagnostics.push(match err {
                    GenerationError::TypeNotFound { type_name, .. } => {
                        GenerationError::TypeNotFound {
                            type_name,
                            referenced_from: Some(format!("{parent}.{field}")),
                        }
                    }
                    other => other,
                });
                let empty = ClassModel::new(source);
                let index = self.allocate(walk, &empty, provenance, VisitState::Complete);
                walk.forest.classes[index].model.qualified_name.clone()
            }
        }
    }

    fn allocate(
        &self,
        walk: &mut Walk,
        source: &ClassModel,
        provenance: Provenance,
        state: VisitState,
    ) -> usize {
        let name = self.generated_name(&source.qualified_name);
        debug!(source = %source.qualified_name, generated = %name, "Allocated generated class");

        let mut model = ClassModel::new(name);
        model.type_params = source.type_params.clone();
        model.provenance = provenance;

        walk.forest.allocate(GeneratedClass {
            signature: Signature::new(&source.qualified_name, self.convention),
            model,
            state,
        })
    }
}

/// Per-call traversal state.
struct Walk {
    forest: GeneratedForest,
    queue: VecDeque<(usize, ClassModel)>,
    diagnostics: Vec<GenerationError>,
}
