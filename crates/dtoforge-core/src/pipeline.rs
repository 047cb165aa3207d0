//! Top-level generation entry point.

use crate::annotation::{AnnotationPolicy, DefaultAnnotationPolicy};
use crate::config::GenerationRequest;
use crate::error::GenerationError;
use crate::reader::SourceReader;
use crate::render::{JavaRenderer, RenderedClass};
use crate::synth::{DtoSynthesizer, GeneratedForest};
use tracing::{info, info_span, warn};

/// Everything one generation request produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    pub forest: GeneratedForest,

    /// Rendered sources in emission order, minus conflicting classes
    pub rendered: Vec<RenderedClass>,

    /// Recovered errors, in the order they were encountered
    pub diagnostics: Vec<GenerationError>,
}

impl GenerationOutput {
    fn rejected(err: GenerationError) -> Self {
        Self {
            diagnostics: vec![err],
            ..Default::default()
        }
    }

    /// No diagnostics were recorded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Run a request with the default annotation policy.
///
/// Never fails. An invalid request, a missing root type or unsupported fields
/// all show up in [`GenerationOutput::diagnostics`].
pub fn generate<R>(reader: &R, request: &GenerationRequest) -> GenerationOutput
where
    R: SourceReader + ?Sized,
{
    let policy = DefaultAnnotationPolicy::new(request.options.policy_options());
    generate_with_policy(reader, request, &policy)
}

/// Run a request with a caller-supplied annotation policy.
pub fn generate_with_policy<R, P>(
    reader: &R,
    request: &GenerationRequest,
    policy: &P,
) -> GenerationOutput
where
    R: SourceReader + ?Sized,
    P: AnnotationPolicy + ?Sized,
{
    let span = info_span!("generate", root = %request.root);
    let _enter = span.enter();

    if let Err(err) = request.validate() {
        warn!(code = err.error_code(), "{err}");
        return GenerationOutput::rejected(err);
    }

    let (forest, mut diagnostics) = DtoSynthesizer::new(reader, policy, &request.convention)
        .with_target_package(request.options.target_package.as_deref())
        .synthesize(&request.root);

    let (rendered, conflicts) = JavaRenderer::new(&request.options).render_forest(&forest);
    diagnostics.extend(conflicts);

    for diagnostic in &diagnostics {
        warn!(code = diagnostic.error_code(), "{diagnostic}");
    }

    info!(
        classes = forest.len(),
        rendered = rendered.len(),
        diagnostics = diagnostics.len(),
        "Generation finished"
    );

    GenerationOutput {
        forest,
        rendered,
        diagnostics,
    }
}
