//! Generate command implementation

use crate::project::ProjectFile;
use crate::sink::{DirectorySink, OutputSink, StdoutSink};
use crate::source::{Source, SourceArgs};
use anyhow::{Context, Result};
use clap::Args;
use dtoforge_core::{
    GenerationOutput, GenerationRequest, NamingConvention, ValidationNamespace, generate,
};
use std::path::PathBuf;

/// Default output directory when neither --output nor --stdout is given
const DEFAULT_OUTPUT: &str = "generated";

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Qualified name of the root type
    #[arg(short, long)]
    pub root: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Path to dtoforge.toml (default: ./dtoforge.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Prefix for generated class names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Suffix for generated class names (default: Dto)
    #[arg(long)]
    pub suffix: Option<String>,

    /// Package for all generated classes
    #[arg(long)]
    pub package: Option<String>,

    /// Generate constructors, getters and setters
    #[arg(long)]
    pub accessors: bool,

    /// Add not-null to composite fields without an explicit requirement
    #[arg(long)]
    pub not_null_defaults: bool,

    /// Use Lombok annotations instead of hand-written accessors
    #[arg(long)]
    pub lombok: bool,

    /// Use javax.validation instead of jakarta.validation
    #[arg(long)]
    pub javax: bool,

    /// @author tag for generated classes
    #[arg(long)]
    pub author: Option<String>,

    /// Output directory for generated code
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print generated code instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Exit with an error if any diagnostics were reported
    #[arg(long)]
    pub deny_diagnostics: bool,
}

/// Generate command implementation
pub fn run(args: GenerateArgs) -> Result<()> {
    let project = ProjectFile::discover(args.config.as_deref())?;
    project.validate()?;

    let request = build_request(&args, &project)?;
    let source = Source::select(&args.source, &project.source)?;
    let catalog = source.load()?;

    // Diagnostics reach stderr through the engine's `warn!` events
    let output = generate(&catalog, &request);

    if args.stdout {
        write_all(&mut StdoutSink::new(), &output)?;
    } else {
        let root = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let mut sink = DirectorySink::new(root);
        write_all(&mut sink, &output)?;

        println!(
            "{}",
            summary(sink.written().len(), &source, &sink, output.diagnostics.len())
        );
    }

    if args.deny_diagnostics && !output.diagnostics.is_empty() {
        anyhow::bail!(
            "{} diagnostic(s) reported and --deny-diagnostics is set",
            output.diagnostics.len()
        );
    }

    Ok(())
}

/// Merge project file and flags into a generation request; flags win.
pub fn build_request(args: &GenerateArgs, project: &ProjectFile) -> Result<GenerationRequest> {
    let generation = &project.generation;

    let root = args
        .root
        .clone()
        .or_else(|| generation.root.clone())
        .context("No root type given: use --root or set `root` under [generation]")?;

    let defaults = NamingConvention::default();
    let convention = NamingConvention::new(
        args.prefix
            .clone()
            .or_else(|| generation.prefix.clone())
            .unwrap_or(defaults.prefix),
        args.suffix
            .clone()
            .or_else(|| generation.suffix.clone())
            .unwrap_or(defaults.suffix),
    );

    let mut options = generation.options.clone();
    options.generate_accessors |= args.accessors;
    options.include_not_null_defaults |= args.not_null_defaults;
    options.lombok |= args.lombok;
    if args.javax {
        options.validation_namespace = ValidationNamespace::Javax;
    }
    if let Some(package) = &args.package {
        options.target_package = Some(package.clone());
    }
    if let Some(author) = &args.author {
        options.author = Some(author.clone());
    }

    let request = GenerationRequest::new(root)
        .with_convention(convention)
        .with_options(options);
    request.validate().context("Invalid generation request")?;

    Ok(request)
}

fn write_all(sink: &mut dyn OutputSink, output: &GenerationOutput) -> Result<()> {
    for class in &output.rendered {
        sink.write(class)?;
    }
    Ok(())
}

fn summary(written: usize, source: &Source, sink: &DirectorySink, diagnostics: usize) -> String {
    let mut line = format!(
        "✓ Generated {written} classes from {} into {}",
        source.describe(),
        sink.root().display()
    );
    if diagnostics > 0 {
        line.push_str(&format!(" with {diagnostics} diagnostic(s)"));
    }
    line
}
