//! Check command implementation

use crate::project::ProjectFile;
use crate::source::{Source, SourceArgs};
use anyhow::Result;
use clap::Args;
use dtoforge_core::{GenerationError, TypeCatalog, class_model_from_source};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Path to dtoforge.toml (default: ./dtoforge.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Check command implementation
pub fn run(args: CheckArgs) -> Result<()> {
    let project = ProjectFile::discover(args.config.as_deref())?;
    project.validate()?;

    let source = Source::select(&args.source, &project.source)?;
    println!("Checking {}", source.describe());

    let catalog = source.load()?;
    let diagnostics = check_catalog(&catalog);

    println!("✓ Classes: {}", catalog.class_names().count());
    println!("✓ Enums: {}", catalog.enum_names().count());

    if !diagnostics.is_empty() {
        eprint!("{}", format_report(&diagnostics));
        anyhow::bail!("{} problem(s) found", diagnostics.len());
    }

    println!("\nSource is valid!");
    Ok(())
}

/// Classify every class and flag references that leave the catalog.
pub fn check_catalog(catalog: &TypeCatalog) -> Vec<GenerationError> {
    let mut diagnostics = Vec::new();

    for class in catalog.classes() {
        let (model, class_diagnostics) = class_model_from_source(catalog, class);
        diagnostics.extend(class_diagnostics);

        for field in &model.fields {
            for name in field.ty.referenced_types() {
                if !catalog.contains(name) {
                    diagnostics.push(GenerationError::TypeNotFound {
                        type_name: name.to_string(),
                        referenced_from: Some(format!("{}.{}", model.qualified_name, field.name)),
                    });
                }
            }
        }
    }

    diagnostics
}

/// One `warning[Ennn]: ...` line per diagnostic.
pub fn format_report(diagnostics: &[GenerationError]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("warning[E{:03}]: {d}\n", d.error_code()))
        .collect()
}
