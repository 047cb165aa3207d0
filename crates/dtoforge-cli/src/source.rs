//! Source selection: type catalog or Rust source file

use crate::project::SourceSection;
use anyhow::{Context, Result};
use clap::Args;
use dtoforge_core::{RustSourceReader, TypeCatalog};
use std::path::PathBuf;
use tracing::info;

/// Source flags shared by `generate` and `check`
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// JSON or TOML type catalog
    #[arg(short, long, conflicts_with = "rust")]
    pub catalog: Option<PathBuf>,

    /// Rust source file to analyze
    #[arg(long)]
    pub rust: Option<PathBuf>,

    /// Package assigned to types parsed from --rust
    #[arg(long, requires = "rust")]
    pub rust_package: Option<String>,
}

/// The source the command line (or, failing that, the project file) names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Catalog(PathBuf),
    Rust { path: PathBuf, package: String },
}

impl Source {
    /// Command-line flags replace the project file's `[source]` table entirely.
    pub fn select(args: &SourceArgs, section: &SourceSection) -> Result<Self> {
        let from_args = args.catalog.is_some() || args.rust.is_some();
        let (catalog, rust, package) = if from_args {
            (&args.catalog, &args.rust, &args.rust_package)
        } else {
            (&section.catalog, &section.rust, &section.rust_package)
        };

        match (catalog, rust) {
            (Some(path), None) => Ok(Source::Catalog(path.clone())),
            (None, Some(path)) => Ok(Source::Rust {
                path: path.clone(),
                package: package.clone().unwrap_or_default(),
            }),
            (Some(_), Some(_)) => anyhow::bail!("Specify either a catalog or a Rust source, not both"),
            (None, None) => anyhow::bail!(
                "No source given: use --catalog, --rust or a [source] table in dtoforge.toml"
            ),
        }
    }

    /// Load the source into a type catalog.
    pub fn load(&self) -> Result<TypeCatalog> {
        let catalog = match self {
            Source::Catalog(path) => TypeCatalog::load(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
            Source::Rust { path, package } => RustSourceReader::parse_file(path, package)
                .with_context(|| format!("Failed to analyze Rust source: {}", path.display()))?
                .into_catalog(),
        };

        info!(
            classes = catalog.class_names().count(),
            enums = catalog.enum_names().count(),
            "Loaded source"
        );
        Ok(catalog)
    }

    pub fn describe(&self) -> String {
        match self {
            Source::Catalog(path) => format!("catalog {}", path.display()),
            Source::Rust { path, .. } => format!("Rust source {}", path.display()),
        }
    }
}
