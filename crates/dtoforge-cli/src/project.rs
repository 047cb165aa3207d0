//! dtoforge.toml project file parsing

use anyhow::{Context, Result};
use dtoforge_core::GenerationOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default project file name, looked up in the working directory
pub const PROJECT_FILE: &str = "dtoforge.toml";

/// dtoforge.toml structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub source: SourceSection,

    #[serde(default)]
    pub generation: GenerationSection,
}

/// Where domain types come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSection {
    /// JSON or TOML type catalog
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Rust source file
    #[serde(default)]
    pub rust: Option<PathBuf>,

    /// Package assigned to types parsed from `rust`
    #[serde(default)]
    pub rust_package: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationSection {
    #[serde(default)]
    pub root: Option<String>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub suffix: Option<String>,

    #[serde(flatten)]
    pub options: GenerationOptions,
}

impl ProjectFile {
    /// Load a project file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read project file: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse a project file from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse project file")
    }

    /// Load `path` if given, else `dtoforge.toml` if present, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(PROJECT_FILE).is_file() => Self::from_file(PROJECT_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Validate the project file
    pub fn validate(&self) -> Result<()> {
        if self.source.catalog.is_some() && self.source.rust.is_some() {
            anyhow::bail!("[source] may set either `catalog` or `rust`, not both");
        }

        if let Some(root) = &self.generation.root {
            if root.trim().is_empty() {
                anyhow::bail!("[generation] root cannot be empty");
            }
        }

        Ok(())
    }
}
