//! Output sinks for rendered classes

use anyhow::{Context, Result};
use dtoforge_core::RenderedClass;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receives rendered classes in emission order
pub trait OutputSink {
    fn write(&mut self, class: &RenderedClass) -> Result<()>;
}

/// Writes `<root>/<package path>/<Class>.java`, creating directories as needed
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target file for a class
    pub fn path_for(&self, class: &RenderedClass) -> PathBuf {
        let mut path = self.root.clone();
        for segment in class.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(class.file_name());
        path
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OutputSink for DirectorySink {
    fn write(&mut self, class: &RenderedClass) -> Result<()> {
        let path = self.path_for(class);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&path, &class.source)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(path = %path.display(), class = %class.qualified_name, "Wrote class");
        self.written.push(path);
        Ok(())
    }
}

/// Writes every class to one stream, each preceded by a file-name comment
pub struct StdoutSink<W: Write = io::Stdout> {
    out: W,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for StdoutSink<W> {
    fn write(&mut self, class: &RenderedClass) -> Result<()> {
        let file_name = class.file_name();
        let path = class
            .package
            .split('.')
            .filter(|s| !s.is_empty())
            .chain(std::iter::once(file_name.as_str()))
            .collect::<Vec<_>>()
            .join("/");

        writeln!(self.out, "// {path}")?;
        self.out.write_all(class.source.as_bytes())?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
