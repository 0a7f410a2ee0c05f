//! Default filesystem-backed port implementations.

use crate::ports::{DependencySource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::io::Read;
use tracing::debug;

/// Reads dependency text from a file.
#[derive(Debug, Clone)]
pub struct FsDependencySource {
    pub path: Utf8PathBuf,
}

impl FsDependencySource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl DependencySource for FsDependencySource {
    fn read_dependencies(&self) -> anyhow::Result<String> {
        debug!(path = %self.path, "reading dependencies");
        fs::read_to_string(&self.path).with_context(|| format!("read {}", self.path))
    }

    fn origin(&self) -> Option<String> {
        Some(self.path.to_string())
    }
}

/// Reads dependency text from standard input.
#[derive(Debug, Clone, Default)]
pub struct StdinDependencySource;

impl DependencySource for StdinDependencySource {
    fn read_dependencies(&self) -> anyhow::Result<String> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read dependencies from stdin")?;
        Ok(text)
    }

    fn origin(&self) -> Option<String> {
        Some("<stdin>".to_string())
    }
}

/// In-memory dependency text for embedding and testing.
#[derive(Debug, Clone)]
pub struct InlineDependencySource {
    text: String,
}

impl InlineDependencySource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DependencySource for InlineDependencySource {
    fn read_dependencies(&self) -> anyhow::Result<String> {
        Ok(self.text.clone())
    }

    fn origin(&self) -> Option<String> {
        None
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
