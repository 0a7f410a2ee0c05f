//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;

/// Source of dependency text (one `lhs->rhs` per line).
pub trait DependencySource {
    fn read_dependencies(&self) -> anyhow::Result<String>;

    /// Where the text came from, for the report. `None` for anonymous input.
    fn origin(&self) -> Option<String>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
