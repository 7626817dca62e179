//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use sbreport_types::RepositoryStatus;

/// Repository queries (remotes, clean/dirty, HEAD).
pub trait RepoProbe {
    /// `RepositoryStatus::Invalid` when `path` is not inside a repository.
    fn probe(&self, path: &Utf8Path) -> anyhow::Result<RepositoryStatus>;
}

/// Markup to HTML conversion.
pub trait HtmlConverter {
    fn convert(&self, markup: &str) -> anyhow::Result<String>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}
