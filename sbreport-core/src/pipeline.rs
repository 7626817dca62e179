//! Report driver, extracted from the CLI.
//!
//! One call generates one document: introduction, repository status, the
//! root build-set walk, then finalization. All I/O goes through the port
//! traits; nothing is written until the document is complete.

use crate::ports::{HtmlConverter, RepoProbe, WritePort};
use crate::settings::ReportSettings;
use camino::{Utf8Path, Utf8PathBuf};
use sbreport_domain::{BuildSetWalker, MetadataResolver, WalkError, WalkStats};
use sbreport_render::{Introduction, new_document, render_repository_status};
use sbreport_types::{OutputFormat, RepositoryStatus};
use tracing::{debug, info, warn};

/// `ctime(3)` layout used for the generation timestamp.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Error type for report generation. Every variant is fatal for the report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error("html converter not initialised")]
    ConverterUnavailable,

    #[error("html conversion failed: {0:#}")]
    Conversion(anyhow::Error),

    #[error("writing output file: {path}")]
    Write {
        path: Utf8PathBuf,
        source: anyhow::Error,
    },

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ReportError {
    /// Exit status for the CLI. All report failures are terminal.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// True for failures outside the expected taxonomy.
    pub fn is_internal(&self) -> bool {
        matches!(self, ReportError::Internal(_))
    }
}

/// Outcome of `run_report`.
#[derive(Debug)]
pub struct ReportOutcome {
    /// Finalized document, converted when the format is HTML.
    pub document: String,
    pub stats: WalkStats,
    pub repository: RepositoryStatus,
}

/// Generate the report for `root`.
///
/// The caller persists the document with [`write_report`]. For HTML the
/// converter must be supplied; it is checked before any generation starts
/// and invoked exactly once, after all content is accumulated.
pub fn run_report(
    settings: &ReportSettings,
    root: &str,
    resolver: &dyn MetadataResolver,
    probe: &dyn RepoProbe,
    converter: Option<&dyn HtmlConverter>,
) -> Result<ReportOutcome, ReportError> {
    if settings.format == OutputFormat::Html && converter.is_none() {
        return Err(ReportError::ConverterUnavailable);
    }

    let mut doc = new_document(settings.format);

    let generated_at = settings.generated_at.format(CTIME_FORMAT).to_string();
    doc.introduction(&Introduction {
        title: &settings.title,
        author: settings.author.as_deref(),
        generated_at: &generated_at,
        intro: &settings.intro,
        report_name: root,
    });

    let repository = match probe.probe(&settings.repo_root) {
        Ok(status) => status,
        Err(e) => {
            warn!(repo_root = %settings.repo_root, error = %format!("{e:#}"), "repository probe failed");
            RepositoryStatus::Invalid
        }
    };
    render_repository_status(doc.as_mut(), &repository);

    let walker = BuildSetWalker::new(resolver);
    let stats = walker.walk(root, &settings.macros, doc.as_mut())?;
    debug!(
        root,
        build_sets = stats.build_sets,
        packages = stats.packages,
        max_depth = stats.max_depth,
        "walk complete"
    );

    let document = finalize(doc.finish(), settings.format, converter)?;
    info!(root, format = %settings.format, bytes = document.len(), "report generated");

    Ok(ReportOutcome {
        document,
        stats,
        repository,
    })
}

/// Identity for text and markup; HTML is converted from the markup source.
pub fn finalize(
    text: String,
    format: OutputFormat,
    converter: Option<&dyn HtmlConverter>,
) -> Result<String, ReportError> {
    match format {
        OutputFormat::Text | OutputFormat::Asciidoc => Ok(text),
        OutputFormat::Html => {
            let converter = converter.ok_or(ReportError::ConverterUnavailable)?;
            converter.convert(&text).map_err(ReportError::Conversion)
        }
    }
}

/// Persist a finished document.
pub fn write_report(
    document: &str,
    path: &Utf8Path,
    writer: &dyn WritePort,
) -> Result<(), ReportError> {
    writer
        .write_file(path, document.as_bytes())
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path, "wrote report");
    Ok(())
}

/// Default output file for `name`: extension replaced by the format's,
/// path separators flattened to hyphens.
pub fn output_name(name: &str, format: OutputFormat) -> Utf8PathBuf {
    let renamed = Utf8Path::new(name).with_extension(format.extension());
    Utf8PathBuf::from(renamed.as_str().replace(['/', '\\'], "-"))
}
