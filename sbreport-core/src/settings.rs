//! Clap-free settings for the report pipeline.

use camino::Utf8PathBuf;
use chrono::{DateTime, Local};
use sbreport_types::{Macros, OutputFormat};

pub const DEFAULT_TITLE: &str = "Source Builder Report";

/// Settings for one report.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub format: OutputFormat,
    /// Directory handed to the repository probe.
    pub repo_root: Utf8PathBuf,

    // Introduction
    pub title: String,
    pub author: Option<String>,
    pub intro: Vec<String>,
    pub generated_at: DateTime<Local>,

    /// Context the root build-set is resolved under.
    pub macros: Macros,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            repo_root: Utf8PathBuf::from("."),
            title: DEFAULT_TITLE.to_string(),
            author: None,
            intro: Vec::new(),
            generated_at: Local::now(),
            macros: Macros::new(),
        }
    }
}
