//! Configuration file loading for sbreport.
//!
//! Discovers and loads `sbreport.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use sbreport_types::Macros;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "sbreport.toml";

/// Search path used when neither the file nor the CLI names one.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Converter program used when the file does not name one.
pub const DEFAULT_ASCIIDOCTOR: &str = "asciidoctor";

/// Top-level configuration from sbreport.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SbreportConfig {
    /// Directories searched for build-sets and configs, in order.
    pub config_dirs: Vec<Utf8PathBuf>,

    /// Report title.
    pub title: Option<String>,

    /// Author line for the introduction.
    pub author: Option<String>,

    /// Introductory paragraph, one entry per line.
    pub intro: Vec<String>,

    /// Program used to convert AsciiDoc to HTML.
    pub asciidoctor: Option<String>,

    /// Macros the root build-set is resolved under.
    pub macros: Macros,
}

/// Discover the sbreport.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a sbreport.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<SbreportConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<SbreportConfig> {
    let config: SbreportConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<SbreportConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(SbreportConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// CLI directories first, then the file's, then the default when both are empty.
    pub config_dirs: Vec<Utf8PathBuf>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub intro: Vec<String>,
    pub asciidoctor: String,
    /// File macros with CLI definitions layered on top.
    pub macros: Macros,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: SbreportConfig,
}

impl ConfigMerger {
    pub fn new(config: SbreportConfig) -> Self {
        Self { config }
    }

    /// CLI `--config-dir` entries are prepended to the file's search path;
    /// CLI `--define` entries override the file's `[macros]`.
    pub fn merge(self, cli_dirs: &[Utf8PathBuf], cli_defines: &Macros) -> MergedConfig {
        let mut config_dirs = cli_dirs.to_vec();
        for dir in self.config.config_dirs {
            if !config_dirs.contains(&dir) {
                config_dirs.push(dir);
            }
        }
        if config_dirs.is_empty() {
            config_dirs.push(Utf8PathBuf::from(DEFAULT_CONFIG_DIR));
        }

        MergedConfig {
            config_dirs,
            title: self.config.title,
            author: self.config.author,
            intro: self.config.intro,
            asciidoctor: self
                .config
                .asciidoctor
                .unwrap_or_else(|| DEFAULT_ASCIIDOCTOR.to_string()),
            macros: self.config.macros.overlay(cli_defines),
        }
    }
}

/// Parse `--define` entries from key=value strings.
pub fn parse_defines(defines: &[String]) -> anyhow::Result<Macros> {
    let mut out = Macros::new();
    for entry in defines {
        let mut parts = entry.splitn(2, '=');
        let key = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid define '{}': missing name", entry))?;
        let value = parts
            .next()
            .map(str::trim)
            .ok_or_else(|| anyhow::anyhow!("invalid define '{}': missing '='", entry))?;
        out.define(key, value);
    }
    Ok(out)
}
