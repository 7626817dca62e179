use serde::{Deserialize, Serialize};

/// One resolved package configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,

    /// Path of the config file the package was resolved from.
    pub config_file: String,

    #[serde(default)]
    pub info: PackageInfo,

    #[serde(default)]
    pub sources: Vec<SourceRef>,

    #[serde(default)]
    pub patches: Vec<SourceRef>,

    #[serde(default)]
    pub directives: Directives,
}

impl Package {
    pub fn new(name: impl Into<String>, config_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_file: config_file.into(),
            ..Self::default()
        }
    }
}

/// Optional metadata fields, each absent or a short text value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buildarch: Option<String>,
}

/// A source or patch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Tag the entry was declared with, e.g. `source0` or `patch1`.
    pub tag: String,
    pub locator: String,
}

impl SourceRef {
    pub fn new(tag: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            locator: locator.into(),
        }
    }
}

/// The four build stages. Each is absent or a list of literal command lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directives {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean: Option<Vec<String>>,
}
