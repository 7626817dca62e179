use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File suffix marking a build-set member.
pub const BSET_SUFFIX: &str = ".bset";

/// File suffix marking a package configuration member.
pub const CFG_SUFFIX: &str = ".cfg";

/// Target syntax of a report.
///
/// `Html` is rendered as markup and converted afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    #[serde(alias = "markup")]
    Asciidoc,
    Html,
}

impl OutputFormat {
    /// True when the document is accumulated in markup syntax.
    pub fn is_markup(self) -> bool {
        matches!(self, OutputFormat::Asciidoc | OutputFormat::Html)
    }

    /// Extension used when deriving an output file name.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text | OutputFormat::Asciidoc => "txt",
            OutputFormat::Html => "html",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Asciidoc => "asciidoc",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "asciidoc" | "markup" => Ok(OutputFormat::Asciidoc),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("invalid format: {other}")),
        }
    }
}

/// What a build-set member locator refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    BuildSet,
    Config,
}

impl MemberKind {
    /// Classify a locator by its suffix. `None` means neither suffix matched.
    pub fn classify(locator: &str) -> Option<Self> {
        if locator.ends_with(BSET_SUFFIX) {
            Some(MemberKind::BuildSet)
        } else if locator.ends_with(CFG_SUFFIX) {
            Some(MemberKind::Config)
        } else {
            None
        }
    }
}
