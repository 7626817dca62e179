use serde::{Deserialize, Serialize};

/// Snapshot of the repository a configuration tree was checked out from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RepositoryStatus {
    Invalid,
    Valid {
        /// Sorted by remote name.
        remotes: Vec<Remote>,
        clean: bool,
        head: String,
    },
}

impl RepositoryStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, RepositoryStatus::Valid { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Remote {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Remote {
    pub fn new(name: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            name: name.into(),
            url: url.map(str::to_string),
        }
    }
}
