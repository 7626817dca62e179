use thiserror::Error;

/// Fatal conditions raised while expanding a build-set tree.
///
/// Every variant aborts the whole report; nothing is skipped.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A member locator ends in neither the build-set nor the config suffix.
    #[error("invalid config type: {locator}")]
    InvalidConfigType { locator: String },

    /// A build-set references itself, directly or through other build-sets.
    #[error("build-set cycle: {chain}")]
    Cycle { chain: String },

    /// The resolver could not produce members or package metadata.
    #[error("resolve {name}")]
    Resolve {
        name: String,
        source: anyhow::Error,
    },
}

impl WalkError {
    /// True for failures raised by the resolver rather than by the tree shape.
    pub fn is_resolve(&self) -> bool {
        matches!(self, WalkError::Resolve { .. })
    }
}
