use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config file not found: {name}")]
    NotFound { name: String },

    #[error("{path}:{line}: {message}")]
    Parse {
        path: Utf8PathBuf,
        line: usize,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn parse(path: &camino::Utf8Path, line: usize, message: impl Into<String>) -> Self {
        ConfigError::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}
