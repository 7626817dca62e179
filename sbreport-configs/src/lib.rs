//! File-backed metadata resolution.
//!
//! Build-sets (`*.bset`) and package configs (`*.cfg`) are looked up along an
//! ordered search path and parsed under a `%define` macro context. The
//! [`FsMetadataResolver`] adapts this to the domain's resolver port.

mod bset;
mod cfg;
mod error;
mod resolver;
mod search;

pub use bset::parse_build_set;
pub use cfg::parse_package;
pub use error::ConfigError;
pub use resolver::FsMetadataResolver;
pub use search::ConfigPaths;
