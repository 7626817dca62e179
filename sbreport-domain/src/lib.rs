//! Domain logic: expand a build-set tree into a report document.
//!
//! This crate owns *what* is visited and in which order. Name resolution is
//! behind the [`MetadataResolver`] port; output syntax is the render crate's
//! concern.

mod error;
mod ports;
mod walker;

pub use error::WalkError;
pub use ports::{InMemoryResolver, MetadataResolver, ResolvedBuildSet};
pub use walker::{BuildSetWalker, WalkStats};
