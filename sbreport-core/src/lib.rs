//! Embeddable core library for sbreport.
//!
//! Provides a clap-free, I/O-abstracted entry point for generating one
//! report per call.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`RepoProbe`](ports::RepoProbe): inspect the source repository
//! - [`HtmlConverter`](ports::HtmlConverter): turn markup into HTML
//! - [`WritePort`](ports::WritePort): write the finished document
//!
//! Name resolution uses the domain's
//! [`MetadataResolver`](sbreport_domain::MetadataResolver).
//! The [`adapters`] module provides default implementations.
//!
//! # Entry points
//!
//! - [`run_report`](pipeline::run_report): generate and finalize a document
//! - [`write_report`](pipeline::write_report): persist a finished document

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use pipeline::{ReportError, ReportOutcome, finalize, output_name, run_report, write_report};
pub use settings::ReportSettings;

// Re-export so embedders don't need sbreport-domain directly.
pub use sbreport_domain::{InMemoryResolver, MetadataResolver, ResolvedBuildSet, WalkError, WalkStats};
