//! Shared value types for the sbreport workspace.
//!
//! # Design constraints
//! - Everything here is produced by a resolver or probe and then only read.
//! - No rendering or I/O lives in this crate.

pub mod format;
pub mod macros;
pub mod package;
pub mod repo;

pub use format::{MemberKind, OutputFormat, BSET_SUFFIX, CFG_SUFFIX};
pub use macros::{ExpansionTooLong, MAX_EXPANDED_LEN, Macros};
pub use package::{Directives, Package, PackageInfo, SourceRef};
pub use repo::{Remote, RepositoryStatus};
