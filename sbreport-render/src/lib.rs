//! Rendering for human-readable build-set reports.
//!
//! A report is accumulated through the [`DocumentBuilder`] capability set.
//! Two builders implement it: [`TextDocument`] for plain text and
//! [`MarkupDocument`] for AsciiDoc (which is also the source syntax for
//! HTML output). Callers never branch on the format; they pick a builder
//! once with [`new_document`] and drive it through the same calls.

mod buffer;
mod document;
mod markup;
mod package;
mod repository;
mod text;

pub use document::{DocumentBuilder, Introduction, LINE_LEN, new_document};
pub use markup::MarkupDocument;
pub use package::render_package;
pub use repository::{REPOSITORY_CAPTION, render_repository_status};
pub use text::TextDocument;
