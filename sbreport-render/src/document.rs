use crate::markup::MarkupDocument;
use crate::text::TextDocument;
use sbreport_types::OutputFormat;

/// Width of plain-text rule lines.
pub const LINE_LEN: usize = 78;

/// Title block emitted once at the top of a report.
#[derive(Debug, Clone, Copy)]
pub struct Introduction<'a> {
    pub title: &'a str,
    pub author: Option<&'a str>,
    /// Already formatted generation time.
    pub generated_at: &'a str,
    pub intro: &'a [String],
    /// Root build-set the report describes.
    pub report_name: &'a str,
}

/// Format-aware primitives for accumulating a report.
///
/// The call contract is identical for every format; only the emitted
/// syntax differs. Builders are write-only until [`finish`](Self::finish)
/// consumes them.
pub trait DocumentBuilder {
    fn format(&self) -> OutputFormat;

    /// Append one raw line. Every other primitive writes through this.
    fn emit(&mut self, line: &str);

    fn introduction(&mut self, intro: &Introduction<'_>);

    fn repository_open(&mut self, caption: &str);
    fn repository_invalid(&mut self);
    fn repository_label(&mut self, label: &str);
    /// One numbered remote entry, 1-based.
    fn repository_entry(&mut self, index: usize, text: &str);
    fn repository_state(&mut self, clean: bool);
    fn repository_head(&mut self, head: &str);
    fn repository_close(&mut self);

    /// Open a build-set section. `depth` starts at 1 for the root.
    fn build_set_open(&mut self, name: &str, depth: usize);
    fn build_set_close(&mut self, name: &str, depth: usize);

    fn package_open(&mut self, name: &str, config_file: &str);
    /// A labeled metadata field. Separated fields get a block of their own.
    fn field(&mut self, label: &str, value: &str, separated: bool);
    /// Header of a numbered list, emitted even when `count` is zero.
    fn list_open(&mut self, label: &str, count: usize);
    /// One list item, 1-based.
    fn list_item(&mut self, index: usize, value: &str);
    /// A literal block; lines are passed through untouched.
    fn directive(&mut self, label: &str, lines: &[String]);
    fn package_close(&mut self, name: &str);

    /// Consume the builder and return the accumulated text.
    fn finish(self: Box<Self>) -> String;
}

/// Select the builder for `format`. HTML accumulates markup.
pub fn new_document(format: OutputFormat) -> Box<dyn DocumentBuilder> {
    match format {
        OutputFormat::Text => Box::new(TextDocument::new()),
        OutputFormat::Asciidoc | OutputFormat::Html => Box::new(MarkupDocument::new(format)),
    }
}
