//! AsciiDoc builder. Also the source syntax for HTML output.

use crate::buffer::Buffer;
use crate::document::{DocumentBuilder, Introduction};
use sbreport_types::OutputFormat;

const LISTING_DELIMITER: &str = "--------------------------------------------";
const HORIZONTAL_RULE: &str = "'''";

#[derive(Debug)]
pub struct MarkupDocument {
    format: OutputFormat,
    buf: Buffer,
    /// Set while a package section is open inside the current build-set.
    package_active: bool,
}

impl MarkupDocument {
    /// `format` is `Asciidoc` or `Html`; both accumulate the same markup.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            buf: Buffer::default(),
            package_active: false,
        }
    }

    fn separator(&mut self) {
        self.emit("");
        self.emit(HORIZONTAL_RULE);
        self.emit("");
    }
}

impl DocumentBuilder for MarkupDocument {
    fn format(&self) -> OutputFormat {
        self.format
    }

    fn emit(&mut self, line: &str) {
        self.buf.push(line);
    }

    fn introduction(&mut self, intro: &Introduction<'_>) {
        self.emit(intro.title);
        self.emit(&"=".repeat(intro.title.chars().count()));
        for attr in [
            ":doctype: book",
            ":toc2:",
            ":toclevels: 5",
            ":icons:",
            ":numbered:",
            ":data-uri:",
        ] {
            self.emit(attr);
        }
        self.emit("");
        if let Some(author) = intro.author {
            self.emit(author);
        }
        self.emit(intro.generated_at);
        self.emit("");
        for line in intro.intro {
            self.emit(line);
        }
    }

    fn repository_open(&mut self, caption: &str) {
        self.separator();
        self.emit(&format!(".{}", caption));
    }

    fn repository_invalid(&mut self) {
        self.emit("_Not a valid git repository_");
    }

    fn repository_label(&mut self, label: &str) {
        self.emit(&format!("*{}*:;;", label));
    }

    fn repository_entry(&mut self, _index: usize, text: &str) {
        self.emit(&format!(". {}", text));
    }

    fn repository_state(&mut self, clean: bool) {
        if clean {
            self.emit("Clean");
        } else {
            self.emit("_Repository is dirty_");
        }
    }

    fn repository_head(&mut self, head: &str) {
        self.emit(&format!("Commit: {}", head));
    }

    fn repository_close(&mut self) {
        self.separator();
    }

    fn build_set_open(&mut self, name: &str, depth: usize) {
        self.emit(&format!("={} {}", "=".repeat(depth), name));
    }

    fn build_set_close(&mut self, _name: &str, _depth: usize) {
        self.package_active = false;
    }

    fn package_open(&mut self, name: &str, config_file: &str) {
        self.package_active = true;
        self.emit(&format!("*Package*: _{}_ +", name));
        self.emit(&format!("*Config*: {}", config_file));
        self.emit("");
    }

    fn field(&mut self, label: &str, value: &str, separated: bool) {
        if separated {
            self.emit(&format!("*{}:*::", label));
            self.emit("");
            for line in value.lines() {
                self.emit(line);
            }
            self.emit("");
        } else {
            self.emit(&format!("*{}:* ", label));
            for line in value.lines() {
                self.emit(&format!("{} +", line));
            }
        }
    }

    fn list_open(&mut self, label: &str, count: usize) {
        self.emit("");
        self.emit(&format!("*{}:*::", label));
        if count == 0 {
            self.emit(&format!("No {}", label.to_lowercase()));
        }
    }

    fn list_item(&mut self, _index: usize, value: &str) {
        self.emit(&format!(". {}", value));
    }

    fn directive(&mut self, label: &str, lines: &[String]) {
        self.emit("");
        self.emit(&format!("*{}*:", label));
        self.emit(LISTING_DELIMITER);
        for line in lines {
            self.emit(line);
        }
        self.emit(LISTING_DELIMITER);
    }

    fn package_close(&mut self, _name: &str) {
        if self.package_active {
            self.separator();
        }
    }

    fn finish(self: Box<Self>) -> String {
        self.buf.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc() -> Box<MarkupDocument> {
        Box::new(MarkupDocument::new(OutputFormat::Asciidoc))
    }

    #[test]
    fn heading_weight_follows_depth() {
        let mut d = doc();
        d.build_set_open("root", 1);
        d.build_set_open("nested", 2);
        d.build_set_open("deeper", 3);
        assert_eq!(d.finish(), "== root\n=== nested\n==== deeper\n");
    }

    #[test]
    fn empty_list_says_so() {
        let mut d = doc();
        d.list_open("Patches", 0);
        assert_eq!(d.finish(), "\n*Patches:*::\nNo patches\n");
    }

    #[test]
    fn inline_and_separated_fields() {
        let mut d = doc();
        d.field("Summary", "GNU compiler", true);
        d.field("URL", "http://gcc.gnu.org", false);
        assert_eq!(
            d.finish(),
            "*Summary:*::\n\nGNU compiler\n\n*URL:* \nhttp://gcc.gnu.org +\n"
        );
    }

    #[test]
    fn directive_lines_are_verbatim() {
        let mut d = doc();
        d.directive("Build", &["  make -j%{jobs} \\".to_string(), "\tinstall".to_string()]);
        let out = d.finish();
        assert!(out.contains("\n  make -j%{jobs} \\\n\tinstall\n"));
        assert_eq!(out.matches(LISTING_DELIMITER).count(), 2);
    }

    #[test]
    fn separator_only_while_package_active() {
        let mut d = doc();
        d.package_close("stray");
        assert_eq!(d.finish(), "");

        let mut d = doc();
        d.package_open("gcc", "gcc.cfg");
        d.package_close("gcc");
        assert!(d.finish().ends_with("\n'''\n\n"));
    }
}
