//! Plain-text builder: fixed-width rules, colon labels, numbered lists.

use crate::buffer::Buffer;
use crate::document::{DocumentBuilder, Introduction, LINE_LEN};
use sbreport_types::OutputFormat;

#[derive(Debug, Default)]
pub struct TextDocument {
    buf: Buffer,
}

impl TextDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn rule(&mut self, ch: &str) {
        self.emit(&ch.repeat(LINE_LEN / ch.len()));
    }
}

impl DocumentBuilder for TextDocument {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn emit(&mut self, line: &str) {
        self.buf.push(line);
    }

    fn introduction(&mut self, intro: &Introduction<'_>) {
        self.rule("=");
        self.emit(&format!("{} {}", intro.title, intro.generated_at));
        if let Some(author) = intro.author {
            self.emit(author);
        }
        if !intro.intro.is_empty() {
            self.emit("");
            for line in intro.intro {
                self.emit(line);
            }
        }
        self.rule("=");
        self.emit(&format!("Report: {}", intro.report_name));
    }

    fn repository_open(&mut self, caption: &str) {
        self.rule("-");
        self.emit(caption);
    }

    fn repository_invalid(&mut self) {
        self.emit("Not a valid git repository");
    }

    fn repository_label(&mut self, label: &str) {
        self.emit(&format!(" {}:", label));
    }

    fn repository_entry(&mut self, index: usize, text: &str) {
        self.emit(&format!("  {:2}: {}", index, text));
    }

    fn repository_state(&mut self, clean: bool) {
        if clean {
            self.emit("  Clean");
        } else {
            self.emit("  Repository is dirty");
        }
    }

    fn repository_head(&mut self, head: &str) {
        self.emit(&format!("  Commit: {}", head));
    }

    fn repository_close(&mut self) {}

    fn build_set_open(&mut self, name: &str, _depth: usize) {
        self.rule("=-");
        self.emit(&format!("Build Set: {}", name));
    }

    fn build_set_close(&mut self, _name: &str, _depth: usize) {}

    fn package_open(&mut self, name: &str, config_file: &str) {
        self.rule("-");
        self.emit(&format!("Package: {}", name));
        self.emit(&format!(" Config: {}", config_file));
    }

    fn field(&mut self, label: &str, value: &str, _separated: bool) {
        self.emit(&format!(" {}:", label));
        for line in value.lines() {
            self.emit(&format!("  {}", line));
        }
    }

    fn list_open(&mut self, label: &str, count: usize) {
        self.emit(&format!("  {}: {}", label, count));
    }

    fn list_item(&mut self, index: usize, value: &str) {
        self.emit(&format!("   {:2}: {}", index, value));
    }

    fn directive(&mut self, label: &str, lines: &[String]) {
        self.emit(&format!(" {}:", label));
        for line in lines {
            self.emit(&format!("  {}", line));
        }
    }

    fn package_close(&mut self, _name: &str) {}

    fn finish(self: Box<Self>) -> String {
        self.buf.into_string()
    }
}
