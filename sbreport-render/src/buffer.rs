/// Append-only line buffer shared by the concrete builders.
#[derive(Debug, Default)]
pub(crate) struct Buffer {
    out: String,
}

impl Buffer {
    pub(crate) fn push(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    pub(crate) fn into_string(self) -> String {
        self.out
    }
}
