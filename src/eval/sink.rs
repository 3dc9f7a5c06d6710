//! Print sink for configurable output.
//!
//! `Print` output is directed through a sink supplied by the caller:
//! stdout for the CLI, a buffer for tests. Enum dispatch keeps this
//! frequently-used path free of vtable indirection.

/// Destination for `Print` output.
pub enum PrintSink {
    /// Writes each line to stdout (default for the CLI).
    Stdout,
    /// Captures lines in a buffer (tests and embedding).
    Buffer(String),
}

impl PrintSink {
    /// Create a capturing sink.
    pub fn buffer() -> Self {
        PrintSink::Buffer(String::new())
    }

    /// Emit one line of output.
    pub fn println(&mut self, line: &str) {
        match self {
            PrintSink::Stdout => println!("{line}"),
            PrintSink::Buffer(buf) => {
                buf.push_str(line);
                buf.push('\n');
            }
        }
    }

    /// Get captured output. Empty for non-capturing sinks.
    pub fn output(&self) -> &str {
        match self {
            PrintSink::Stdout => "",
            PrintSink::Buffer(buf) => buf,
        }
    }
}

impl Default for PrintSink {
    fn default() -> Self {
        PrintSink::Stdout
    }
}
