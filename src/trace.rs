//! Per-request diagnostic trace.
//!
//! When a caller asks for debug output, every step of parsing a phrase is
//! recorded here and returned alongside the result. A disabled trace drops
//! entries without formatting them.

/// Ordered diagnostic lines for one request
#[derive(Debug, Clone, Default)]
pub struct Trace {
    enabled: bool,
    lines: Vec<String>,
}

impl Trace {
    /// Create a trace that records entries
    pub fn enabled() -> Self {
        Trace {
            enabled: true,
            lines: Vec::new(),
        }
    }

    /// Create a trace that discards entries
    pub fn disabled() -> Self {
        Trace::default()
    }

    /// Whether entries are being recorded
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a line
    pub fn push(&mut self, line: impl Into<String>) {
        if self.enabled {
            self.lines.push(line.into());
        }
    }

    /// Record a lazily formatted line
    pub fn push_with(&mut self, line: impl FnOnce() -> String) {
        if self.enabled {
            self.lines.push(line());
        }
    }

    /// Recorded lines so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the trace, returning its lines if it was enabled
    pub fn finish(self) -> Option<Vec<String>> {
        self.enabled.then_some(self.lines)
    }
}
