use std::fmt;

/// Append-only sink for human-readable operation diagnostics.
///
/// Every pipeline operation threads an `OpLog` through its call chain and
/// appends progress or failure text to it. The accumulated text is what a
/// front end displays in its output pane; no structured error codes cross
/// this boundary.
#[derive(Debug, Default, Clone)]
pub struct OpLog {
    text: String,
}

impl OpLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line of text. A trailing newline is added if missing.
    pub fn append(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        self.text.push_str(line);
        if !line.ends_with('\n') {
            self.text.push('\n');
        }
        tracing::debug!(target: "aeromesh::oplog", "{}", line.trim_end());
    }

    /// Appends a line prefixed with the given indentation string.
    pub fn append_indented(&mut self, prefix: &str, line: impl AsRef<str>) {
        self.append(format!("{prefix}{}", line.as_ref()));
    }

    /// Returns the accumulated text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Discards the accumulated text.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Whether anything has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for OpLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_adds_trailing_newline() {
        let mut log = OpLog::new();
        log.append("stitching faces");
        log.append("done\n");
        assert_eq!(log.text(), "stitching faces\ndone\n");
    }

    #[test]
    fn appends_forward_to_tracing() {
        // The log text must accumulate whether or not a subscriber is
        // installed; install one to exercise the forwarding path.
        let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();
        let mut log = OpLog::new();
        log.append("cutting shell 1");
        assert!(log.text().contains("cutting shell 1"));
    }

    #[test]
    fn indented_append() {
        let mut log = OpLog::new();
        log.append_indented("   ", "3 free edges");
        assert_eq!(log.text(), "   3 free edges\n");
    }
}
