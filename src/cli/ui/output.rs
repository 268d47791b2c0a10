use console::style;

/// Status messages for the terminal
///
/// Everything goes to stderr so generated content on stdout stays pipeable.
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green(), message);
    }

    /// Indented `label: value` line under a success or info message
    pub fn detail(&self, label: &str, value: &str) {
        eprintln!("  {} {}", style(format!("{}:", label)).dim(), value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
