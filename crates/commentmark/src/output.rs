//! Terminal output utilities.
//!
//! The rendered document goes to standard output; diagnostics go to
//! standard error so they never mix with the document.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    out: Term,
    err: Term,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            red: Style::new().red().for_stderr(),
        }
    }

    /// Write text to standard output as-is.
    pub(crate) fn write(&self, text: &str) -> std::io::Result<()> {
        self.out.write_str(text)?;
        self.out.flush()
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_style_follows_stderr_colors() {
        console::set_colors_enabled(true);
        console::set_colors_enabled_stderr(false);
        let styled = Output::new().red.apply_to("boom").to_string();
        console::set_colors_enabled_stderr(true);
        assert_eq!(styled, "boom");
    }
}
