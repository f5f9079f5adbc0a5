//! Output mode routing logic.

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON only
    Json,
    /// Plain text, stable for scripts
    #[default]
    Plain,
    /// Aligned table with headers (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// `--json` wins outright. `--format plain` or `TERM=dumb` force plain.
    /// Otherwise a TTY gets pretty output and anything else gets plain.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format_flag == Some("plain") || term_is_dumb {
            return Self::Plain;
        }
        if format_flag == Some("table") || is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    /// Resolve from the real stdout and `TERM`.
    pub fn from_env(json_flag: bool, format_flag: Option<&str>) -> Self {
        use std::io::IsTerminal;

        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        Self::resolve(json_flag, format_flag, is_tty, term_is_dumb)
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
