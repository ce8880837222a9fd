//! Terminal output: styling, quiet handling, progress and JSON documents.

pub mod json;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Where and how human-readable output is rendered.
pub struct OutputContext {
    pub styles: Styles,
    /// stdout is an interactive terminal.
    pub is_tty: bool,
    /// Only errors are printed.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a TTY and when neither `--no-color` nor
    /// `NO_COLOR` asks otherwise.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let colored = is_tty && !no_color && std::env::var_os("NO_COLOR").is_none();
        Self {
            styles: if colored {
                Styles::colored()
            } else {
                Styles::default()
            },
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on a terminal that is not silenced.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    pub fn success(&self, msg: &str) {
        self.mark("✓", self.styles.ok, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.mark("⚠", self.styles.warn, msg);
    }

    pub fn info(&self, msg: &str) {
        self.mark("·", self.styles.label, msg);
    }

    /// One `label  value` line of a run summary.
    pub fn summary(&self, label: &str, value: &str) {
        if !self.quiet {
            println!("    {:<14}{value}", label.style(self.styles.label));
        }
    }

    fn mark(&self, marker: &str, style: owo_colors::Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", marker.style(style));
        }
    }
}
