//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Application services emit step/success/warn events through the port; this
//! type decides whether they become spinner updates or printed lines.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Terminal progress reporter.
///
/// With a spinner, `step()` replaces the spinner message and finished lines
/// are printed above it; without one every event is a line of its own.
/// Nothing is printed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: Option<ProgressBar>,
}

impl<'a> TerminalReporter<'a> {
    /// Reporter that prints one line per event.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx, spinner: None }
    }

    /// Reporter that shows steps on a spinner when `ctx` allows progress
    /// output, and falls back to [`TerminalReporter::new`] otherwise.
    #[must_use]
    pub fn with_spinner(ctx: &'a OutputContext) -> Self {
        let spinner = ctx.show_progress().then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
                pb.set_style(style.tick_chars("-\\|/ "));
            }
            pb.enable_steady_tick(SPINNER_TICK);
            pb
        });
        Self { ctx, spinner }
    }

    fn line(&self, text: String) {
        match &self.spinner {
            Some(pb) => pb.println(text),
            None => println!("{text}"),
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        match &self.spinner {
            Some(pb) => pb.set_message(message.to_string()),
            None => self.line(format!("  {} {message}", "→".style(self.ctx.styles.step))),
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            self.line(format!("  {} {message}", "✓".style(self.ctx.styles.ok)));
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            self.line(format!("  {} {message}", "⚠".style(self.ctx.styles.warn)));
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}
