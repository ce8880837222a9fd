//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Stylesheet for terminal output. Every style is plain until
/// [`Styles::colored`] is used.
#[derive(Default, Clone)]
pub struct Styles {
    /// `✓` markers (green)
    pub ok: Style,
    /// `⚠` markers (yellow)
    pub warn: Style,
    /// `→` step markers and spinner glyphs (cyan)
    pub step: Style,
    /// Labels of the run summary (dimmed)
    pub label: Style,
}

impl Styles {
    #[must_use]
    pub fn colored() -> Self {
        Self {
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            step: Style::new().cyan(),
            label: Style::new().dimmed(),
        }
    }
}
