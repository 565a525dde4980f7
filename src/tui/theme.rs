//! TUI color theme.

use ratatui::style::Color;

use crate::metrics::Severity;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    // Primary palette
    pub accent: Color,
    pub nominal: Color,
    pub elevated: Color,
    pub critical: Color,

    // UI chrome
    pub border: Color,
    pub muted: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0, 212, 255),
            nominal: Color::Rgb(163, 230, 53),
            elevated: Color::Rgb(251, 191, 36),
            critical: Color::Rgb(255, 68, 85),
            border: Color::Gray,
            muted: Color::DarkGray,
            text: Color::White,
            text_dim: Color::Gray,
        }
    }
}

impl Theme {
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Nominal => self.nominal,
            Severity::Elevated => self.elevated,
            Severity::Critical => self.critical,
        }
    }

    /// Bar color for a gauge; muted until the first reading
    pub fn gauge_color(&self, severity: Option<Severity>) -> Color {
        severity
            .map(|s| self.severity_color(s))
            .unwrap_or(self.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_have_distinct_colors() {
        let theme = Theme::default();
        let colors = [
            theme.severity_color(Severity::Nominal),
            theme.severity_color(Severity::Elevated),
            theme.severity_color(Severity::Critical),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
        assert_eq!(theme.gauge_color(None), theme.muted);
    }
}
