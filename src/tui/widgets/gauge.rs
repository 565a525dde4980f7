//! Horizontal utilization gauge bar.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::metrics::dashboard::Gauge;
use crate::tui::theme::Theme;

const LABEL_WIDTH: usize = 12;

/// Text shown right of the bar: value, band and a stale marker
pub(crate) fn gauge_suffix(gauge: &Gauge) -> String {
    let value = gauge
        .reading
        .map(|p| p.to_string())
        .unwrap_or_else(|| "--".to_string());
    let band = gauge.severity.map(|s| s.label()).unwrap_or("");
    let stale = if gauge.stale { "*" } else { " " };
    format!(" {:>6}{} {:<8}", value, stale, band)
}

pub(crate) fn draw_gauge(area: Rect, f: &mut ratatui::Frame, theme: &Theme, gauge: &Gauge) {
    let label = format!("{}:", gauge.kind.label());
    let suffix_str = gauge_suffix(gauge);
    let bar_width = (area.width as usize)
        .saturating_sub(LABEL_WIDTH)
        .saturating_sub(suffix_str.chars().count());

    let ratio = gauge.reading.map(|p| p.ratio()).unwrap_or(0.0);
    let filled = (bar_width as f64 * ratio).round() as usize;
    let empty = bar_width.saturating_sub(filled);

    let color = theme.gauge_color(gauge.severity);
    let suffix_style = if gauge.stale {
        Style::default().fg(theme.text_dim)
    } else {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled(
            format!("{:<width$}", label, width = LABEL_WIDTH),
            Style::default().fg(theme.text),
        ),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(empty), Style::default().fg(theme.muted)),
        Span::styled(suffix_str, suffix_style),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricKind, Percent, Severity};

    #[test]
    fn suffix_shows_value_and_band() {
        let gauge = Gauge {
            kind: MetricKind::Ram,
            reading: Percent::new(62.0),
            severity: Some(Severity::Elevated),
            stale: false,
        };
        assert_eq!(gauge_suffix(&gauge), "  62.0%  HIGH    ");
    }

    #[test]
    fn suffix_marks_stale_and_empty_gauges() {
        let stale = Gauge {
            kind: MetricKind::Disk,
            reading: Percent::new(91.0),
            severity: Some(Severity::Critical),
            stale: true,
        };
        assert!(gauge_suffix(&stale).contains("91.0%*"));

        let empty = Gauge {
            kind: MetricKind::Cpu,
            reading: None,
            severity: None,
            stale: false,
        };
        assert!(gauge_suffix(&empty).contains("--"));
    }
}
