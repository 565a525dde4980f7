//! Monitor screen: system information card and performance gauges.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::hardware::InfoField;
use crate::metrics::dashboard::Dashboard;
use crate::metrics::Severity;
use crate::tui::state::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::card::CardWidget;
use crate::tui::widgets::gauge::draw_gauge;

const INFO_LABEL_WIDTH: usize = 12;

/// Highest band currently shown, for the panel badge
fn worst_severity(dashboard: &Dashboard) -> Option<Severity> {
    dashboard
        .gauges()
        .iter()
        .filter_map(|g| g.severity)
        .max()
}

pub(crate) fn draw_dashboard(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let info_height = InfoField::ALL.len() as u16 + 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(info_height), // system information
            Constraint::Length(7),           // performance
            Constraint::Min(0),
        ])
        .split(area);

    draw_system_info(layout[0], f, app, &theme);
    draw_performance(layout[1], f, app, &theme);
}

fn draw_system_info(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let inventory = app.dashboard.inventory();

    let mut card = CardWidget::new("System Information");
    for (label, value) in inventory.entries() {
        card = card.line(Line::from(vec![
            Span::styled(
                format!("{:<width$}", format!("{label}:"), width = INFO_LABEL_WIDTH),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(value.to_string(), Style::default().fg(theme.text_dim)),
        ]));
    }
    card.render(area, f, theme);
}

fn draw_performance(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let mut card = CardWidget::new("Performance");
    if let Some(worst) = worst_severity(&app.dashboard) {
        card = card.badge(worst.label(), theme.severity_color(worst));
    }
    let inner = card.render_frame(area, f, theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // cpu
            Constraint::Length(1), // ram
            Constraint::Length(1), // disk
            Constraint::Length(1),
            Constraint::Length(1), // timestamp
        ])
        .split(inner);

    for (row, gauge) in rows.iter().zip(app.dashboard.gauges()) {
        draw_gauge(*row, f, theme, gauge);
    }

    let stamp = Paragraph::new(Line::from(Span::styled(
        app.dashboard.last_updated_label(),
        Style::default().fg(theme.text_dim),
    )))
    .centered();
    f.render_widget(stamp, rows[4]);
}
