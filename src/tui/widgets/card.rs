//! Rounded bordered panel widget.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::tui::theme::Theme;

pub(crate) struct CardWidget<'a> {
    pub title: &'a str,
    pub lines: Vec<Line<'a>>,
    pub badge: Option<(String, Color)>,
}

impl<'a> CardWidget<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            lines: Vec::new(),
            badge: None,
        }
    }

    pub fn line(mut self, line: Line<'a>) -> Self {
        self.lines.push(line);
        self
    }

    pub fn badge(mut self, label: impl Into<String>, color: Color) -> Self {
        self.badge = Some((label.into(), color));
        self
    }

    fn block(&self, theme: &Theme) -> Block<'a> {
        let mut title_spans = vec![Span::styled(
            self.title,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )];

        if let Some((badge_text, badge_color)) = &self.badge {
            title_spans.push(Span::raw("  "));
            title_spans.push(Span::styled(
                badge_text.clone(),
                Style::default()
                    .fg(*badge_color)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Block::default()
            .title(Line::from(title_spans))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border))
    }

    pub fn render(self, area: Rect, f: &mut ratatui::Frame, theme: &Theme) {
        let block = self.block(theme);
        let para = Paragraph::new(Text::from(self.lines))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(para, area);
    }

    /// Draw only the frame and return the inner area for custom content
    pub fn render_frame(self, area: Rect, f: &mut ratatui::Frame, theme: &Theme) -> Rect {
        let block = self.block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);
        inner
    }
}
