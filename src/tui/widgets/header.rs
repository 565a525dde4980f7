//! Title bar: host, OS and refresh cadence.

use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::hardware::StaticSystemInfo;
use crate::tui::theme::Theme;

const TITLE: &str = "PC HEALTH MONITOR";

/// Segments shown after the title, skipping empty ones
pub(crate) fn header_context(info: &StaticSystemInfo, period: Duration) -> Vec<String> {
    let os = format!("{} {}", info.system, info.release);
    [
        info.node_name.trim().to_string(),
        os.trim().to_string(),
        format!("every {} ms", period.as_millis()),
    ]
    .into_iter()
    .filter(|segment| !segment.is_empty())
    .collect()
}

pub(crate) fn draw_header(
    area: Rect,
    f: &mut ratatui::Frame,
    theme: &Theme,
    info: &StaticSystemInfo,
    period: Duration,
) {
    let mut spans = vec![Span::styled(
        TITLE,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    for segment in header_context(info, period) {
        spans.push(Span::styled("  //  ", Style::default().fg(theme.muted)));
        spans.push(Span::styled(segment, Style::default().fg(theme.text_dim)));
    }

    let rule = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(theme.border),
    ));

    f.render_widget(Paragraph::new(vec![Line::from(spans), rule]), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(node_name: &str, system: &str, release: &str) -> StaticSystemInfo {
        StaticSystemInfo {
            system: system.to_string(),
            machine: "x86_64".to_string(),
            processor: "Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz".to_string(),
            gpu: "NVIDIA GeForce RTX 2070".to_string(),
            ram: "Kingston - 32.00GB".to_string(),
            disk: "Samsung SSD 970 EVO 1TB".to_string(),
            release: release.to_string(),
            version: "Ubuntu 24.04 LTS".to_string(),
            node_name: node_name.to_string(),
        }
    }

    #[test]
    fn context_lists_host_os_and_cadence() {
        let segments = header_context(
            &info("workstation", "Linux", "6.8.0-45-generic"),
            Duration::from_millis(1500),
        );
        assert_eq!(
            segments,
            vec!["workstation", "Linux 6.8.0-45-generic", "every 1500 ms"]
        );
    }

    #[test]
    fn empty_host_is_skipped() {
        let segments = header_context(&info("", "Windows", "11"), Duration::from_secs(1));
        assert_eq!(segments, vec!["Windows 11", "every 1000 ms"]);
    }
}
