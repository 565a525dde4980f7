//! Line mode for non-terminal environments (CI logs, redirected output)
//!
//! Prints the inventory once, then one status line per tick.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use colored::*;

use crate::metrics::dashboard::{Dashboard, Gauge};
use crate::metrics::sampler::Sampler;
use crate::metrics::ticker::Ticker;
use crate::metrics::{MetricKind, Severity};

fn paint(text: &str, severity: Option<Severity>) -> ColoredString {
    match severity {
        Some(Severity::Nominal) => text.bright_green(),
        Some(Severity::Elevated) => text.bright_yellow(),
        Some(Severity::Critical) => text.bright_red(),
        None => text.dimmed(),
    }
}

fn gauge_segment(gauge: &Gauge) -> String {
    let value = gauge
        .reading
        .map(|p| p.to_string())
        .unwrap_or_else(|| "--".to_string());
    let band = gauge.severity.map(|s| s.label()).unwrap_or("-");
    let stale = if gauge.stale { " (stale)" } else { "" };
    format!("{} {:>6} {}{}", gauge.kind, value, band, stale)
}

/// One status line for the current dashboard state
pub(crate) fn status_line(dashboard: &Dashboard, colorize: bool) -> String {
    let stamp = dashboard
        .last_updated()
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    let segments: Vec<String> = MetricKind::ALL
        .iter()
        .map(|&kind| {
            let gauge = dashboard.gauge(kind);
            let segment = gauge_segment(gauge);
            if colorize {
                paint(&segment, gauge.severity).to_string()
            } else {
                segment
            }
        })
        .collect();

    format!("[{}] {}", stamp, segments.join(" | "))
}

/// Run the monitor without a terminal UI until `max_ticks` ticks (or forever)
///
/// Returns the final dashboard state.
pub(crate) fn run_line_mode(
    mut dashboard: Dashboard,
    sampler: &mut dyn Sampler,
    period: Duration,
    max_ticks: Option<u64>,
) -> Result<Dashboard> {
    println!("{}", dashboard.inventory().display());

    let mut ticker = Ticker::start(period, Instant::now());
    loop {
        if max_ticks.is_some_and(|max| ticker.completed() >= max) {
            ticker.cancel();
            break;
        }

        let ran = ticker.run_if_due(Instant::now(), || {
            dashboard.sample_and_render(sampler, Local::now())
        });
        if ran.is_some() {
            println!("{}", status_line(&dashboard, true));
        }

        if let Some(wait) = ticker.time_until_due(Instant::now()) {
            thread::sleep(wait);
        }
    }

    tracing::info!(renders = dashboard.renders(), "line mode finished");
    Ok(dashboard)
}
