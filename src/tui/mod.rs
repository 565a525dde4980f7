//! Fullscreen terminal UI (TUI).
//!
//! One cooperative loop: draw, wait for input no longer than the time until
//! the next tick, run the tick when due. No background threads.

pub(crate) mod input;
pub(crate) mod screens;
pub(crate) mod state;
pub(crate) mod theme;
pub(crate) mod widgets;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tracing::info;

use crate::metrics::dashboard::Dashboard;
use crate::metrics::sampler::Sampler;
use crate::metrics::ticker::Ticker;
use state::App;
use theme::Theme;

/// Poll interval used once the ticker is cancelled
const IDLE_POLL: Duration = Duration::from_millis(250);

const HINTS: &[(&str, &str)] = &[("q/Esc", "Quit"), ("Ctrl+C", "Quit")];

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub(crate) fn run_tui(
    dashboard: Dashboard,
    sampler: &mut dyn Sampler,
    period: Duration,
) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(dashboard, Ticker::start(period, Instant::now()));
    info!(?period, "monitor window open");

    while !app.quit {
        app.ticker.run_if_due(Instant::now(), || {
            app.dashboard.sample_and_render(sampler, Local::now())
        });

        terminal.draw(|f| draw(f.area(), f, &app))?;

        let timeout = app
            .ticker
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(&mut app, key);
            }
        }
    }

    info!(
        state = ?app.ticker.state(),
        ticks = app.ticker.completed(),
        renders = app.dashboard.renders(),
        "monitor window closed"
    );
    Ok(())
}

fn draw(area: Rect, f: &mut ratatui::Frame, app: &App) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(0),    // content
            Constraint::Length(1), // footer
        ])
        .split(area);

    widgets::header::draw_header(
        layout[0],
        f,
        &theme,
        app.dashboard.inventory(),
        app.ticker.period(),
    );

    screens::dashboard::draw_dashboard(layout[1], f, app, theme);

    let status = format!("refreshes: {}", app.dashboard.renders());
    widgets::footer::draw_footer(layout[2], f, &theme, HINTS, &status);
}
