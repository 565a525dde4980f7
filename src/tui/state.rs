//! TUI application state.

use crate::metrics::dashboard::Dashboard;
use crate::metrics::ticker::Ticker;

pub(crate) struct App {
    pub dashboard: Dashboard,
    pub ticker: Ticker,
    pub quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, ticker: Ticker) -> Self {
        Self {
            dashboard,
            ticker,
            quit: false,
        }
    }

    /// Window closed: stop the schedule and leave the loop
    pub fn close(&mut self) {
        self.ticker.cancel();
        self.quit = true;
    }
}
