//! TUI screen renderers.

pub(crate) mod dashboard;
