//! Hardware inventory module
//!
//! Reads static system identification once at startup using sysinfo and
//! platform inventory commands (wmic, lscpu/lspci/lsblk, system_profiler).

mod cpu;
mod disk;
mod gpu;
pub mod inventory;
mod ram;
mod system;

pub use system::{collect_static_info, InfoField, StaticSystemInfo};

/// Placeholder for fields no source could fill
pub const UNKNOWN: &str = "Unknown";
