//! Live resource metrics
//!
//! Percent readings for CPU, RAM and disk, their severity bands, the
//! sysinfo-backed sampler and the periodic tick schedule.

pub mod dashboard;
pub mod sampler;
pub mod ticker;

use serde::{Deserialize, Serialize};

/// Which resource a reading describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Cpu,
    Ram,
    Disk,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Cpu, MetricKind::Ram, MetricKind::Disk];

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU Usage",
            MetricKind::Ram => "RAM Usage",
            MetricKind::Disk => "Disk Usage",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Cpu => write!(f, "CPU"),
            MetricKind::Ram => write!(f, "RAM"),
            MetricKind::Disk => write!(f, "Disk"),
        }
    }
}

/// A utilization percentage, always within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percent(f64);

impl Percent {
    /// Clamp a finite reading into range; non-finite readings are rejected
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Self(value.clamp(0.0, 100.0)))
        } else {
            None
        }
    }

    /// `part / whole` as a percentage; `None` for an empty whole
    pub fn of(part: u64, whole: u64) -> Option<Self> {
        if whole == 0 {
            return None;
        }
        Self::new(part as f64 * 100.0 / whole as f64)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Fraction in [0, 1] for gauge fill
    pub fn ratio(self) -> f64 {
        self.0 / 100.0
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Severity band of a reading, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Nominal,
    Elevated,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Nominal => "OK",
            Severity::Elevated => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// Lower bounds of the elevated and critical bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_elevated")]
    pub elevated: f64,

    #[serde(default = "default_critical")]
    pub critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            elevated: default_elevated(),
            critical: default_critical(),
        }
    }
}

fn default_elevated() -> f64 {
    50.0
}

fn default_critical() -> f64 {
    80.0
}

impl Thresholds {
    /// Band lower bounds are inclusive: [0, elevated) nominal,
    /// [elevated, critical) elevated, [critical, 100] critical
    pub fn classify(&self, percent: Percent) -> Severity {
        let value = percent.value();
        if value >= self.critical {
            Severity::Critical
        } else if value >= self.elevated {
            Severity::Elevated
        } else {
            Severity::Nominal
        }
    }

    pub fn is_valid(&self) -> bool {
        (0.0..=100.0).contains(&self.elevated)
            && (0.0..=100.0).contains(&self.critical)
            && self.elevated <= self.critical
    }
}
