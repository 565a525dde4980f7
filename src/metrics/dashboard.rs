//! Dashboard state: static inventory plus the three live gauges

use chrono::{DateTime, Local};
use tracing::{trace, warn};

use super::sampler::Sampler;
use super::{MetricKind, Percent, Severity, Thresholds};
use crate::hardware::StaticSystemInfo;

/// One live gauge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub kind: MetricKind,
    /// Last good reading; `None` until the first one arrives
    pub reading: Option<Percent>,
    pub severity: Option<Severity>,
    /// The most recent read of this gauge failed
    pub stale: bool,
}

impl Gauge {
    fn new(kind: MetricKind) -> Self {
        Self {
            kind,
            reading: None,
            severity: None,
            stale: false,
        }
    }
}

/// Result of one sample-and-render tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub fresh: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    inventory: StaticSystemInfo,
    thresholds: Thresholds,
    gauges: [Gauge; 3],
    last_updated: Option<DateTime<Local>>,
    renders: u64,
}

impl Dashboard {
    pub fn new(inventory: StaticSystemInfo, thresholds: Thresholds) -> Self {
        Self {
            inventory,
            thresholds,
            gauges: MetricKind::ALL.map(Gauge::new),
            last_updated: None,
            renders: 0,
        }
    }

    pub fn inventory(&self) -> &StaticSystemInfo {
        &self.inventory
    }

    pub fn gauges(&self) -> &[Gauge] {
        &self.gauges
    }

    pub fn gauge(&self, kind: MetricKind) -> &Gauge {
        // ALL and gauges share the same order
        let idx = MetricKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &self.gauges[idx]
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Timestamp label text; empty before the first successful sample
    pub fn last_updated_label(&self) -> String {
        self.last_updated
            .map(|at| format!("Last updated: {}", at.format("%H:%M:%S")))
            .unwrap_or_default()
    }

    /// Number of ticks applied to this dashboard
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Read all three metrics and update gauges and timestamp
    ///
    /// A failed read leaves that gauge's last good value in place and marks it
    /// stale. The timestamp moves to `now` when at least one read succeeded.
    pub fn sample_and_render(
        &mut self,
        sampler: &mut dyn Sampler,
        now: DateTime<Local>,
    ) -> TickReport {
        let mut report = TickReport {
            fresh: 0,
            failed: 0,
        };

        for gauge in &mut self.gauges {
            match sampler.read(gauge.kind) {
                Ok(reading) => {
                    gauge.reading = Some(reading);
                    gauge.severity = Some(self.thresholds.classify(reading));
                    gauge.stale = false;
                    report.fresh += 1;
                }
                Err(err) => {
                    warn!(
                        metric = %gauge.kind,
                        error = %err,
                        "sampling failed, keeping last value"
                    );
                    gauge.stale = true;
                    report.failed += 1;
                }
            }
        }

        if report.fresh > 0 {
            self.last_updated = Some(now);
        }
        self.renders += 1;

        trace!(
            fresh = report.fresh,
            failed = report.failed,
            renders = self.renders,
            "tick rendered"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::sampler::SampleError;
    use crate::metrics::ticker::Ticker;
    use chrono::TimeZone;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn inventory() -> StaticSystemInfo {
        StaticSystemInfo {
            system: "Linux".to_string(),
            machine: "x86_64".to_string(),
            processor: "AMD Ryzen 5 5600X".to_string(),
            gpu: "Unknown GPU".to_string(),
            ram: "32.00GB".to_string(),
            disk: "Unknown Disk".to_string(),
            release: "6.8.0".to_string(),
            version: "Ubuntu 24.04".to_string(),
            node_name: "workstation".to_string(),
        }
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 6, 15, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    /// Replays scripted readings; `None` simulates a fault
    struct ScriptedSampler {
        cpu: Vec<Option<f64>>,
        ram: Vec<Option<f64>>,
        disk: Vec<Option<f64>>,
    }

    impl ScriptedSampler {
        fn constant(cpu: f64, ram: f64, disk: f64) -> Self {
            Self {
                cpu: vec![Some(cpu)],
                ram: vec![Some(ram)],
                disk: vec![Some(disk)],
            }
        }
    }

    impl Sampler for ScriptedSampler {
        fn read(&mut self, kind: MetricKind) -> Result<Percent, SampleError> {
            let script = match kind {
                MetricKind::Cpu => &mut self.cpu,
                MetricKind::Ram => &mut self.ram,
                MetricKind::Disk => &mut self.disk,
            };
            let next = if script.len() > 1 {
                script.remove(0)
            } else {
                script.first().copied().flatten()
            };
            match next {
                Some(value) => Percent::new(value).ok_or(SampleError::NonFinite(kind)),
                None => Err(SampleError::NoVolume(PathBuf::from("/"))),
            }
        }
    }

    #[test]
    fn test_mixed_severities_end_to_end() {
        let mut dashboard = Dashboard::new(inventory(), Thresholds::default());
        let mut sampler = ScriptedSampler::constant(45.0, 62.0, 91.0);
        let now = at(14, 3, 7);

        let report = dashboard.sample_and_render(&mut sampler, now);

        assert_eq!(report, TickReport { fresh: 3, failed: 0 });
        assert_eq!(
            dashboard.gauge(MetricKind::Cpu).severity,
            Some(Severity::Nominal)
        );
        assert_eq!(
            dashboard.gauge(MetricKind::Ram).severity,
            Some(Severity::Elevated)
        );
        assert_eq!(
            dashboard.gauge(MetricKind::Disk).severity,
            Some(Severity::Critical)
        );
        assert_eq!(dashboard.last_updated(), Some(now));
        assert_eq!(dashboard.last_updated_label(), "Last updated: 14:03:07");
    }

    #[test]
    fn test_failed_read_keeps_previous_value() {
        let mut dashboard = Dashboard::new(inventory(), Thresholds::default());
        let mut sampler = ScriptedSampler {
            cpu: vec![Some(30.0), Some(55.0)],
            ram: vec![Some(40.0), Some(41.0)],
            disk: vec![Some(85.0), None],
        };

        dashboard.sample_and_render(&mut sampler, at(9, 0, 0));
        let report = dashboard.sample_and_render(&mut sampler, at(9, 0, 1));

        assert_eq!(report, TickReport { fresh: 2, failed: 1 });
        let disk = dashboard.gauge(MetricKind::Disk);
        assert_eq!(disk.reading.map(Percent::value), Some(85.0));
        assert_eq!(disk.severity, Some(Severity::Critical));
        assert!(disk.stale);
        assert!(!dashboard.gauge(MetricKind::Cpu).stale);
        assert_eq!(dashboard.last_updated(), Some(at(9, 0, 1)));
    }

    #[test]
    fn test_all_reads_failing_leaves_timestamp() {
        let mut dashboard = Dashboard::new(inventory(), Thresholds::default());
        let mut sampler = ScriptedSampler {
            cpu: vec![Some(10.0), None],
            ram: vec![Some(10.0), None],
            disk: vec![Some(10.0), None],
        };

        dashboard.sample_and_render(&mut sampler, at(9, 0, 0));
        dashboard.sample_and_render(&mut sampler, at(9, 0, 1));

        assert_eq!(dashboard.last_updated(), Some(at(9, 0, 0)));
        assert!(dashboard.gauges().iter().all(|g| g.stale));
        assert_eq!(dashboard.renders(), 2);
    }

    #[test]
    fn test_label_empty_before_first_sample() {
        let dashboard = Dashboard::new(inventory(), Thresholds::default());
        assert_eq!(dashboard.last_updated_label(), "");
        assert!(dashboard.gauges().iter().all(|g| g.reading.is_none()));
    }

    #[test]
    fn test_n_ticks_render_n_times() {
        let mut dashboard = Dashboard::new(inventory(), Thresholds::default());
        let mut sampler = ScriptedSampler {
            cpu: vec![Some(10.0), None, Some(f64::NAN), Some(99.0), None, Some(20.0)],
            ram: vec![None, None, Some(70.0), None, Some(5.0), Some(50.0)],
            disk: vec![Some(1.0), Some(2.0), None, None, None, Some(3.0)],
        };

        let period = Duration::from_millis(1000);
        let start = Instant::now();
        let mut ticker = Ticker::start(period, start);

        let ticks = 6;
        let mut now = start;
        for i in 0..ticks {
            let wall = at(10, 0, i);
            let ran = ticker.run_if_due(now, || dashboard.sample_and_render(&mut sampler, wall));
            assert!(ran.is_some());
            assert_eq!(ticker.next_due(), Some(now + period));
            now += period;
        }

        assert_eq!(dashboard.renders(), u64::from(ticks));
        assert_eq!(ticker.completed(), u64::from(ticks));
    }
}
