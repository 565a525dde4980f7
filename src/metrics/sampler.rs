//! Resource sampling
//!
//! Reads are independent: a failing disk read does not affect CPU or RAM.

use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use sysinfo::{Disks, System};
use thiserror::Error;

use super::{MetricKind, Percent};

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("{0} reading was not a finite number")]
    NonFinite(MetricKind),

    #[error("total memory reported as zero")]
    NoMemory,

    #[error("no mounted volume contains {}", .0.display())]
    NoVolume(PathBuf),

    #[error("volume {} reports zero capacity", .0.display())]
    EmptyVolume(PathBuf),

    #[error("could not query volume {}", .path.display())]
    VolumeStats {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of instantaneous utilization readings
pub trait Sampler {
    fn read(&mut self, kind: MetricKind) -> Result<Percent, SampleError>;
}

/// Space figures for a mounted volume
///
/// `free_bytes` includes blocks reserved for the superuser;
/// `available_bytes` is what an unprivileged user may still write.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub mount_point: PathBuf,
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub available_bytes: u64,
}

impl Volume {
    /// Query space figures for the filesystem mounted at `mount_point`
    pub fn stat(mount_point: &Path) -> Result<Self, SampleError> {
        let stats = fs2::statvfs(mount_point).map_err(|source| SampleError::VolumeStats {
            path: mount_point.to_path_buf(),
            source,
        })?;
        Ok(Self {
            mount_point: mount_point.to_path_buf(),
            total_bytes: stats.total_space(),
            free_bytes: stats.free_space(),
            available_bytes: stats.available_space(),
        })
    }

    /// Used share of the space visible to unprivileged users, as `df` reports
    /// it: `used / (used + available)` with `used = total - free`
    pub fn used_percent(&self) -> Option<Percent> {
        let used = self.total_bytes.saturating_sub(self.free_bytes);
        Percent::of(used, used.saturating_add(self.available_bytes))
    }
}

/// Volume to sample when none is configured: the filesystem root of the
/// working directory (`/` on Unix, the drive root on Windows)
pub fn default_volume_path() -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|dir| dir.ancestors().last().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(MAIN_SEPARATOR_STR))
}

/// Pick the mount point that is the longest prefix of `target`
pub fn select_volume<'a>(mount_points: &'a [PathBuf], target: &Path) -> Option<&'a Path> {
    mount_points
        .iter()
        .filter(|mount| target.starts_with(mount))
        .max_by_key(|mount| mount.components().count())
        .map(PathBuf::as_path)
}

/// Sampler backed by sysinfo
pub struct SysinfoSampler {
    system: System,
    volume_path: PathBuf,
}

impl SysinfoSampler {
    pub fn new(volume_path: PathBuf) -> Self {
        let mut system = System::new();
        // CPU usage is a delta between refreshes; prime the first one.
        system.refresh_cpu_usage();
        system.refresh_memory();

        tracing::debug!(volume = %volume_path.display(), "sampler ready");

        Self {
            system,
            volume_path,
        }
    }

    pub fn volume_path(&self) -> &Path {
        &self.volume_path
    }

    fn read_cpu(&mut self) -> Result<Percent, SampleError> {
        self.system.refresh_cpu_usage();
        let usage = self.system.global_cpu_usage();
        Percent::new(f64::from(usage)).ok_or(SampleError::NonFinite(MetricKind::Cpu))
    }

    fn read_ram(&mut self) -> Result<Percent, SampleError> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(SampleError::NoMemory);
        }
        Percent::of(self.system.used_memory(), total)
            .ok_or(SampleError::NonFinite(MetricKind::Ram))
    }

    fn read_disk(&mut self) -> Result<Percent, SampleError> {
        let disks = Disks::new_with_refreshed_list();
        let mount_points: Vec<PathBuf> = disks
            .list()
            .iter()
            .map(|disk| disk.mount_point().to_path_buf())
            .collect();

        let mount_point = select_volume(&mount_points, &self.volume_path)
            .ok_or_else(|| SampleError::NoVolume(self.volume_path.clone()))?;

        let volume = Volume::stat(mount_point)?;
        volume
            .used_percent()
            .ok_or_else(|| SampleError::EmptyVolume(volume.mount_point.clone()))
    }
}

impl Sampler for SysinfoSampler {
    fn read(&mut self, kind: MetricKind) -> Result<Percent, SampleError> {
        match kind {
            MetricKind::Cpu => self.read_cpu(),
            MetricKind::Ram => self.read_ram(),
            MetricKind::Disk => self.read_disk(),
        }
    }
}
