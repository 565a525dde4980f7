//! Static system identification aggregator

use serde::{Deserialize, Serialize};
use sysinfo::System;

use super::inventory::{CommandInventory, InventorySource};
use super::{cpu, disk, gpu, ram, UNKNOWN};

/// Label keys of the static inventory, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    System,
    Machine,
    Processor,
    Gpu,
    Ram,
    Disk,
    Release,
    Version,
    NodeName,
}

impl InfoField {
    pub const ALL: [InfoField; 9] = [
        InfoField::System,
        InfoField::Machine,
        InfoField::Processor,
        InfoField::Gpu,
        InfoField::Ram,
        InfoField::Disk,
        InfoField::Release,
        InfoField::Version,
        InfoField::NodeName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InfoField::System => "System",
            InfoField::Machine => "Machine",
            InfoField::Processor => "Processor",
            InfoField::Gpu => "GPU",
            InfoField::Ram => "RAM",
            InfoField::Disk => "Disk",
            InfoField::Release => "Release",
            InfoField::Version => "Version",
            InfoField::NodeName => "Node Name",
        }
    }
}

/// Generic OS facts available on every platform without external commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFacts {
    /// OS family (`Linux`, `Windows`, `Darwin`)
    pub os_family: String,
    /// CPU architecture (e.g., "x86_64")
    pub architecture: String,
    /// Kernel release
    pub kernel_version: Option<String>,
    /// Long OS version
    pub os_version: Option<String>,
    /// Host name
    pub host_name: Option<String>,
    /// CPU brand string reported by sysinfo
    pub cpu_brand: Option<String>,
    /// Total physical memory in bytes
    pub total_memory_bytes: u64,
}

impl HostFacts {
    /// Query sysinfo and the compile target for the generic facts
    pub fn detect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let cpu_brand = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty());

        HostFacts {
            os_family: os_family(std::env::consts::OS),
            architecture: std::env::consts::ARCH.to_string(),
            kernel_version: System::kernel_version(),
            os_version: System::long_os_version(),
            host_name: System::host_name(),
            cpu_brand,
            total_memory_bytes: sys.total_memory(),
        }
    }
}

/// Map a Rust target OS name to the family name users expect
fn os_family(target_os: &str) -> String {
    match target_os {
        "linux" => "Linux".to_string(),
        "windows" => "Windows".to_string(),
        "macos" => "Darwin".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => UNKNOWN.to_string(),
            }
        }
    }
}

/// Static system identification, built once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSystemInfo {
    pub system: String,
    pub machine: String,
    pub processor: String,
    pub gpu: String,
    pub ram: String,
    pub disk: String,
    pub release: String,
    pub version: String,
    pub node_name: String,
}

impl StaticSystemInfo {
    /// Collect from the real platform inventory and sysinfo
    pub fn detect() -> Self {
        collect_with(&CommandInventory, &HostFacts::detect())
    }

    pub fn get(&self, field: InfoField) -> &str {
        match field {
            InfoField::System => &self.system,
            InfoField::Machine => &self.machine,
            InfoField::Processor => &self.processor,
            InfoField::Gpu => &self.gpu,
            InfoField::Ram => &self.ram,
            InfoField::Disk => &self.disk,
            InfoField::Release => &self.release,
            InfoField::Version => &self.version,
            InfoField::NodeName => &self.node_name,
        }
    }

    /// `(label, value)` pairs in display order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        InfoField::ALL
            .into_iter()
            .map(move |field| (field.label(), self.get(field)))
    }

    /// Display system info as formatted string
    pub fn display(&self) -> String {
        const WIDTH: usize = 62;
        const LABEL_WIDTH: usize = 12;
        let mut output = String::new();

        output.push_str(&format!("╔{}╗\n", "═".repeat(WIDTH)));
        output.push_str(&format!("║{:^WIDTH$}║\n", "SYSTEM INFORMATION"));
        output.push_str(&format!("╠{}╣\n", "═".repeat(WIDTH)));

        let content_width = WIDTH - LABEL_WIDTH - 1;
        for (label, value) in self.entries() {
            // Values longer than the box are cut on a char boundary
            let value: String = value.chars().take(content_width).collect();
            output.push_str(&format!(
                "║ {:<LABEL_WIDTH$}{:<content_width$}║\n",
                format!("{label}:"),
                value,
            ));
        }

        output.push_str(&format!("╚{}╝", "═".repeat(WIDTH)));

        output
    }
}

/// Build the static inventory from an inventory source and generic host facts
///
/// Never fails: each field falls back to a generic value or placeholder.
pub fn collect_with(source: &dyn InventorySource, host: &HostFacts) -> StaticSystemInfo {
    let or_unknown = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string()
    };

    let info = StaticSystemInfo {
        system: host.os_family.clone(),
        machine: host.architecture.clone(),
        processor: cpu::processor_name(source, host.cpu_brand.as_deref()),
        gpu: gpu::gpu_name(source),
        ram: ram::describe(source, host.total_memory_bytes),
        disk: disk::disk_model(source),
        release: or_unknown(&host.kernel_version),
        version: or_unknown(&host.os_version),
        node_name: or_unknown(&host.host_name),
    };

    tracing::info!(
        processor = %info.processor,
        gpu = %info.gpu,
        ram = %info.ram,
        disk = %info.disk,
        "static system info collected"
    );

    info
}

/// One-shot startup inventory
pub fn collect_static_info() -> StaticSystemInfo {
    StaticSystemInfo::detect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::inventory::InventoryItem;
    use crate::hardware::testing::{FailingInventory, FixedInventory};

    fn host() -> HostFacts {
        HostFacts {
            os_family: "Linux".to_string(),
            architecture: "x86_64".to_string(),
            kernel_version: Some("6.8.0-45-generic".to_string()),
            os_version: Some("Linux 24.04 Ubuntu".to_string()),
            host_name: Some("workstation".to_string()),
            cpu_brand: Some("AMD Ryzen 5 5600X 6-Core Processor".to_string()),
            total_memory_bytes: 32 * 1024u64.pow(3),
        }
    }

    #[test]
    fn test_all_fields_populated_when_inventory_fails() {
        let info = collect_with(&FailingInventory, &host());

        for (label, value) in info.entries() {
            assert!(!value.is_empty(), "{label} should be populated");
        }
        assert_eq!(info.processor, "AMD Ryzen 5 5600X 6-Core Processor");
        assert_eq!(info.gpu, "Unknown GPU");
        assert_eq!(info.disk, "Unknown Disk");
        assert_eq!(info.ram, "32.00GB");
    }

    #[test]
    fn test_unknown_placeholders_for_missing_host_facts() {
        let bare = HostFacts {
            kernel_version: None,
            os_version: Some("  ".to_string()),
            host_name: None,
            cpu_brand: None,
            ..host()
        };
        let info = collect_with(&FailingInventory, &bare);
        assert_eq!(info.release, UNKNOWN);
        assert_eq!(info.version, UNKNOWN);
        assert_eq!(info.node_name, UNKNOWN);
        assert_eq!(info.processor, UNKNOWN);
    }

    #[test]
    fn test_inventory_values_win() {
        let source = FixedInventory::default()
            .with(InventoryItem::Processor, "AMD Ryzen 5 5600X")
            .with(InventoryItem::Gpu, "AMD Radeon RX 6700 XT")
            .with(InventoryItem::MemoryModules, "G.Skill")
            .with(InventoryItem::DiskDrives, "Samsung SSD 980 PRO 1TB");
        let info = collect_with(&source, &host());

        assert_eq!(info.get(InfoField::Processor), "AMD Ryzen 5 5600X");
        assert_eq!(info.get(InfoField::Gpu), "AMD Radeon RX 6700 XT");
        assert_eq!(info.get(InfoField::Ram), "G.Skill - 32.00GB");
        assert_eq!(info.get(InfoField::Disk), "Samsung SSD 980 PRO 1TB");
        assert_eq!(info.get(InfoField::NodeName), "workstation");
    }

    #[test]
    fn test_collect_is_repeatable() {
        let source = FixedInventory::default().with(InventoryItem::Gpu, "Intel UHD Graphics 620");
        assert_eq!(collect_with(&source, &host()), collect_with(&source, &host()));
    }

    #[test]
    fn test_entries_follow_label_order() {
        let info = collect_with(&FailingInventory, &host());
        let labels: Vec<&str> = info.entries().map(|(label, _)| label).collect();
        assert_eq!(
            labels,
            [
                "System",
                "Machine",
                "Processor",
                "GPU",
                "RAM",
                "Disk",
                "Release",
                "Version",
                "Node Name"
            ]
        );
    }

    #[test]
    fn test_os_family_names() {
        assert_eq!(os_family("linux"), "Linux");
        assert_eq!(os_family("macos"), "Darwin");
        assert_eq!(os_family("freebsd"), "Freebsd");
        assert_eq!(os_family(""), UNKNOWN);
    }

    #[test]
    fn test_display_lists_every_label() {
        let info = collect_with(&FailingInventory, &host());
        let text = info.display();
        assert!(text.contains("SYSTEM INFORMATION"));
        for field in InfoField::ALL {
            assert!(text.contains(&format!("{}:", field.label())));
        }
    }
}
