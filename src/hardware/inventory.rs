//! Platform inventory queries
//!
//! Each hardware name is looked up by running an OS inventory command and
//! reading one value out of its text output:
//! - Windows: `wmic` tables
//! - Linux: lscpu, lspci, dmidecode, lsblk
//! - macOS: sysctl, system_profiler

use std::process::Command;
use thiserror::Error;

/// Hardware items that have a platform inventory query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryItem {
    Processor,
    Gpu,
    MemoryModules,
    DiskDrives,
}

impl std::fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryItem::Processor => write!(f, "processor"),
            InventoryItem::Gpu => write!(f, "gpu"),
            InventoryItem::MemoryModules => write!(f, "memory modules"),
            InventoryItem::DiskDrives => write!(f, "disk drives"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("no inventory command for {0} on this platform")]
    Unsupported(InventoryItem),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Status {
        program: &'static str,
        status: std::process::ExitStatus,
    },

    #[error("{program} returned no usable {item} row")]
    NoRow {
        program: &'static str,
        item: InventoryItem,
    },
}

/// Where the wanted value sits in a command's output
#[derive(Debug, Clone, Copy)]
pub enum RowFormat {
    /// Column-aligned table with a header line (wmic, lsblk)
    Column(&'static str),
    /// `Key: value` listing (lscpu, dmidecode, system_profiler)
    Field(&'static str),
    /// One device per line, value follows a class tag (lspci)
    Tagged(&'static [&'static str]),
    /// First non-empty line (sysctl -n)
    FirstLine,
}

/// Values inventory tools print for empty slots or unreadable fields
const PLACEHOLDERS: &[&str] = &[
    "unknown",
    "not specified",
    "no dimm",
    "none",
    "to be filled by o.e.m.",
];

fn usable(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || PLACEHOLDERS.contains(&value.to_ascii_lowercase().as_str()) {
        None
    } else {
        Some(value.to_string())
    }
}

impl RowFormat {
    /// Extract the first usable value from command output
    pub fn extract(&self, output: &str) -> Option<String> {
        match *self {
            RowFormat::Column(name) => extract_column(output, name),
            RowFormat::Field(key) => extract_field(output, key),
            RowFormat::Tagged(tags) => extract_tagged(output, tags),
            RowFormat::FirstLine => output.lines().find_map(usable),
        }
    }
}

fn extract_column(output: &str, name: &str) -> Option<String> {
    let mut lines = output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());

    let header = lines.next()?;

    // Column spans are derived from the header token offsets (in chars).
    let mut tokens = Vec::new();
    let mut start = None;
    for (idx, ch) in header.chars().enumerate() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(idx),
            (true, Some(s)) => {
                tokens.push((s, idx));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push((s, header.chars().count()));
    }

    let header_chars: Vec<char> = header.chars().collect();
    let position = tokens.iter().position(|&(s, e)| {
        header_chars[s..e]
            .iter()
            .collect::<String>()
            .eq_ignore_ascii_case(name)
    })?;
    let col_start = tokens[position].0;
    let col_end = tokens.get(position + 1).map(|&(s, _)| s);

    lines.find_map(|row| {
        let cell: String = match col_end {
            Some(end) => row.chars().skip(col_start).take(end - col_start).collect(),
            None => row.chars().skip(col_start).collect(),
        };
        usable(&cell)
    })
}

fn extract_field(output: &str, key: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        if k.trim().eq_ignore_ascii_case(key) {
            usable(v)
        } else {
            None
        }
    })
}

fn extract_tagged(output: &str, tags: &[&str]) -> Option<String> {
    output.lines().find_map(|line| {
        tags.iter().find_map(|tag| {
            let idx = line.find(tag)?;
            let rest = &line[idx + tag.len()..];
            usable(rest.trim_start().trim_start_matches(':'))
        })
    })
}

/// A single platform query
#[derive(Debug, Clone, Copy)]
pub struct InventoryCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub format: RowFormat,
}

impl InventoryItem {
    /// Inventory command for this item on the current platform
    #[cfg(target_os = "windows")]
    pub fn command(self) -> Option<InventoryCommand> {
        const fn wmic(args: &'static [&'static str], column: &'static str) -> InventoryCommand {
            InventoryCommand {
                program: "wmic",
                args,
                format: RowFormat::Column(column),
            }
        }

        Some(match self {
            InventoryItem::Processor => wmic(&["cpu", "get", "name"], "Name"),
            InventoryItem::Gpu => wmic(&["path", "win32_VideoController", "get", "name"], "Name"),
            InventoryItem::MemoryModules => wmic(
                &["memorychip", "get", "manufacturer,capacity"],
                "Manufacturer",
            ),
            InventoryItem::DiskDrives => wmic(&["diskdrive", "get", "model"], "Model"),
        })
    }

    /// Inventory command for this item on the current platform
    #[cfg(target_os = "linux")]
    pub fn command(self) -> Option<InventoryCommand> {
        Some(match self {
            InventoryItem::Processor => InventoryCommand {
                program: "lscpu",
                args: &[],
                format: RowFormat::Field("Model name"),
            },
            InventoryItem::Gpu => InventoryCommand {
                program: "lspci",
                args: &[],
                format: RowFormat::Tagged(&[
                    "VGA compatible controller",
                    "3D controller",
                    "Display controller",
                ]),
            },
            InventoryItem::MemoryModules => InventoryCommand {
                program: "dmidecode",
                args: &["-t", "memory"],
                format: RowFormat::Field("Manufacturer"),
            },
            InventoryItem::DiskDrives => InventoryCommand {
                program: "lsblk",
                args: &["-d", "-o", "MODEL"],
                format: RowFormat::Column("MODEL"),
            },
        })
    }

    /// Inventory command for this item on the current platform
    #[cfg(target_os = "macos")]
    pub fn command(self) -> Option<InventoryCommand> {
        Some(match self {
            InventoryItem::Processor => InventoryCommand {
                program: "sysctl",
                args: &["-n", "machdep.cpu.brand_string"],
                format: RowFormat::FirstLine,
            },
            InventoryItem::Gpu => InventoryCommand {
                program: "system_profiler",
                args: &["SPDisplaysDataType"],
                format: RowFormat::Field("Chipset Model"),
            },
            InventoryItem::MemoryModules => InventoryCommand {
                program: "system_profiler",
                args: &["SPMemoryDataType"],
                format: RowFormat::Field("Manufacturer"),
            },
            InventoryItem::DiskDrives => InventoryCommand {
                program: "system_profiler",
                args: &["SPStorageDataType"],
                format: RowFormat::Field("Device Name"),
            },
        })
    }

    /// Inventory command for this item on the current platform
    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    pub fn command(self) -> Option<InventoryCommand> {
        None
    }
}

/// Source of platform hardware names
pub trait InventorySource {
    /// Look up the display value for one item
    fn lookup(&self, item: InventoryItem) -> Result<String, InventoryError>;
}

/// Runs the real platform commands, synchronously and without a timeout
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandInventory;

impl InventorySource for CommandInventory {
    fn lookup(&self, item: InventoryItem) -> Result<String, InventoryError> {
        let cmd = item.command().ok_or(InventoryError::Unsupported(item))?;

        let output = Command::new(cmd.program)
            .args(cmd.args)
            .output()
            .map_err(|source| InventoryError::Spawn {
                program: cmd.program,
                source,
            })?;

        if !output.status.success() {
            return Err(InventoryError::Status {
                program: cmd.program,
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        cmd.format.extract(&stdout).ok_or(InventoryError::NoRow {
            program: cmd.program,
            item,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_reads_first_data_row() {
        let output = "Name                                      \r\r\n\
                      AMD Ryzen 7 5800X 8-Core Processor        \r\r\n\
                      \r\r\n";
        assert_eq!(
            RowFormat::Column("Name").extract(output).as_deref(),
            Some("AMD Ryzen 7 5800X 8-Core Processor")
        );
    }

    #[test]
    fn column_picks_named_column_out_of_several() {
        // wmic orders columns alphabetically regardless of the query order
        let output = "Capacity     Manufacturer  \r\n\
                      8589934592   Samsung       \r\n\
                      8589934592   Samsung       \r\n";
        assert_eq!(
            RowFormat::Column("Manufacturer").extract(output).as_deref(),
            Some("Samsung")
        );
        assert_eq!(
            RowFormat::Column("capacity").extract(output).as_deref(),
            Some("8589934592")
        );
    }

    #[test]
    fn column_skips_blank_cells() {
        let output = "MODEL\n\n                 \nSamsung SSD 970 EVO Plus 1TB\n";
        assert_eq!(
            RowFormat::Column("MODEL").extract(output).as_deref(),
            Some("Samsung SSD 970 EVO Plus 1TB")
        );
    }

    #[test]
    fn column_missing_header_is_absent() {
        assert_eq!(RowFormat::Column("Model").extract(""), None);
        assert_eq!(
            RowFormat::Column("Model").extract("Name\nSomething\n"),
            None
        );
        assert_eq!(
            RowFormat::Column("Model").extract("Model\r\n\r\n"),
            None
        );
    }

    #[test]
    fn field_reads_lscpu_style_output() {
        let output = "Architecture:            x86_64\n\
                      CPU op-mode(s):          32-bit, 64-bit\n\
                      Model name:              Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz\n";
        assert_eq!(
            RowFormat::Field("Model name").extract(output).as_deref(),
            Some("Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz")
        );
    }

    #[test]
    fn field_skips_empty_slots() {
        let output = "Memory Device\n\
                      \tSize: No Module Installed\n\
                      \tManufacturer: Not Specified\n\
                      Memory Device\n\
                      \tSize: 16 GB\n\
                      \tManufacturer: Kingston\n";
        assert_eq!(
            RowFormat::Field("Manufacturer").extract(output).as_deref(),
            Some("Kingston")
        );
    }

    #[test]
    fn tagged_reads_lspci_class_line() {
        let output = "00:00.0 Host bridge: Intel Corporation Device 9b61\n\
                      00:02.0 VGA compatible controller: Intel Corporation UHD Graphics 620\n\
                      01:00.0 3D controller: NVIDIA Corporation GP108M [GeForce MX150]\n";
        let tags: &[&str] = &["VGA compatible controller", "3D controller"];
        assert_eq!(
            RowFormat::Tagged(tags).extract(output).as_deref(),
            Some("Intel Corporation UHD Graphics 620")
        );
    }

    #[test]
    fn first_line_ignores_leading_blank_lines() {
        assert_eq!(
            RowFormat::FirstLine.extract("\n  Apple M2 Pro\n").as_deref(),
            Some("Apple M2 Pro")
        );
        assert_eq!(RowFormat::FirstLine.extract("\n\n"), None);
    }

    #[test]
    fn error_text_is_not_mistaken_for_data() {
        let output = "No Instance(s) Available.\r\n";
        assert_eq!(RowFormat::Column("Name").extract(output), None);
    }
}
