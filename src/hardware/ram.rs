//! RAM description
//!
//! Capacity always comes from sysinfo; the module manufacturer comes from the
//! platform memory inventory when it is readable.

use tracing::{debug, warn};

use super::inventory::{InventoryError, InventoryItem, InventorySource};

const BYTE_UNITS: [&str; 5] = ["", "K", "M", "G", "T"];

/// Scale a byte count to binary units with two decimals (`16.00GB`)
///
/// Picks the largest unit whose value stays below 1024. Counts of 1024 TB
/// and beyond stay in TB.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2}{}B", value, BYTE_UNITS[unit])
}

/// Describe installed memory as `<manufacturer> - <capacity>`
pub(crate) fn describe(source: &dyn InventorySource, total_bytes: u64) -> String {
    let capacity = format_bytes(total_bytes);

    match source.lookup(InventoryItem::MemoryModules) {
        Ok(manufacturer) => format!("{} - {}", manufacturer, capacity),
        Err(InventoryError::NoRow { program, .. }) => {
            debug!(program, "memory inventory had no module rows");
            format!("Unknown - {}", capacity)
        }
        Err(err) => {
            warn!(error = %err, "memory inventory unavailable, showing capacity only");
            capacity
        }
    }
}
