//! Processor name
//!
//! Platform inventory first, then the CPU brand string sysinfo reports.

use tracing::debug;

use super::inventory::{InventoryItem, InventorySource};
use super::UNKNOWN;

pub(crate) fn processor_name(source: &dyn InventorySource, cpu_brand: Option<&str>) -> String {
    match source.lookup(InventoryItem::Processor) {
        Ok(name) => name,
        Err(err) => {
            debug!(error = %err, "processor inventory unavailable, using sysinfo brand");
            cpu_brand
                .map(str::trim)
                .filter(|brand| !brand.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string()
        }
    }
}
