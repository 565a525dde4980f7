//! GPU name
//!
//! There is no portable OS API for the adapter name, so the fallback is a
//! fixed placeholder.

use tracing::debug;

use super::inventory::{InventoryItem, InventorySource};

pub const UNKNOWN_GPU: &str = "Unknown GPU";

pub(crate) fn gpu_name(source: &dyn InventorySource) -> String {
    source
        .lookup(InventoryItem::Gpu)
        .unwrap_or_else(|err| {
            debug!(error = %err, "gpu inventory unavailable");
            UNKNOWN_GPU.to_string()
        })
}
