//! Disk model

use tracing::debug;

use super::inventory::{InventoryItem, InventorySource};

pub const UNKNOWN_DISK: &str = "Unknown Disk";

pub(crate) fn disk_model(source: &dyn InventorySource) -> String {
    source
        .lookup(InventoryItem::DiskDrives)
        .unwrap_or_else(|err| {
            debug!(error = %err, "disk inventory unavailable");
            UNKNOWN_DISK.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::testing::{FailingInventory, FixedInventory};

    #[test]
    fn reads_first_drive_model() {
        let source =
            FixedInventory::default().with(InventoryItem::DiskDrives, "WD_BLACK SN850X 2000GB");
        assert_eq!(disk_model(&source), "WD_BLACK SN850X 2000GB");
    }

    #[test]
    fn placeholder_when_unavailable() {
        assert_eq!(disk_model(&FailingInventory), UNKNOWN_DISK);
    }
}
