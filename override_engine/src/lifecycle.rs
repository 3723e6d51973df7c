use log::{debug, warn};
use serde::Serialize;

use crate::fallback::RailType;
use crate::resolver::{OverrideResolver, ResolverConfig, SlotSource};
use crate::resources::ResourceAccessor;
use crate::table::{ActorManager, OverrideTable};
use crate::tileset::{ZoneTilesets, SLOT_COUNT};

/// Summary of one zone build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneReport {
    pub rail_type: RailType,
    pub slots: [SlotSource; SLOT_COUNT],
    /// Length of the installed table, sentinel included.
    pub installed_records: Option<usize>,
}

/// Zone load/teardown hooks around a single actor manager.
#[derive(Debug)]
pub struct ZoneLifecycle<R> {
    resources: R,
    config: ResolverConfig,
    manager: ActorManager,
}

impl<R: ResourceAccessor> ZoneLifecycle<R> {
    pub fn new(resources: R) -> Self {
        Self::with_config(resources, ResolverConfig::default())
    }

    pub fn with_config(resources: R, config: ResolverConfig) -> Self {
        Self {
            resources,
            config,
            manager: ActorManager::new(),
        }
    }

    /// Resolve and install the override table for a freshly built zone.
    pub fn on_zone_built(&mut self, tilesets: &ZoneTilesets) -> ZoneReport {
        let resolution =
            OverrideResolver::with_config(&self.resources, self.config).resolve(tilesets);
        self.manager.set_rail_type(resolution.rail_type);

        let installed_records = resolution.table.as_ref().map(OverrideTable::len);
        let stale_released = match resolution.table {
            Some(table) => self.manager.install_replacing(table),
            None => self.manager.release(),
        };
        if stale_released {
            warn!("zone built while a previous override table was still installed; released it");
        }

        debug!(
            "zone built: rail type {:?}, {} records installed",
            resolution.rail_type,
            installed_records.unwrap_or(0)
        );

        ZoneReport {
            rail_type: resolution.rail_type,
            slots: resolution.slots,
            installed_records,
        }
    }

    /// Release the zone's override table. Safe to call when none is installed.
    pub fn on_zone_destroyed(&mut self) -> bool {
        let released = self.manager.release();
        if released {
            debug!("zone destroyed: override table released");
        }
        released
    }

    pub fn actor_manager(&self) -> &ActorManager {
        &self.manager
    }

}
