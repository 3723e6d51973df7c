use log::{debug, warn};
use override_formats::{parse_entries_into, OverrideFile, RuntimeOverrideRecord, FORMAT_VERSION};
use serde::Serialize;

use crate::fallback::{lift_default, rail_default_count, rail_defaults, RailType};
use crate::resources::{ResourceAccessor, ResourcePurpose};
use crate::table::OverrideTable;
use crate::tileset::{TilesetName, ZoneTilesets, LIFT_SLOT, RAIL_SLOT, SLOT_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Override files carrying any other version are ignored.
    pub expected_version: u16,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            expected_version: FORMAT_VERSION,
        }
    }
}

/// How a slot ended up contributing to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotSource {
    /// No tileset assigned.
    Unset,
    /// The tileset's own override file.
    File { entries: usize, rail_color: u8 },
    /// Slot 0 without a usable file.
    LiftDefault,
    /// Slot 3 named after a stock rail tileset, without a usable file.
    RailDefault { rail_type: RailType },
    /// Named, but nothing to contribute.
    Empty,
}

impl SlotSource {
    pub fn contributed(&self) -> usize {
        match self {
            SlotSource::Unset | SlotSource::Empty => 0,
            SlotSource::File { entries, .. } => *entries,
            SlotSource::LiftDefault => 1,
            SlotSource::RailDefault { rail_type } => rail_default_count(*rail_type),
        }
    }
}

#[derive(Debug)]
pub struct Resolution {
    pub rail_type: RailType,
    /// `None` only when nothing, not even the sentinel, was budgeted.
    pub table: Option<OverrideTable>,
    pub slots: [SlotSource; SLOT_COUNT],
}

enum SlotPlan {
    Unset,
    File(OverrideFile),
    Lift,
    Rail(RailType),
    Empty,
}

impl SlotPlan {
    fn len(&self) -> usize {
        match self {
            SlotPlan::Unset | SlotPlan::Empty => 0,
            SlotPlan::File(file) => file.entry_count(),
            SlotPlan::Lift => 1,
            SlotPlan::Rail(rail_type) => rail_default_count(*rail_type),
        }
    }

    fn source(&self) -> SlotSource {
        match self {
            SlotPlan::Unset => SlotSource::Unset,
            SlotPlan::File(file) => SlotSource::File {
                entries: file.entry_count(),
                rail_color: file.header.rail_color,
            },
            SlotPlan::Lift => SlotSource::LiftDefault,
            SlotPlan::Rail(rail_type) => SlotSource::RailDefault {
                rail_type: *rail_type,
            },
            SlotPlan::Empty => SlotSource::Empty,
        }
    }
}

/// Builds a zone's override table from its tilesets.
pub struct OverrideResolver<'a, R: ResourceAccessor + ?Sized> {
    resources: &'a R,
    config: ResolverConfig,
}

impl<'a, R: ResourceAccessor + ?Sized> OverrideResolver<'a, R> {
    pub fn new(resources: &'a R) -> Self {
        Self::with_config(resources, ResolverConfig::default())
    }

    pub fn with_config(resources: &'a R, config: ResolverConfig) -> Self {
        Self { resources, config }
    }

    pub fn resolve(&self, tilesets: &ZoneTilesets) -> Resolution {
        let mut rail_type = RailType::None;
        // The sentinel is always budgeted.
        let mut total = 1usize;
        let mut plans: [SlotPlan; SLOT_COUNT] = std::array::from_fn(|_| SlotPlan::Unset);

        for (slot, name) in tilesets.iter().enumerate() {
            let plan = self.inspect_slot(slot, name, &mut rail_type);
            total += plan.len();
            plans[slot] = plan;
        }

        let slots = std::array::from_fn(|slot| plans[slot].source());

        if total == 0 {
            warn!("override resolution produced no records; keeping the current object list");
            return Resolution {
                rail_type,
                table: None,
                slots,
            };
        }

        let mut records = vec![RuntimeOverrideRecord::EMPTY; total];
        let mut offset = 0;
        for plan in &plans {
            let count = plan.len();
            let dest = &mut records[offset..offset + count];
            match plan {
                SlotPlan::File(file) => parse_entries_into(&file.entries, dest),
                SlotPlan::Lift => dest.copy_from_slice(&[lift_default()]),
                SlotPlan::Rail(rail_type) => dest.copy_from_slice(rail_defaults(*rail_type)),
                SlotPlan::Unset | SlotPlan::Empty => {}
            }
            offset += count;
        }
        records[offset] = RuntimeOverrideRecord::sentinel();

        debug!("resolved {offset} override records, rail type {rail_type:?}");

        Resolution {
            rail_type,
            table: Some(OverrideTable::from_records(records)),
            slots,
        }
    }

    fn inspect_slot(&self, slot: usize, name: &TilesetName, rail_type: &mut RailType) -> SlotPlan {
        if name.is_empty() {
            return SlotPlan::Unset;
        }

        if let Some(file) = self.load_override(slot, name) {
            let color = file.header.rail_color;
            if color != 0 {
                match RailType::from_color(color) {
                    Some(from_file) => *rail_type = from_file,
                    None => warn!("slot {slot} ({name}): ignoring unknown rail color {color}"),
                }
            }
            debug!(
                "slot {slot} ({name}): {} entries from override file",
                file.entry_count()
            );
            return SlotPlan::File(file);
        }

        match slot {
            LIFT_SLOT => {
                debug!("slot {slot} ({name}): using the stock lift override");
                SlotPlan::Lift
            }
            RAIL_SLOT => match RailType::from_tileset_name(name.as_str()) {
                Some(stock) => {
                    debug!("slot {slot} ({name}): using the stock {stock:?} rail overrides");
                    *rail_type = stock;
                    SlotPlan::Rail(stock)
                }
                None => SlotPlan::Empty,
            },
            _ => SlotPlan::Empty,
        }
    }

    fn load_override(&self, slot: usize, name: &TilesetName) -> Option<OverrideFile> {
        let Some(bytes) = self
            .resources
            .lookup(name.as_str(), ResourcePurpose::OverrideFile)
        else {
            debug!("slot {slot} ({name}): no override file");
            return None;
        };

        match OverrideFile::decode(&bytes, self.config.expected_version) {
            Ok(file) => Some(file),
            Err(err) => {
                warn!("slot {slot} ({name}): {err}; treating as absent");
                None
            }
        }
    }
}

/// Resolve `tilesets` with the default configuration.
pub fn resolve_overrides<R: ResourceAccessor + ?Sized>(
    tilesets: &ZoneTilesets,
    resources: &R,
) -> Resolution {
    OverrideResolver::new(resources).resolve(tilesets)
}
