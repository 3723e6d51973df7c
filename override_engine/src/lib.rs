//! Tile override resolution for level zones.
//!
//! Each zone names up to four tilesets. Every tileset may ship an override
//! file mapping tiles to actors; the resolver merges those files with the
//! built-in fallbacks into one sentinel-terminated table that the actor
//! manager owns until the zone is torn down.

pub mod fallback;
pub mod lifecycle;
pub mod resolver;
pub mod resources;
pub mod table;
pub mod tileset;

pub use fallback::{lift_default, rail_default_count, rail_defaults, RailType};
pub use lifecycle::{ZoneLifecycle, ZoneReport};
pub use resolver::{resolve_overrides, OverrideResolver, Resolution, ResolverConfig, SlotSource};
pub use resources::{DirectoryResources, MemoryResources, ResourceAccessor, ResourcePurpose};
pub use table::{ActorManager, InstallError, OverrideTable};
pub use tileset::{TilesetName, TilesetNameError, ZoneTilesets, LIFT_SLOT, RAIL_SLOT, SLOT_COUNT};
