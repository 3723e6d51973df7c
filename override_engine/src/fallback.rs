//! Built-in override data used when a tileset ships no override file.
//!
//! Slot 0 falls back to the donut lift, slot 3 to one of the stock rail
//! layouts. Everything here is read-only.

use override_formats::{Payload, RuntimeOverrideRecord};
use serde::Serialize;

pub const PROFILE_DONUT_LIFT: u16 = 0x1E6;
pub const PROFILE_RAIL: u16 = 0x24B;

pub const LIFT_TILE: u16 = 0x003E;
pub const RAIL_TILE_BASE: u16 = 0x0300;

const TILE_PX: u32 = 16;
const RAIL_ROW_WIDTH: usize = 13;

pub const RAIL_DEFAULT_LEN: usize = 26;
pub const RAIL_WHITE_LEN: usize = 26;
pub const RAIL_NATURE_LEN: usize = 13;
pub const RAIL_MINIGAME_LEN: usize = 19;

/// Rail rendering variant for a zone. Also selects the slot 3 fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RailType {
    #[default]
    None = 0,
    Default = 1,
    White = 2,
    Nature = 3,
    Minigame = 4,
}

impl RailType {
    /// Interpret the rail color byte of an override file header.
    pub fn from_color(color: u8) -> Option<Self> {
        match color {
            0 => Some(RailType::None),
            1 => Some(RailType::Default),
            2 => Some(RailType::White),
            3 => Some(RailType::Nature),
            4 => Some(RailType::Minigame),
            _ => None,
        }
    }

    /// Stock tileset names that imply a rail variant. Matching is exact.
    pub fn from_tileset_name(name: &str) -> Option<Self> {
        match name {
            "rail" => Some(RailType::Default),
            "rail-white" => Some(RailType::White),
            "rail-nature" => Some(RailType::Nature),
            "rail-minigame" => Some(RailType::Minigame),
            _ => None,
        }
    }

    pub fn tileset_name(self) -> Option<&'static str> {
        match self {
            RailType::None => None,
            RailType::Default => Some("rail"),
            RailType::White => Some("rail-white"),
            RailType::Nature => Some("rail-nature"),
            RailType::Minigame => Some("rail-minigame"),
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

const LIFT_DEFAULT: RuntimeOverrideRecord = RuntimeOverrideRecord::new(
    LIFT_TILE,
    PROFILE_DONUT_LIFT,
    Payload::from_words([0, (-8i32) as u32, TILE_PX, TILE_PX, 0, 0]),
);

/// Rail pieces are laid out in rows of 13 tiles; the column picks the shape.
const fn rail_rows<const N: usize>(first_row: u16) -> [RuntimeOverrideRecord; N] {
    let mut out = [RuntimeOverrideRecord::EMPTY; N];
    let mut index = 0;
    while index < N {
        let row = (index / RAIL_ROW_WIDTH) as u16;
        let column = (index % RAIL_ROW_WIDTH) as u16;
        out[index] = RuntimeOverrideRecord::new(
            RAIL_TILE_BASE + (first_row + row) * 0x10 + column,
            PROFILE_RAIL,
            Payload::from_words([0, 0, TILE_PX, TILE_PX, column as u32, 0]),
        );
        index += 1;
    }
    out
}

static RAIL_DEFAULT: [RuntimeOverrideRecord; RAIL_DEFAULT_LEN] = rail_rows(0);
static RAIL_WHITE: [RuntimeOverrideRecord; RAIL_WHITE_LEN] = rail_rows(2);
static RAIL_NATURE: [RuntimeOverrideRecord; RAIL_NATURE_LEN] = rail_rows(4);
static RAIL_MINIGAME: [RuntimeOverrideRecord; RAIL_MINIGAME_LEN] = rail_rows(5);

const DEFAULT_OBJECT_LIST_LEN: usize = 1 + RAIL_DEFAULT_LEN + 1;

const fn default_object_list() -> [RuntimeOverrideRecord; DEFAULT_OBJECT_LIST_LEN] {
    let rails: [RuntimeOverrideRecord; RAIL_DEFAULT_LEN] = rail_rows(0);
    let mut out = [RuntimeOverrideRecord::sentinel(); DEFAULT_OBJECT_LIST_LEN];
    out[0] = LIFT_DEFAULT;
    let mut index = 0;
    while index < RAIL_DEFAULT_LEN {
        out[index + 1] = rails[index];
        index += 1;
    }
    out
}

/// Object list the actor manager serves while no override table is installed.
pub static DEFAULT_OBJECT_LIST: [RuntimeOverrideRecord; DEFAULT_OBJECT_LIST_LEN] =
    default_object_list();

pub fn lift_default() -> RuntimeOverrideRecord {
    LIFT_DEFAULT
}

/// Stock rail records for `rail_type`. `RailType::None` has none.
pub fn rail_defaults(rail_type: RailType) -> &'static [RuntimeOverrideRecord] {
    match rail_type {
        RailType::None => &[],
        RailType::Default => &RAIL_DEFAULT,
        RailType::White => &RAIL_WHITE,
        RailType::Nature => &RAIL_NATURE,
        RailType::Minigame => &RAIL_MINIGAME,
    }
}

pub fn rail_default_count(rail_type: RailType) -> usize {
    rail_defaults(rail_type).len()
}
