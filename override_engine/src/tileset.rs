use std::fmt;

use log::warn;
use serde::Serialize;
use thiserror::Error;

pub const SLOT_COUNT: usize = 4;

/// Bytes reserved per slot in the zone's tileset block.
pub const NAME_CAPACITY: usize = 32;

pub const LIFT_SLOT: usize = 0;
pub const RAIL_SLOT: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TilesetNameError {
    #[error("tileset name `{name}` is {len} bytes, at most {} fit in a slot", NAME_CAPACITY)]
    TooLong { name: String, len: usize },
    #[error("tileset name `{0}` contains a NUL byte")]
    InteriorNul(String),
    #[error("tileset name bytes {0:?} are not valid UTF-8")]
    InvalidUtf8(Vec<u8>),
}

/// Name of the tileset archive assigned to one slot. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TilesetName(String);

impl TilesetName {
    pub fn new(name: &str) -> Result<Self, TilesetNameError> {
        if name.len() > NAME_CAPACITY {
            return Err(TilesetNameError::TooLong {
                name: name.to_string(),
                len: name.len(),
            });
        }
        if name.contains('\0') {
            return Err(TilesetNameError::InteriorNul(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// Decode a NUL-terminated slot. A slot without a terminator uses all
    /// of its bytes.
    pub fn from_raw(raw: &[u8]) -> Result<Self, TilesetNameError> {
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let name = std::str::from_utf8(&raw[..end])
            .map_err(|_| TilesetNameError::InvalidUtf8(raw[..end].to_vec()))?;
        Self::new(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TilesetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl TryFrom<&str> for TilesetName {
    type Error = TilesetNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        TilesetName::new(value)
    }
}

/// The four tileset slots (Pa0..Pa3) of a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneTilesets {
    slots: [TilesetName; SLOT_COUNT],
}

impl ZoneTilesets {
    pub fn new(names: [&str; SLOT_COUNT]) -> Result<Self, TilesetNameError> {
        let [a, b, c, d] = names;
        Ok(Self {
            slots: [
                TilesetName::new(a)?,
                TilesetName::new(b)?,
                TilesetName::new(c)?,
                TilesetName::new(d)?,
            ],
        })
    }

    /// Decode the zone's raw `4 x 32` byte name block. Slots that do not
    /// hold a usable name are left unset.
    pub fn from_raw(raw: &[u8; SLOT_COUNT * NAME_CAPACITY]) -> Self {
        let mut chunks = raw.chunks_exact(NAME_CAPACITY).enumerate();
        let slots = std::array::from_fn(|_| {
            let Some((slot, chunk)) = chunks.next() else {
                return TilesetName::default();
            };
            TilesetName::from_raw(chunk).unwrap_or_else(|err| {
                warn!("slot {slot}: {err}; leaving it unset");
                TilesetName::default()
            })
        });
        Self { slots }
    }

    pub fn slot(&self, index: usize) -> Option<&TilesetName> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[TilesetName; SLOT_COUNT] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &TilesetName> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_block_matches_constructed_names() {
        let mut raw = [0u8; SLOT_COUNT * NAME_CAPACITY];
        raw[..10].copy_from_slice(b"Pa0_jyotyu");
        raw[3 * NAME_CAPACITY..3 * NAME_CAPACITY + 4].copy_from_slice(b"rail");

        let decoded = ZoneTilesets::from_raw(&raw);
        let built = ZoneTilesets::new(["Pa0_jyotyu", "", "", "rail"]).unwrap();
        assert_eq!(decoded, built);
        assert!(decoded.slot(1).unwrap().is_empty());
        assert_eq!(decoded.slot(3).unwrap().as_str(), "rail");
        assert!(decoded.slot(4).is_none());
    }

    #[test]
    fn unterminated_raw_slot_uses_full_width() {
        let mut raw = [0u8; SLOT_COUNT * NAME_CAPACITY];
        raw[NAME_CAPACITY..2 * NAME_CAPACITY].fill(b'x');
        let decoded = ZoneTilesets::from_raw(&raw);
        assert_eq!(decoded.slot(1).unwrap().as_str().len(), NAME_CAPACITY);
        assert!(decoded.slot(2).unwrap().is_empty());
    }

    #[test]
    fn non_utf8_raw_slot_is_left_unset() {
        let mut raw = [0u8; SLOT_COUNT * NAME_CAPACITY];
        raw[..NAME_CAPACITY].fill(0xFF);
        raw[NAME_CAPACITY..NAME_CAPACITY + 3].copy_from_slice(b"P\xFEa");
        raw[3 * NAME_CAPACITY..3 * NAME_CAPACITY + 4].copy_from_slice(b"rail");

        let decoded = ZoneTilesets::from_raw(&raw);
        assert_eq!(decoded, ZoneTilesets::new(["", "", "", "rail"]).unwrap());
        assert!(decoded.iter().all(|name| name.as_str().len() <= NAME_CAPACITY));
    }

    #[test]
    fn raw_names_are_compared_byte_for_byte() {
        assert_eq!(
            TilesetName::from_raw(b"P\xFEa"),
            Err(TilesetNameError::InvalidUtf8(b"P\xFEa".to_vec()))
        );
        assert_ne!(TilesetName::from_raw(b"P\xFEa"), TilesetName::from_raw(b"P\xFFa"));

        // Each byte survives as written; nothing is replaced or widened.
        let accented = "Pa1_caf\u{e9}".as_bytes();
        let name = TilesetName::from_raw(accented).unwrap();
        assert_eq!(name.as_str().as_bytes(), accented);
        assert_ne!(name, TilesetName::from_raw(b"Pa1_cafe").unwrap());
    }

    #[test]
    fn rejects_names_that_do_not_fit() {
        let long = "a".repeat(NAME_CAPACITY + 1);
        assert!(matches!(
            TilesetName::new(&long),
            Err(TilesetNameError::TooLong { len: 33, .. })
        ));
        assert!(TilesetName::new(&"a".repeat(NAME_CAPACITY)).is_ok());
        assert!(matches!(
            TilesetName::try_from("rail\0x"),
            Err(TilesetNameError::InteriorNul(_))
        ));
        assert!(ZoneTilesets::new(["", "", "", long.as_str()]).is_err());
    }
}
