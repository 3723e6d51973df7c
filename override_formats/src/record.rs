use serde::{Serialize, Serializer};

/// Size of the placement block carried by every override record.
pub const PAYLOAD_SIZE: usize = 0x18;

/// Profile identifier reserved for the end-of-table marker.
pub const DUMMY_ACTOR: u16 = 0x2EE;

/// Opaque placement data (offsets, extents and spawn flags).
///
/// The actor manager interprets these bytes; the override engine only moves
/// them around, so they are kept as a raw block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Payload(pub [u8; PAYLOAD_SIZE]);

impl Payload {
    pub const ZERO: Payload = Payload([0; PAYLOAD_SIZE]);

    /// Pack six big-endian words into a payload block.
    pub const fn from_words(words: [u32; 6]) -> Self {
        let mut bytes = [0u8; PAYLOAD_SIZE];
        let mut index = 0;
        while index < words.len() {
            let word = words[index].to_be_bytes();
            bytes[index * 4] = word[0];
            bytes[index * 4 + 1] = word[1];
            bytes[index * 4 + 2] = word[2];
            bytes[index * 4 + 3] = word[3];
            index += 1;
        }
        Payload(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PAYLOAD_SIZE] {
        &self.0
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let hex: String = self.0.iter().map(|byte| format!("{byte:02x}")).collect();
        serializer.serialize_str(&hex)
    }
}

/// One row of the tile-to-actor table handed to the actor manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RuntimeOverrideRecord {
    pub tile: u16,
    pub profile_id: u16,
    pub payload: Payload,
}

impl RuntimeOverrideRecord {
    /// Zeroed record used to pre-fill freshly allocated tables.
    pub const EMPTY: RuntimeOverrideRecord = RuntimeOverrideRecord::new(0, 0, Payload::ZERO);

    pub const fn new(tile: u16, profile_id: u16, payload: Payload) -> Self {
        Self {
            tile,
            profile_id,
            payload,
        }
    }

    /// End-of-table marker. Only the profile identifier is meaningful.
    pub const fn sentinel() -> Self {
        Self::new(0, DUMMY_ACTOR, Payload::ZERO)
    }

    pub fn is_sentinel(&self) -> bool {
        self.profile_id == DUMMY_ACTOR
    }
}
