use serde::Serialize;

/// Release region an on-disk profile identifier was authored against.
///
/// Profile numbering shifted in the Korean and Chinese releases, so override
/// files tag every entry with the numbering they use and the parser maps it
/// onto the running build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleTag {
    Original,
    Korean,
    Chinese,
    Unknown(u8),
}

/// Identifiers at or above `threshold` move up by `shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileShift {
    pub threshold: u16,
    pub shift: u16,
}

const KOREAN_SHIFTS: &[ProfileShift] = &[ProfileShift {
    threshold: 702,
    shift: 2,
}];

// Applied in order; the second check sees the result of the first.
const CHINESE_SHIFTS: &[ProfileShift] = &[
    ProfileShift {
        threshold: 621,
        shift: 2,
    },
    ProfileShift {
        threshold: 704,
        shift: 2,
    },
];

impl LocaleTag {
    pub const ORIGINAL_BYTE: u8 = 0;
    pub const KOREAN_BYTE: u8 = 1;
    pub const CHINESE_BYTE: u8 = 2;

    pub fn from_byte(value: u8) -> Self {
        match value {
            Self::ORIGINAL_BYTE => LocaleTag::Original,
            Self::KOREAN_BYTE => LocaleTag::Korean,
            Self::CHINESE_BYTE => LocaleTag::Chinese,
            other => LocaleTag::Unknown(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            LocaleTag::Original => Self::ORIGINAL_BYTE,
            LocaleTag::Korean => Self::KOREAN_BYTE,
            LocaleTag::Chinese => Self::CHINESE_BYTE,
            LocaleTag::Unknown(value) => value,
        }
    }

    pub fn shifts(self) -> &'static [ProfileShift] {
        match self {
            LocaleTag::Korean => KOREAN_SHIFTS,
            LocaleTag::Chinese => CHINESE_SHIFTS,
            LocaleTag::Original | LocaleTag::Unknown(_) => &[],
        }
    }
}

/// Map a profile identifier authored for `locale` onto the running numbering.
pub fn remap_profile_id(profile_id: u16, locale: LocaleTag) -> u16 {
    locale.shifts().iter().fold(profile_id, |id, step| {
        if id >= step.threshold {
            id.wrapping_add(step.shift)
        } else {
            id
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_shift_starts_at_702() {
        assert_eq!(remap_profile_id(701, LocaleTag::Korean), 701);
        assert_eq!(remap_profile_id(702, LocaleTag::Korean), 704);
        assert_eq!(remap_profile_id(0, LocaleTag::Korean), 0);
    }

    #[test]
    fn chinese_shifts_apply_in_sequence() {
        assert_eq!(remap_profile_id(620, LocaleTag::Chinese), 620);
        assert_eq!(remap_profile_id(621, LocaleTag::Chinese), 623);
        assert_eq!(remap_profile_id(701, LocaleTag::Chinese), 703);
        // 702 lands on 704 after the first step, so the second step fires too.
        assert_eq!(remap_profile_id(702, LocaleTag::Chinese), 706);
        assert_eq!(remap_profile_id(703, LocaleTag::Chinese), 707);
        assert_eq!(remap_profile_id(704, LocaleTag::Chinese), 708);
    }

    #[test]
    fn other_locales_leave_ids_alone() {
        for id in [0, 620, 621, 702, 704, u16::MAX] {
            assert_eq!(remap_profile_id(id, LocaleTag::Original), id);
            assert_eq!(remap_profile_id(id, LocaleTag::Unknown(9)), id);
        }
    }

    #[test]
    fn tag_bytes_are_stable() {
        for byte in 0..=u8::MAX {
            assert_eq!(LocaleTag::from_byte(byte).to_byte(), byte);
        }
        assert_eq!(LocaleTag::from_byte(1), LocaleTag::Korean);
        assert_eq!(LocaleTag::from_byte(2), LocaleTag::Chinese);
    }
}
