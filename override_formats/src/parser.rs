use crate::locale::remap_profile_id;
use crate::override_file::OverrideEntry;
use crate::record::RuntimeOverrideRecord;

pub fn parse_entry(entry: &OverrideEntry) -> RuntimeOverrideRecord {
    RuntimeOverrideRecord {
        tile: entry.tile,
        profile_id: remap_profile_id(entry.profile_id, entry.locale),
        payload: entry.payload,
    }
}

/// Convert raw entries into runtime records, writing into `out`.
///
/// `out` must have room for every entry; extra slots are left untouched.
pub fn parse_entries_into(entries: &[OverrideEntry], out: &mut [RuntimeOverrideRecord]) {
    debug_assert!(
        out.len() >= entries.len(),
        "output holds {} records but {} entries were given",
        out.len(),
        entries.len()
    );
    for (dest, entry) in out.iter_mut().zip(entries) {
        *dest = parse_entry(entry);
    }
}

pub fn parse_entries(entries: &[OverrideEntry]) -> Vec<RuntimeOverrideRecord> {
    entries.iter().map(parse_entry).collect()
}
