pub mod locale;
pub mod override_file;
pub mod parser;
pub mod record;

pub use locale::{LocaleTag, ProfileShift, remap_profile_id};
pub use override_file::{
    ENTRY_SIZE, FORMAT_VERSION, FileCheck, HEADER_SIZE, MIN_FILE_SIZE, OverrideEntry,
    OverrideFile, OverrideFileError, OverrideHeader, check_override_file, entry_count_for_len,
    peek_override_header,
};
pub use parser::{parse_entries, parse_entries_into, parse_entry};
pub use record::{DUMMY_ACTOR, PAYLOAD_SIZE, Payload, RuntimeOverrideRecord};
