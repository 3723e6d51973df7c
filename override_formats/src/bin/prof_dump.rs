use std::env;

use anyhow::{Context, Result};
use override_formats::{FORMAT_VERSION, OverrideFile, parse_entry};

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .context("usage: prof_dump <override file>")?;
    let file = OverrideFile::open(&path, FORMAT_VERSION)?;
    println!(
        "{} entries in {} (version {}, rail color {})",
        file.entry_count(),
        path,
        file.header.version,
        file.header.rail_color
    );
    for entry in &file.entries {
        let record = parse_entry(entry);
        let payload: String = entry
            .payload
            .as_bytes()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();
        println!(
            "tile {tile:#06x} profile {raw:>5} -> {resolved:>5} {locale:<12} {payload}",
            tile = entry.tile,
            raw = entry.profile_id,
            resolved = record.profile_id,
            locale = format!("{:?}", entry.locale),
            payload = payload
        );
    }
    Ok(())
}
