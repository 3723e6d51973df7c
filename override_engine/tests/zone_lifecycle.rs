use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use override_engine::{
    rail_defaults, DirectoryResources, RailType, ResourcePurpose, SlotSource, ZoneLifecycle,
    ZoneTilesets,
};
use override_formats::{
    LocaleTag, OverrideEntry, OverrideFile, OverrideHeader, Payload, DUMMY_ACTOR, FORMAT_VERSION,
    PAYLOAD_SIZE,
};
use tempfile::tempdir;

fn write_override(root: &Path, tileset: &str, file: &OverrideFile) -> Result<()> {
    let path = root
        .join(tileset)
        .join(ResourcePurpose::OverrideFile.relative_path());
    let parent = path.parent().context("override path has a parent")?;
    fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    fs::write(&path, file.encode()).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn payload_for(seed: u8) -> Payload {
    let mut bytes = [0u8; PAYLOAD_SIZE];
    for (index, byte) in bytes.iter_mut().enumerate() {
        *byte = seed ^ (index as u8).wrapping_mul(17);
    }
    Payload(bytes)
}

fn forest_overrides() -> OverrideFile {
    OverrideFile {
        header: OverrideHeader {
            version: FORMAT_VERSION,
            rail_color: 3,
        },
        entries: vec![
            OverrideEntry {
                tile: 0x0140,
                profile_id: 620,
                locale: LocaleTag::Chinese,
                payload: payload_for(1),
            },
            OverrideEntry {
                tile: 0x0141,
                profile_id: 704,
                locale: LocaleTag::Chinese,
                payload: payload_for(2),
            },
            OverrideEntry {
                tile: 0x0142,
                profile_id: 702,
                locale: LocaleTag::Korean,
                payload: payload_for(3),
            },
        ],
    }
}

#[test]
fn resolves_zone_from_extracted_archives() -> Result<()> {
    let dir = tempdir()?;
    write_override(dir.path(), "Pa1_forest", &forest_overrides())?;

    let resources = DirectoryResources::open(dir.path())?;
    let mut lifecycle = ZoneLifecycle::new(resources);
    let tilesets = ZoneTilesets::new(["Pa0_jyotyu", "Pa1_forest", "", "rail-minigame"])?;
    let report = lifecycle.on_zone_built(&tilesets);

    assert_eq!(report.slots[0], SlotSource::LiftDefault);
    assert_eq!(
        report.slots[1],
        SlotSource::File {
            entries: 3,
            rail_color: 3
        }
    );
    assert_eq!(report.slots[2], SlotSource::Unset);
    // The stock rail name wins because slot 3 is inspected last.
    assert_eq!(report.rail_type, RailType::Minigame);
    assert_eq!(report.installed_records, Some(1 + 3 + 19 + 1));

    let table = lifecycle
        .actor_manager()
        .installed()
        .context("table should be installed")?;
    let forest = &table.entries()[1..4];
    let ids: Vec<u16> = forest.iter().map(|record| record.profile_id).collect();
    assert_eq!(ids, vec![620, 708, 704]);
    for (record, seed) in forest.iter().zip(1u8..) {
        assert_eq!(record.payload, payload_for(seed));
    }
    assert_eq!(&table.entries()[4..], rail_defaults(RailType::Minigame));
    assert_eq!(table.sentinel().profile_id, DUMMY_ACTOR);

    assert!(lifecycle.on_zone_destroyed());
    Ok(())
}

#[test]
fn stale_file_on_disk_falls_back() -> Result<()> {
    let dir = tempdir()?;
    let mut stale = forest_overrides();
    stale.header.version = FORMAT_VERSION + 1;
    write_override(dir.path(), "Pa0_stale", &stale)?;
    write_override(dir.path(), "rail", &stale)?;

    let mut lifecycle = ZoneLifecycle::new(DirectoryResources::open(dir.path())?);
    let report = lifecycle.on_zone_built(&ZoneTilesets::new(["Pa0_stale", "", "", "rail"])?);

    assert_eq!(report.slots[0], SlotSource::LiftDefault);
    assert_eq!(
        report.slots[3],
        SlotSource::RailDefault {
            rail_type: RailType::Default
        }
    );
    assert_eq!(report.rail_type, RailType::Default);
    Ok(())
}

#[test]
fn repeated_zone_cycles_balance_allocations() -> Result<()> {
    let dir = tempdir()?;
    write_override(dir.path(), "Pa1_forest", &forest_overrides())?;
    let mut lifecycle = ZoneLifecycle::new(DirectoryResources::open(dir.path())?);

    let configurations = [
        ["", "", "", ""],
        ["Pa0_jyotyu", "", "", ""],
        ["Pa0_jyotyu", "Pa1_forest", "", "rail"],
        ["", "Pa1_forest", "Pa1_forest", "rail-white"],
        ["", "", "", "Pa3_unknown"],
    ];
    for names in configurations {
        let report = lifecycle.on_zone_built(&ZoneTilesets::new(names)?);
        let installed = lifecycle
            .actor_manager()
            .installed()
            .context("every configuration installs a table")?;
        assert_eq!(Some(installed.len()), report.installed_records);
        assert!(installed.records().last().is_some_and(|r| r.is_sentinel()));
        assert!(lifecycle.on_zone_destroyed());
    }

    let manager = lifecycle.actor_manager();
    assert_eq!(manager.tables_installed(), configurations.len());
    assert_eq!(manager.tables_released(), configurations.len());
    assert!(manager.installed().is_none());
    Ok(())
}
