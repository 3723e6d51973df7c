use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use override_engine::{
    DirectoryResources, RailType, SlotSource, ZoneLifecycle, ZoneReport, ZoneTilesets,
};
use override_formats::RuntimeOverrideRecord;
use serde::Serialize;

mod cli;
use cli::Args;

#[derive(Serialize)]
struct TableManifest<'a> {
    tilesets: &'a ZoneTilesets,
    report: &'a ZoneReport,
    records: &'a [RuntimeOverrideRecord],
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tilesets = args.zone_tilesets()?;
    let resources = DirectoryResources::open(&args.res_root)
        .with_context(|| format!("opening resource root {}", args.res_root.display()))?;
    let mut lifecycle = ZoneLifecycle::with_config(resources, args.resolver_config());

    let report = lifecycle.on_zone_built(&tilesets);
    print_report(&tilesets, &report);

    let records = lifecycle.actor_manager().object_list();
    if args.verbose {
        for (index, record) in records.iter().enumerate() {
            println!(
                "  [{index:>3}] tile {:#06x} profile {:>5}{}",
                record.tile,
                record.profile_id,
                if record.is_sentinel() { " (end)" } else { "" }
            );
        }
    }

    if let Some(path) = &args.json {
        let manifest = TableManifest {
            tilesets: &tilesets,
            report: &report,
            records,
        };
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    lifecycle.on_zone_destroyed();
    Ok(())
}

fn print_report(tilesets: &ZoneTilesets, report: &ZoneReport) {
    for (slot, (name, source)) in tilesets.iter().zip(&report.slots).enumerate() {
        let detail = match source {
            SlotSource::Unset => String::from("unset"),
            SlotSource::File {
                entries,
                rail_color,
            } => format!("override file, {entries} entries, rail color {rail_color}"),
            SlotSource::LiftDefault => String::from("stock lift override"),
            SlotSource::RailDefault { rail_type } => {
                format!("stock {rail_type:?} rail overrides")
            }
            SlotSource::Empty => String::from("no overrides"),
        };
        println!("Pa{slot} {name:<32} {detail}");
    }

    let rail = match report.rail_type {
        RailType::None => String::from("none"),
        other => format!("{other:?}"),
    };
    match report.installed_records {
        Some(len) => println!("rail type {rail}, {len} records installed (sentinel included)"),
        None => println!("rail type {rail}, no table installed; default object list kept"),
    }
}
