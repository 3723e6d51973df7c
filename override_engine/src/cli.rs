use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use override_engine::{ResolverConfig, ZoneTilesets, SLOT_COUNT};
use override_formats::FORMAT_VERSION;

#[derive(Parser, Debug)]
#[command(
    about = "Resolve the tile override table a zone would install",
    version
)]
pub struct Args {
    /// Directory containing extracted tileset archives
    #[arg(long, default_value = "extracted/Stage/Texture")]
    pub res_root: PathBuf,

    /// Tileset names for slots Pa0..Pa3 (`-` leaves a slot unset)
    #[arg(value_name = "TILESET")]
    pub tilesets: Vec<String>,

    /// Override file version to accept
    #[arg(long, default_value_t = FORMAT_VERSION)]
    pub expected_version: u16,

    /// Path to write the resolved table as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Print every record instead of the per-slot summary only
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    pub fn zone_tilesets(&self) -> Result<ZoneTilesets> {
        if self.tilesets.len() > SLOT_COUNT {
            bail!(
                "a zone has {SLOT_COUNT} tileset slots, got {} names",
                self.tilesets.len()
            );
        }
        let mut names = [""; SLOT_COUNT];
        for (slot, name) in self.tilesets.iter().enumerate() {
            if name != "-" {
                names[slot] = name.as_str();
            }
        }
        ZoneTilesets::new(names).context("invalid tileset name")
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            expected_version: self.expected_version,
        }
    }
}
