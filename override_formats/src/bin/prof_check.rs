use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use override_formats::{FORMAT_VERSION, FileCheck, check_override_file};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(about = "Validate every tile override file under a directory", version)]
struct Args {
    /// Directory containing extracted tileset archives (recursively scanned)
    #[arg(long, value_name = "DIR")]
    root: PathBuf,

    /// File name that marks an override resource
    #[arg(long, default_value = "override.bin")]
    file_name: String,

    /// Format version the files must carry
    #[arg(long, default_value_t = FORMAT_VERSION)]
    expected_version: u16,

    /// Optional path to write the report as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !args.root.is_dir() {
        bail!("{} is not a directory", args.root.display());
    }

    let mut checks: Vec<FileCheck> = Vec::new();
    for entry in WalkDir::new(&args.root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", args.root.display()))?;
        if !entry.file_type().is_file() || entry.file_name() != args.file_name.as_str() {
            continue;
        }
        checks.push(check_override_file(entry.path(), args.expected_version)?);
    }

    let mut failures = 0;
    for check in &checks {
        match &check.problem {
            Some(problem) => {
                failures += 1;
                println!("FAIL {} ({problem})", check.path.display());
            }
            None => println!(
                "ok   {} ({} entries, rail color {})",
                check.path.display(),
                check.entries,
                check.rail_color.unwrap_or(0)
            ),
        }
    }
    println!("{} files checked, {failures} rejected", checks.len());

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&checks)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
