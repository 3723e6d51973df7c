//! Per-tileset override file (`BG_prof/override.bin`).
//!
//! Layout, big-endian:
//!   [0..2]  format version
//!   [2]     rail color (0 = leave the zone's rail type alone)
//!   [3]     reserved
//!   [4..]   entries, `ENTRY_SIZE` bytes each:
//!           tile u16, profile u16, locale u8, pad u8, payload[0x18]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use byteorder::{BigEndian, ByteOrder};
use serde::Serialize;
use thiserror::Error;

use crate::locale::LocaleTag;
use crate::record::{PAYLOAD_SIZE, Payload};

/// Format revision understood by this build.
pub const FORMAT_VERSION: u16 = 1;

pub const HEADER_SIZE: usize = 4;

pub const ENTRY_SIZE: usize = 2 + 2 + 1 + 1 + PAYLOAD_SIZE;

/// Anything shorter cannot hold a header and a single entry.
pub const MIN_FILE_SIZE: usize = HEADER_SIZE + ENTRY_SIZE;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverrideFileError {
    #[error("override file is {len} bytes, expected at least {}", MIN_FILE_SIZE)]
    Truncated { len: usize },
    #[error("override file version {found} does not match expected version {expected}")]
    VersionMismatch { expected: u16, found: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideHeader {
    pub version: u16,
    pub rail_color: u8,
}

/// Entry as authored on disk, before locale remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideEntry {
    pub tile: u16,
    pub profile_id: u16,
    pub locale: LocaleTag,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideFile {
    pub header: OverrideHeader,
    pub entries: Vec<OverrideEntry>,
}

/// Number of whole entries a blob of `len` bytes carries.
pub fn entry_count_for_len(len: usize) -> usize {
    len.saturating_sub(HEADER_SIZE) / ENTRY_SIZE
}

pub fn peek_override_header(bytes: &[u8]) -> Result<OverrideHeader, OverrideFileError> {
    if bytes.len() < MIN_FILE_SIZE {
        return Err(OverrideFileError::Truncated { len: bytes.len() });
    }
    Ok(OverrideHeader {
        version: BigEndian::read_u16(&bytes[0..2]),
        rail_color: bytes[2],
    })
}

impl OverrideFile {
    /// Read and decode an override file from disk.
    pub fn open<P: AsRef<Path>>(path: P, expected_version: u16) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("reading override file {}", path.display()))?;
        let file = Self::decode(&bytes, expected_version)
            .with_context(|| format!("decoding override file {}", path.display()))?;
        Ok(file)
    }

    /// Decode an override blob. Bytes past the last whole entry are ignored.
    pub fn decode(bytes: &[u8], expected_version: u16) -> Result<Self, OverrideFileError> {
        let header = peek_override_header(bytes)?;
        if header.version != expected_version {
            return Err(OverrideFileError::VersionMismatch {
                expected: expected_version,
                found: header.version,
            });
        }

        let entries = bytes[HEADER_SIZE..]
            .chunks_exact(ENTRY_SIZE)
            .map(decode_entry)
            .collect();

        Ok(Self { header, entries })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.entries.len() * ENTRY_SIZE);
        out.extend_from_slice(&self.header.version.to_be_bytes());
        out.push(self.header.rail_color);
        out.push(0);
        for entry in &self.entries {
            out.extend_from_slice(&entry.tile.to_be_bytes());
            out.extend_from_slice(&entry.profile_id.to_be_bytes());
            out.push(entry.locale.to_byte());
            out.push(0);
            out.extend_from_slice(entry.payload.as_bytes());
        }
        out
    }
}

/// Outcome of validating one override file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCheck {
    pub path: PathBuf,
    pub len: usize,
    /// Whole entries present; 0 when the file cannot even hold one.
    pub entries: usize,
    pub rail_color: Option<u8>,
    pub problem: Option<OverrideFileError>,
}

impl FileCheck {
    pub fn is_ok(&self) -> bool {
        self.problem.is_none()
    }
}

/// Validate an override file the way the resolver would read it. A version
/// mismatch still reports the entry count the file carries.
pub fn check_override_file(path: &Path, expected_version: u16) -> Result<FileCheck> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut check = FileCheck {
        path: path.to_path_buf(),
        len: bytes.len(),
        entries: entry_count_for_len(bytes.len()),
        rail_color: None,
        problem: None,
    };

    match OverrideFile::decode(&bytes, expected_version) {
        Ok(file) => check.rail_color = Some(file.header.rail_color),
        Err(err @ OverrideFileError::Truncated { .. }) => {
            check.entries = 0;
            check.problem = Some(err);
        }
        Err(err) => check.problem = Some(err),
    }

    Ok(check)
}

fn decode_entry(chunk: &[u8]) -> OverrideEntry {
    let mut payload = [0u8; PAYLOAD_SIZE];
    payload.copy_from_slice(&chunk[6..ENTRY_SIZE]);
    OverrideEntry {
        tile: BigEndian::read_u16(&chunk[0..2]),
        profile_id: BigEndian::read_u16(&chunk[2..4]),
        locale: LocaleTag::from_byte(chunk[4]),
        payload: Payload(payload),
    }
}
