use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use log::warn;

/// What a resource lookup is for. Each purpose lives at a fixed path inside
/// the tileset archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourcePurpose {
    OverrideFile,
}

impl ResourcePurpose {
    pub fn relative_path(self) -> &'static str {
        match self {
            ResourcePurpose::OverrideFile => "BG_prof/override.bin",
        }
    }
}

/// Resolves a tileset name to the bytes of one of its resources.
pub trait ResourceAccessor {
    fn lookup(&self, name: &str, purpose: ResourcePurpose) -> Option<Cow<'_, [u8]>>;
}

impl<T: ResourceAccessor + ?Sized> ResourceAccessor for &T {
    fn lookup(&self, name: &str, purpose: ResourcePurpose) -> Option<Cow<'_, [u8]>> {
        (**self).lookup(name, purpose)
    }
}

/// Resources held in memory, keyed by tileset name.
#[derive(Debug, Default, Clone)]
pub struct MemoryResources {
    blobs: HashMap<(String, ResourcePurpose), Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, purpose: ResourcePurpose, bytes: Vec<u8>) {
        self.blobs.insert((name.into(), purpose), bytes);
    }

    pub fn with(
        mut self,
        name: impl Into<String>,
        purpose: ResourcePurpose,
        bytes: Vec<u8>,
    ) -> Self {
        self.insert(name, purpose, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl ResourceAccessor for MemoryResources {
    fn lookup(&self, name: &str, purpose: ResourcePurpose) -> Option<Cow<'_, [u8]>> {
        self.blobs
            .get(&(name.to_string(), purpose))
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
    }
}

/// Extracted tileset archives on disk: `<root>/<tileset>/<purpose path>`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            bail!("{} is not a directory", root.display());
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Path a lookup would read, or `None` when `name` would escape the root.
    pub fn path_for(&self, name: &str, purpose: ResourcePurpose) -> Option<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return None;
        }
        Some(self.root.join(name).join(purpose.relative_path()))
    }
}

impl ResourceAccessor for DirectoryResources {
    fn lookup(&self, name: &str, purpose: ResourcePurpose) -> Option<Cow<'_, [u8]>> {
        let Some(path) = self.path_for(name, purpose) else {
            warn!("refusing to look up tileset `{name}` outside the resource root");
            return None;
        };
        match fs::read(&path) {
            Ok(bytes) => Some(Cow::Owned(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!("failed to read {}: {err}", path.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_lookup_is_exact() {
        let resources =
            MemoryResources::new().with("Pa1_nohara", ResourcePurpose::OverrideFile, vec![1, 2, 3]);
        assert_eq!(resources.len(), 1);
        assert_eq!(
            resources
                .lookup("Pa1_nohara", ResourcePurpose::OverrideFile)
                .as_deref(),
            Some(&[1u8, 2, 3][..])
        );
        assert!(resources
            .lookup("pa1_nohara", ResourcePurpose::OverrideFile)
            .is_none());
    }

    #[test]
    fn directory_lookup_reads_archive_subpath() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Pa2_sora").join("BG_prof").join("override.bin");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, [9u8, 8, 7]).unwrap();

        let resources = DirectoryResources::open(dir.path()).unwrap();
        assert_eq!(
            resources
                .lookup("Pa2_sora", ResourcePurpose::OverrideFile)
                .as_deref(),
            Some(&[9u8, 8, 7][..])
        );
        assert!(resources
            .lookup("Pa2_missing", ResourcePurpose::OverrideFile)
            .is_none());
    }

    #[test]
    fn directory_lookup_stays_under_root() {
        let dir = tempdir().unwrap();
        let resources = DirectoryResources::open(dir.path()).unwrap();
        assert!(resources.path_for("..", ResourcePurpose::OverrideFile).is_none());
        assert!(resources.path_for("a/b", ResourcePurpose::OverrideFile).is_none());
        assert!(resources
            .lookup("../etc", ResourcePurpose::OverrideFile)
            .is_none());
    }

    #[test]
    fn open_requires_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(DirectoryResources::open(&missing).is_err());
    }
}
