use override_formats::RuntimeOverrideRecord;
use thiserror::Error;

use crate::fallback::{RailType, DEFAULT_OBJECT_LIST};

/// Sentinel-terminated override table for one zone.
///
/// Move-only: the actor manager holds the single live copy and dropping it is
/// the release.
#[derive(Debug, PartialEq, Eq)]
pub struct OverrideTable {
    records: Box<[RuntimeOverrideRecord]>,
}

impl OverrideTable {
    /// `records` must end with the sentinel.
    pub(crate) fn from_records(records: Vec<RuntimeOverrideRecord>) -> Self {
        debug_assert!(
            records.last().is_some_and(RuntimeOverrideRecord::is_sentinel),
            "override table must end with the sentinel record"
        );
        Self {
            records: records.into_boxed_slice(),
        }
    }

    /// Every record, sentinel included.
    pub fn records(&self) -> &[RuntimeOverrideRecord] {
        &self.records
    }

    /// Records contributed by the slots, without the sentinel.
    pub fn entries(&self) -> &[RuntimeOverrideRecord] {
        &self.records[..self.records.len() - 1]
    }

    pub fn sentinel(&self) -> &RuntimeOverrideRecord {
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("an override table of {} records is already installed", .installed)]
    AlreadyInstalled {
        installed: usize,
        rejected: OverrideTable,
    },
}

/// The actor manager's view of the zone: current object list and rail type.
#[derive(Debug)]
pub struct ActorManager {
    installed: Option<OverrideTable>,
    default_list: &'static [RuntimeOverrideRecord],
    rail_type: RailType,
    tables_installed: usize,
    tables_released: usize,
}

impl Default for ActorManager {
    fn default() -> Self {
        Self::with_default_list(&DEFAULT_OBJECT_LIST)
    }
}

impl ActorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_list(default_list: &'static [RuntimeOverrideRecord]) -> Self {
        Self {
            installed: None,
            default_list,
            rail_type: RailType::None,
            tables_installed: 0,
            tables_released: 0,
        }
    }

    /// Table actors are spawned from: the installed override table, or the
    /// default list when none is installed.
    pub fn object_list(&self) -> &[RuntimeOverrideRecord] {
        match &self.installed {
            Some(table) => table.records(),
            None => self.default_list,
        }
    }

    pub fn installed(&self) -> Option<&OverrideTable> {
        self.installed.as_ref()
    }

    pub fn rail_type(&self) -> RailType {
        self.rail_type
    }

    pub fn set_rail_type(&mut self, rail_type: RailType) {
        self.rail_type = rail_type;
    }

    /// Take ownership of `table`. The previous table has to be released first.
    pub fn install(&mut self, table: OverrideTable) -> Result<(), InstallError> {
        if let Some(current) = &self.installed {
            return Err(InstallError::AlreadyInstalled {
                installed: current.len(),
                rejected: table,
            });
        }
        self.installed = Some(table);
        self.tables_installed += 1;
        Ok(())
    }

    /// Install `table`, first releasing whatever table is still installed.
    /// Returns true when a stale table had to be released.
    pub fn install_replacing(&mut self, table: OverrideTable) -> bool {
        let released = self.release();
        self.installed = Some(table);
        self.tables_installed += 1;
        released
    }

    /// Free the installed table. Returns false when there was nothing to free.
    pub fn release(&mut self) -> bool {
        match self.installed.take() {
            Some(table) => {
                drop(table);
                self.tables_released += 1;
                true
            }
            None => false,
        }
    }

    pub fn tables_installed(&self) -> usize {
        self.tables_installed
    }

    pub fn tables_released(&self) -> usize {
        self.tables_released
    }
}
