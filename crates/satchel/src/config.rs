use crate::db::Db;
use crate::entity::{table_name, Entity};

use satchel_core::{Error, Result};

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub(crate) enum Location {
    File(PathBuf),
    InMemory,
}

/// Database configuration: where the file lives, the schema version, the
/// registered entity types, and the primary-key strictness flag.
pub struct DbConfig {
    pub(crate) location: Location,
    pub(crate) version: u32,
    pub(crate) tables: Vec<TableRegistration>,
    pub(crate) strict_primary_keys: bool,
}

impl DbConfig {
    pub fn builder() -> Builder {
        Builder::default()
    }
}

/// Builder for [`DbConfig`].
#[derive(Default)]
pub struct Builder {
    location: Option<Location>,
    version: Option<u32>,
    tables: Vec<TableRegistration>,
    strict_primary_keys: bool,
}

impl Builder {
    /// Use a database file at the given path.
    pub fn database(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(Location::File(path.into()));
        self
    }

    /// Use an in-memory database.
    pub fn in_memory(mut self) -> Self {
        self.location = Some(Location::InMemory);
        self
    }

    /// Schema version, stamped into `PRAGMA user_version`. Defaults to 1.
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Registers an entity type; its table is created on first open and
    /// upgraded (or recreated) on a version bump.
    pub fn table<T: Entity>(mut self) -> Self {
        self.tables.push(TableRegistration::of::<T>());
        self
    }

    /// Rejects entity descriptors with more than one primary-key column.
    /// Off by default; the lax default only rejects the zero-key case.
    pub fn strict_primary_keys(mut self, strict: bool) -> Self {
        self.strict_primary_keys = strict;
        self
    }

    pub fn build(self) -> Result<DbConfig> {
        let location = self
            .location
            .ok_or_else(|| Error::state("no database location configured"))?;
        Ok(DbConfig {
            location,
            version: self.version.unwrap_or(1),
            tables: self.tables,
            strict_primary_keys: self.strict_primary_keys,
        })
    }
}

/// Monomorphized schema hooks for one registered entity type.
pub(crate) struct TableRegistration {
    pub(crate) table_name: fn() -> String,
    pub(crate) create: fn(&Db) -> Result<()>,
    pub(crate) upgrade: fn(&Db) -> Result<()>,
    pub(crate) recreate: fn(&Db) -> Result<()>,
    pub(crate) recreate_on_upgrade: bool,
}

impl TableRegistration {
    fn of<T: Entity>() -> Self {
        Self {
            table_name: table_name::<T>,
            create: Db::create_table::<T>,
            upgrade: Db::upgrade_table::<T>,
            recreate: Db::recreate_table::<T>,
            recreate_on_upgrade: T::RECREATE_ON_UPGRADE,
        }
    }
}
