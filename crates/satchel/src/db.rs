use crate::config::{DbConfig, Location};
use crate::dao::Dao;
use crate::entity::Entity;

use satchel_core::{Error, Result};

use rusqlite::Connection;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// Lifecycle state of an opened handle. The third state of the lifecycle,
/// "not exists", is the empty process-wide slot before [`init`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleState {
    Exists,
    /// A schema mutation happened; the connection is revalidated the next
    /// time it is fetched.
    Updating,
}

pub(crate) struct Inner {
    pub(crate) conn: Connection,
    state: HandleState,
}

/// A database handle: one shared connection, synchronous and blocking on
/// the calling thread. Concurrent writers rely entirely on the engine's own
/// locking; callers are responsible for moving calls off latency-sensitive
/// threads.
pub struct Db {
    inner: Mutex<Inner>,
    dao_cache: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    pub(crate) strict_primary_keys: bool,
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("strict_primary_keys", &self.strict_primary_keys)
            .finish_non_exhaustive()
    }
}

impl Db {
    /// Opens the database and applies the create-vs-upgrade decision.
    ///
    /// A fresh database (`PRAGMA user_version` of 0) gets every registered
    /// table created; an older version gets each table additively upgraded,
    /// or dropped and recreated when the entity opts in. The configured
    /// version is stamped afterwards.
    pub fn open(config: DbConfig) -> Result<Arc<Db>> {
        let conn = match &config.location {
            Location::File(path) => Connection::open(path),
            Location::InMemory => Connection::open_in_memory(),
        }
        .map_err(Error::sql)?;

        let db = Arc::new(Db {
            inner: Mutex::new(Inner {
                conn,
                state: HandleState::Exists,
            }),
            dao_cache: Mutex::new(HashMap::new()),
            strict_primary_keys: config.strict_primary_keys,
        });

        db.apply_version(&config)?;

        Ok(db)
    }

    fn apply_version(&self, config: &DbConfig) -> Result<()> {
        let current: u32 = self
            .lock()?
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(Error::sql)?;

        if current == 0 {
            for table in &config.tables {
                (table.create)(self)?;
            }
        } else if config.version > current {
            for table in &config.tables {
                tracing::debug!(target: "satchel", table = %(table.table_name)(),
                    from = current, to = config.version, "upgrading table");
                if table.recreate_on_upgrade {
                    (table.recreate)(self)?;
                } else {
                    (table.upgrade)(self)?;
                }
            }
        }

        if current != config.version {
            self.lock()?
                .conn
                .pragma_update(None, "user_version", config.version)
                .map_err(Error::sql)?;
        }

        Ok(())
    }

    /// Fetches the connection, revalidating it first when a schema mutation
    /// left the handle in the updating state.
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        let mut guard = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        if guard.state == HandleState::Updating {
            guard
                .conn
                .query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
                .map_err(Error::sql)?;
            guard.state = HandleState::Exists;
        }
        Ok(guard)
    }

    pub(crate) fn mark_updating(&self) {
        let mut guard = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        guard.state = HandleState::Updating;
    }

    pub fn is_waiting_update(&self) -> bool {
        let guard = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        guard.state == HandleState::Updating
    }

    pub(crate) fn execute_raw(&self, sql: &str) -> Result<()> {
        tracing::debug!(target: "satchel", %sql);
        self.lock()?.conn.execute_batch(sql).map_err(Error::sql)
    }

    /// The DAO for an entity type. Instances are cached per type until a
    /// schema operation invalidates them.
    pub fn dao<T: Entity>(self: &Arc<Self>) -> Arc<Dao<T>> {
        let mut cache = self.dao_cache.lock().unwrap_or_else(|err| err.into_inner());
        let entry = cache
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(Dao::<T>::new(self.clone())));
        entry
            .clone()
            .downcast::<Dao<T>>()
            .expect("dao cache entry holds a differently-typed dao")
    }

    pub(crate) fn invalidate_dao<T: Entity>(&self) {
        let mut cache = self.dao_cache.lock().unwrap_or_else(|err| err.into_inner());
        cache.remove(&TypeId::of::<T>());
    }
}

static GLOBAL: RwLock<Option<Arc<Db>>> = RwLock::new(None);

/// Opens the database and installs it as the process-wide handle.
pub fn init(config: DbConfig) -> Result<Arc<Db>> {
    let db = Db::open(config)?;
    let mut slot = GLOBAL.write().unwrap_or_else(|err| err.into_inner());
    *slot = Some(db.clone());
    Ok(db)
}

/// The process-wide handle. Fails fast while no database has been
/// initialized.
pub fn database() -> Result<Arc<Db>> {
    let slot = GLOBAL.read().unwrap_or_else(|err| err.into_inner());
    slot.clone()
        .ok_or_else(|| Error::state("database does not exist"))
}

/// True once the process-wide handle is installed and not mid-update.
pub fn is_prepared() -> bool {
    database().map(|db| !db.is_waiting_update()).unwrap_or(false)
}
