use crate::db::Db;
use crate::entity::{table_def, Entity};

use satchel_core::{Error, Result};
use satchel_sql::ddl;

impl Db {
    /// Materializes the entity's table. Fails before any SQL is issued when
    /// the descriptor carries no primary-key column (or more than one in
    /// strict mode).
    pub fn create_table<T: Entity>(&self) -> Result<()> {
        let table = table_def::<T>();
        let sql = ddl::create_table(&table, self.strict_primary_keys)?;
        tracing::debug!(target: "satchel", %sql);
        self.lock()?.conn.execute(&sql, []).map_err(Error::sql)?;
        self.finish_schema_change::<T>();
        Ok(())
    }

    /// Additively upgrades the entity's table: one `ADD COLUMN` per mapped
    /// field, not diffed against the live schema. Per-statement failures
    /// (typically duplicate columns) are logged and swallowed; existing rows
    /// are never touched.
    pub fn upgrade_table<T: Entity>(&self) -> Result<()> {
        let table = table_def::<T>();
        for sql in ddl::upgrade_table(&table) {
            tracing::debug!(target: "satchel", %sql);
            let guard = self.lock()?;
            if let Err(err) = guard.conn.execute(&sql, []) {
                tracing::info!(target: "satchel", %sql, error = %err, "add column skipped");
            }
        }
        self.finish_schema_change::<T>();
        Ok(())
    }

    pub fn drop_table<T: Entity>(&self) -> Result<()> {
        let table = table_def::<T>();
        let sql = ddl::drop_table(&table);
        tracing::debug!(target: "satchel", %sql);
        self.lock()?.conn.execute(&sql, []).map_err(Error::sql)?;
        self.finish_schema_change::<T>();
        Ok(())
    }

    /// Drop then create, sequentially and without a wrapping transaction: if
    /// the create fails after a successful drop, the table is left absent.
    pub fn recreate_table<T: Entity>(&self) -> Result<()> {
        self.drop_table::<T>()?;
        self.create_table::<T>()
    }

    // Cached DAOs hold column metadata; every schema mutation retires the
    // entry and flags the handle for revalidation.
    fn finish_schema_change<T: Entity>(&self) {
        self.invalidate_dao::<T>();
        self.mark_updating();
    }
}
