use crate::db::Db;
use crate::entity::{table_name, Entity, FieldBinding};
use crate::param::{read_value, Param};

use satchel_core::{Error, Result, Value};
use satchel_sql::{dml, QueryBuilder, WhereBuilder};

use rusqlite::params_from_iter;
use std::sync::Arc;

/// The data-access object for one entity type.
///
/// Holds the resolved table name and field bindings for the lifetime of the
/// instance; the entity's structure is static, so the bindings are computed
/// once and the cache is retired whenever the schema layer mutates the
/// table.
pub struct Dao<T: Entity> {
    db: Arc<Db>,
    table: String,
    bindings: Vec<FieldBinding<T>>,
}

impl<T: Entity> Dao<T> {
    pub(crate) fn new(db: Arc<Db>) -> Self {
        Self {
            db,
            table: table_name::<T>(),
            bindings: T::bindings(),
        }
    }

    // Auto-increment key columns are the engine's to fill; everything else
    // is marshaled.
    fn marshal(&self, entity: &T) -> (Vec<String>, Vec<Value>) {
        let mut columns = Vec::with_capacity(self.bindings.len());
        let mut values = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            if binding.is_auto_increment() {
                continue;
            }
            columns.push(binding.column_name());
            values.push(binding.read(entity));
        }
        (columns, values)
    }

    /// Inserts one row. `Ok(false)` means the engine reported zero rows
    /// affected.
    pub fn insert(&self, entity: &T) -> Result<bool> {
        let (columns, values) = self.marshal(entity);
        let sql = dml::insert(&self.table, &columns);
        tracing::debug!(target: "satchel", %sql);
        let guard = self.db.lock()?;
        let count = guard
            .conn
            .execute(&sql, params_from_iter(values.iter().map(Param)))
            .map_err(Error::sql)?;
        Ok(count > 0)
    }

    /// Inserts every row, one statement each — no wrapping transaction.
    /// Returns true only if every row reported success.
    pub fn insert_all(&self, entities: &[T]) -> Result<bool> {
        let mut count = 0;
        for entity in entities {
            if self.insert(entity)? {
                count += 1;
            }
        }
        Ok(count == entities.len())
    }

    /// Deletes rows matching the builder's predicate.
    pub fn delete(&self, builder: &WhereBuilder) -> Result<bool> {
        let sql = dml::delete(&self.table, builder.selection());
        let args = builder.selection_args();
        tracing::debug!(target: "satchel", %sql);
        let guard = self.db.lock()?;
        let count = guard
            .conn
            .execute(&sql, params_from_iter(args.iter()))
            .map_err(Error::sql)?;
        Ok(count > 0)
    }

    /// Deletes by the entity's own primary-key equality.
    pub fn delete_entity(&self, entity: &T) -> Result<bool> {
        self.delete(&Self::primary_key_predicate(entity))
    }

    pub fn delete_all(&self) -> Result<bool> {
        let sql = dml::delete(&self.table, None);
        tracing::debug!(target: "satchel", %sql);
        let guard = self.db.lock()?;
        let count = guard.conn.execute(&sql, []).map_err(Error::sql)?;
        Ok(count > 0)
    }

    /// Updates rows matching the builder's predicate with the new entity's
    /// marshaled values.
    pub fn update(&self, builder: &WhereBuilder, entity: &T) -> Result<bool> {
        let (columns, mut values) = self.marshal(entity);
        let sql = dml::update(&self.table, &columns, builder.selection());
        values.extend(builder.selection_args().into_iter().map(Value::String));
        tracing::debug!(target: "satchel", %sql);
        let guard = self.db.lock()?;
        let count = guard
            .conn
            .execute(&sql, params_from_iter(values.iter().map(Param)))
            .map_err(Error::sql)?;
        Ok(count > 0)
    }

    /// Updates the row addressed by the entity's own primary key.
    pub fn update_entity(&self, entity: &T) -> Result<bool> {
        self.update(&Self::primary_key_predicate(entity), entity)
    }

    /// Updates every row with the new entity's values.
    pub fn update_all(&self, entity: &T) -> Result<bool> {
        let (columns, values) = self.marshal(entity);
        let sql = dml::update(&self.table, &columns, None);
        tracing::debug!(target: "satchel", %sql);
        let guard = self.db.lock()?;
        let count = guard
            .conn
            .execute(&sql, params_from_iter(values.iter().map(Param)))
            .map_err(Error::sql)?;
        Ok(count > 0)
    }

    pub fn select(&self, query: &QueryBuilder) -> Result<Vec<T>> {
        let where_builder = query.where_builder();
        let sql = dml::select(
            &self.table,
            query.projection(),
            where_builder.selection(),
            query.group(),
            query.having_expr(),
            query.order(),
            query.limit_expr(),
        );
        self.query_rows(&sql, where_builder.selection_args())
    }

    pub fn select_all(&self) -> Result<Vec<T>> {
        let sql = dml::select(&self.table, None, None, "", "", "", "");
        self.query_rows(&sql, vec![])
    }

    pub fn select_one(&self) -> Result<Option<T>> {
        Ok(self.select_all()?.into_iter().next())
    }

    pub fn select_one_where(&self, query: &QueryBuilder) -> Result<Option<T>> {
        Ok(self.select(query)?.into_iter().next())
    }

    pub fn select_count(&self) -> Result<u64> {
        self.count(&dml::count(&self.table, ""), vec![])
    }

    pub fn select_count_where(&self, query: &QueryBuilder) -> Result<u64> {
        self.count(
            &dml::count(&self.table, &query.build()),
            query.where_builder().selection_args(),
        )
    }

    fn primary_key_predicate(entity: &T) -> WhereBuilder {
        let key = entity.primary_key();
        WhereBuilder::from_clause(format!("{}=?", key.name()), vec![key.value().to_string()])
    }

    fn query_rows(&self, sql: &str, args: Vec<String>) -> Result<Vec<T>> {
        tracing::debug!(target: "satchel", %sql);
        let guard = self.db.lock()?;
        let mut stmt = guard.conn.prepare(sql).map_err(Error::sql)?;
        let mut rows = stmt
            .query(params_from_iter(args.iter()))
            .map_err(Error::sql)?;

        let mut result = vec![];
        while let Some(row) = rows.next().map_err(Error::sql)? {
            result.push(self.unmarshal(row));
        }
        Ok(result)
    }

    fn count(&self, sql: &str, args: Vec<String>) -> Result<u64> {
        tracing::debug!(target: "satchel", %sql);
        let guard = self.db.lock()?;
        let count: u64 = guard
            .conn
            .query_row(sql, params_from_iter(args.iter()), |row| row.get(0))
            .map_err(Error::sql)?;
        Ok(count)
    }

    // A column missing from the projection skips its field; a per-field
    // coercion failure is logged and leaves the field at its default. The
    // row is never rejected wholesale.
    fn unmarshal(&self, row: &rusqlite::Row<'_>) -> T {
        let mut entity = T::default();
        for binding in &self.bindings {
            let column = binding.column_name();
            let Ok(index) = row.as_ref().column_index(&column) else {
                continue;
            };
            match read_value(row, index, binding.kind()) {
                Ok(value) => binding.write(&mut entity, value),
                Err(err) => {
                    tracing::warn!(target: "satchel", column = %column, error = %err,
                        "field left at default");
                }
            }
        }
        entity
    }
}
