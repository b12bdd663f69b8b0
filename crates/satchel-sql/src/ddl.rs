//! Schema DDL rendering.
//!
//! Statements are rendered from a [`TableDef`] descriptor; nothing here
//! touches a connection. The column clause order is fixed:
//! `<name> <TYPE> [UNIQUE] [DEFAULT '<value>'] [CHECK(<expr>)] [NOT NULL]
//! [PRIMARY KEY [AUTOINCREMENT]]`.

use satchel_core::{ColumnDef, Error, PrimaryKeyMode, Result, TableDef};

/// Renders one column definition.
///
/// DEFAULT values are always wrapped in single quotes, numeric or not;
/// generated DDL compatibility depends on this quoting.
pub fn column_def(column: &ColumnDef) -> String {
    let mut sql = format!("{} {}", column.name, column.sql_type.as_str());
    if column.unique {
        sql.push_str(" UNIQUE");
    }
    if let Some(value) = &column.default_value {
        sql.push_str(&format!(" DEFAULT '{value}'"));
    }
    if let Some(check) = &column.check {
        sql.push_str(&format!(" CHECK({check})"));
    }
    if column.not_null {
        sql.push_str(" NOT NULL");
    }
    if let Some(mode) = column.primary_key {
        sql.push_str(" PRIMARY KEY");
        if mode == PrimaryKeyMode::AutoIncrement {
            sql.push_str(" AUTOINCREMENT");
        }
    }
    sql
}

/// Renders `CREATE TABLE IF NOT EXISTS <table>(<column defs>);`.
///
/// A descriptor without any primary-key column is rejected before any SQL is
/// produced. With `strict_primary_keys` more than one primary-key column is
/// also rejected; otherwise multiple `PRIMARY KEY` clauses are emitted
/// verbatim.
pub fn create_table(table: &TableDef, strict_primary_keys: bool) -> Result<String> {
    let pk_count = table.primary_key_count();
    if pk_count == 0 {
        return Err(Error::constraint("lack valid primary key"));
    }
    if strict_primary_keys && pk_count > 1 {
        return Err(Error::constraint(format!(
            "expected exactly one primary key, found {pk_count}"
        )));
    }

    let columns = table
        .columns
        .iter()
        .map(column_def)
        .collect::<Vec<_>>()
        .join(",");

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {}({columns});",
        table.name
    ))
}

/// Renders one `ALTER TABLE <table> ADD COLUMN <column def>;` per column.
///
/// The statements are not diffed against the live schema: every mapped
/// column is re-added and the execution layer is expected to tolerate the
/// duplicate-column errors per statement.
pub fn upgrade_table(table: &TableDef) -> Vec<String> {
    table
        .columns
        .iter()
        .map(|column| {
            format!(
                "ALTER TABLE {} ADD COLUMN {};",
                table.name,
                column_def(column)
            )
        })
        .collect()
}

/// Renders `DROP TABLE <table>`.
pub fn drop_table(table: &TableDef) -> String {
    format!("DROP TABLE {}", table.name)
}
