//! Row-level statement assembly.
//!
//! These helpers build the literal SQL text the data-access layer executes;
//! argument binding stays with the caller.

/// `INSERT INTO <table> (<columns>) VALUES (?,...)`
pub fn insert(table: &str, columns: &[String]) -> String {
    let placeholders = vec!["?"; columns.len()].join(",");
    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        columns.join(",")
    )
}

/// `UPDATE <table> SET <col>=?,... [ WHERE <selection>]`
pub fn update(table: &str, columns: &[String], selection: Option<&str>) -> String {
    let assignments = columns
        .iter()
        .map(|column| format!("{column}=?"))
        .collect::<Vec<_>>()
        .join(",");
    let mut sql = format!("UPDATE {table} SET {assignments}");
    if let Some(selection) = selection {
        sql.push_str(" WHERE ");
        sql.push_str(selection);
    }
    sql
}

/// `DELETE FROM <table> [ WHERE <selection>]`
pub fn delete(table: &str, selection: Option<&str>) -> String {
    let mut sql = format!("DELETE FROM {table}");
    if let Some(selection) = selection {
        sql.push_str(" WHERE ");
        sql.push_str(selection);
    }
    sql
}

/// `SELECT <columns|*> FROM <table>` plus the optional filter, grouping,
/// ordering and limit fragments, in that order.
#[allow(clippy::too_many_arguments)]
pub fn select(
    table: &str,
    columns: Option<&[String]>,
    selection: Option<&str>,
    group: &str,
    having: &str,
    order: &str,
    limit: &str,
) -> String {
    let projection = match columns {
        Some(columns) if !columns.is_empty() => columns.join(","),
        _ => "*".to_string(),
    };
    let mut sql = format!("SELECT {projection} FROM {table}");
    if let Some(selection) = selection {
        sql.push_str(" WHERE ");
        sql.push_str(selection);
    }
    if !group.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(group);
    }
    if !having.is_empty() {
        sql.push_str(" HAVING ");
        sql.push_str(having);
    }
    if !order.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(order);
    }
    if !limit.is_empty() {
        sql.push_str(" LIMIT ");
        sql.push_str(limit);
    }
    sql
}

/// `SELECT COUNT(*) FROM <table><suffix>` where `suffix` is a prebuilt
/// query suffix (already carrying its own leading space or the empty-where
/// sentinel).
pub fn count(table: &str, suffix: &str) -> String {
    format!("SELECT COUNT(*) FROM {table}{suffix}")
}
