use satchel_core::{FieldKind, Result, Value};

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::Row;
use satchel_core::err;

/// Binds a satchel [`Value`] as a SQL parameter.
pub(crate) struct Param<'a>(pub(crate) &'a Value);

impl ToSql for Param<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Bool(true) => ToSqlOutput::Owned(SqlValue::Integer(1)),
            Value::Bool(false) => ToSqlOutput::Owned(SqlValue::Integer(0)),
            Value::I8(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I16(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            Value::I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::F32(v) => ToSqlOutput::Owned(SqlValue::Real(*v as f64)),
            Value::F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::Char(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            Value::String(v) | Value::TypeName(v) => {
                ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))
            }
            Value::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
        })
    }
}

/// Reads a column out of a result row, coerced by the binding's field kind.
///
/// The integer-backed kinds accept REAL values and vice versa (cast), the
/// way a cursor read coerces; an unreadable pairing is a type-conversion
/// error the caller handles per field.
pub(crate) fn read_value(row: &Row<'_>, index: usize, kind: FieldKind) -> Result<Value> {
    let raw: SqlValue = row.get(index).map_err(satchel_core::Error::sql)?;

    let value = match (raw, kind) {
        (SqlValue::Null, _) => Value::Null,

        (SqlValue::Integer(v), FieldKind::Bool) => Value::Bool(v == 1),
        (SqlValue::Integer(v), FieldKind::Byte) => Value::I8(v as i8),
        (SqlValue::Integer(v), FieldKind::Short) => Value::I16(v as i16),
        (SqlValue::Integer(v), FieldKind::Int) => Value::I32(v as i32),
        (SqlValue::Integer(v), FieldKind::Long) => Value::I64(v),
        (SqlValue::Integer(v), FieldKind::Float) => Value::F32(v as f32),
        (SqlValue::Integer(v), FieldKind::Double) => Value::F64(v as f64),

        (SqlValue::Real(v), FieldKind::Float) => Value::F32(v as f32),
        (SqlValue::Real(v), FieldKind::Double) => Value::F64(v),
        (SqlValue::Real(v), FieldKind::Long) => Value::I64(v as i64),
        (SqlValue::Real(v), FieldKind::Int) => Value::I32(v as i32),

        (SqlValue::Text(s), FieldKind::Text) => Value::String(s),
        (SqlValue::Text(s), FieldKind::TypeName) => Value::TypeName(s),
        (SqlValue::Text(s), FieldKind::Char) => match s.chars().next() {
            Some(ch) => Value::Char(ch),
            None => return Err(err!("empty text cannot fill a char field")),
        },

        (SqlValue::Blob(b), FieldKind::Bytes) => Value::Bytes(b),

        (raw, kind) => return Err(err!("cannot read {} as {kind:?}", raw.data_type())),
    };

    Ok(value)
}
