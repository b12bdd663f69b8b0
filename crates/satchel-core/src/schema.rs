use crate::ty::SqlType;

/// How a primary-key column receives its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKeyMode {
    /// The engine assigns the next rowid; the column is skipped when
    /// marshaling an entity for insert.
    AutoIncrement,

    /// The caller supplies the key value.
    Assigned,
}

/// Metadata describing one mapped column: storage name, storage class, and
/// constraints. Ignored fields never produce a descriptor; order is the
/// binding declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: SqlType,
    pub primary_key: Option<PrimaryKeyMode>,
    pub unique: bool,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub check: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            primary_key: None,
            unique: false,
            not_null: false,
            default_value: None,
            check: None,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    pub fn is_auto_increment(&self) -> bool {
        self.primary_key == Some(PrimaryKeyMode::AutoIncrement)
    }
}

/// A table descriptor: the resolved name plus ordered column descriptors.
/// Derived once per entity type; schema DDL is only re-issued on explicit
/// create/upgrade/drop calls.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|column| column.is_primary_key())
    }

    pub fn primary_key_count(&self) -> usize {
        self.primary_key_columns().count()
    }
}
