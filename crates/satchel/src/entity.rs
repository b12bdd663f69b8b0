use crate::convert::PropertyConverter;

use satchel_core::{name, ColumnDef, FieldKind, FromValue, PrimaryKeyMode, TableDef, Value};

/// The identity column is physically named `_id` no matter what the field is
/// called.
const ID_COLUMN: &str = "_id";

/// A type mapped one-to-one to a database table.
///
/// Hydration goes through `Default`: rows are materialized by constructing a
/// default instance and writing each bound field into it. There is exactly
/// one construction path.
pub trait Entity: Default + Send + Sync + 'static {
    /// Explicit table-name override; used verbatim when set. Otherwise the
    /// table is named `t_` + snake_case of the type's simple name.
    const TABLE: Option<&'static str> = None;

    /// When true, a schema-version upgrade drops and recreates this table
    /// instead of additively adding columns.
    const RECREATE_ON_UPGRADE: bool = false;

    /// The ordered field bindings. Order here is column order.
    fn bindings() -> Vec<FieldBinding<Self>>;

    /// The entity's own primary-key column and value, used by the
    /// entity-addressed delete/update mode.
    fn primary_key(&self) -> PrimaryKeyValue;
}

/// The resolved table name for an entity type.
pub fn table_name<T: Entity>() -> String {
    match T::TABLE {
        Some(table) => table.to_string(),
        None => name::generate_table_name(simple_type_name::<T>()),
    }
}

/// Derives the table descriptor from an entity's bindings.
pub fn table_def<T: Entity>() -> TableDef {
    let mut table = TableDef::new(table_name::<T>());
    table.columns = T::bindings()
        .iter()
        .map(FieldBinding::column_def)
        .collect();
    table
}

fn simple_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// A primary-key column name paired with its stringified value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyValue {
    name: String,
    value: String,
}

impl PrimaryKeyValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

type Reader<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
type Writer<T> = Box<dyn Fn(&mut T, Value) + Send + Sync>;

/// One mapped field: its kind, constraints, and the reader/writer pair the
/// data-access layer dispatches through.
pub struct FieldBinding<T> {
    field_name: &'static str,
    column_override: Option<&'static str>,
    kind: FieldKind,
    primary_key: Option<PrimaryKeyMode>,
    unique: bool,
    not_null: bool,
    default_value: Option<&'static str>,
    check: Option<&'static str>,
    read: Reader<T>,
    write: Writer<T>,
}

impl<T> FieldBinding<T> {
    pub fn new(
        field_name: &'static str,
        kind: FieldKind,
        read: impl Fn(&T) -> Value + Send + Sync + 'static,
        write: impl Fn(&mut T, Value) + Send + Sync + 'static,
    ) -> Self {
        Self {
            field_name,
            column_override: None,
            kind,
            primary_key: None,
            unique: false,
            not_null: false,
            default_value: None,
            check: None,
            read: Box::new(read),
            write: Box::new(write),
        }
    }

    /// Declares a field routed through a [`PropertyConverter`]: values pass
    /// through the converter on the way to storage and through its inverse
    /// on the way back. A stored value the converter cannot accept leaves
    /// the field at its default.
    pub fn converted<C>(
        field_name: &'static str,
        get: impl Fn(&T) -> C::Property + Send + Sync + 'static,
        set: impl Fn(&mut T, C::Property) + Send + Sync + 'static,
    ) -> Self
    where
        C: PropertyConverter,
    {
        Self::new(
            field_name,
            C::KIND,
            move |entity| C::to_stored(&get(entity)).into(),
            move |entity, value| match C::Stored::from_value(value) {
                Ok(stored) => set(entity, C::from_stored(stored)),
                Err(err) => {
                    tracing::warn!(target: "satchel", field = field_name, error = %err,
                        "converter rejected stored value");
                }
            },
        )
    }

    /// Explicit column-name override, used verbatim.
    pub fn column(mut self, column: &'static str) -> Self {
        self.column_override = Some(column);
        self
    }

    /// Shorthand for the identity column: physically named `_id`, primary
    /// key, engine-assigned.
    pub fn id(mut self) -> Self {
        self.column_override = Some(ID_COLUMN);
        self.primary_key = Some(PrimaryKeyMode::AutoIncrement);
        self
    }

    pub fn primary_key(mut self, mode: PrimaryKeyMode) -> Self {
        self.primary_key = Some(mode);
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn check(mut self, expr: &'static str) -> Self {
        self.check = Some(expr);
        self
    }

    /// The resolved column name: the override when present, otherwise the
    /// snake_case of the field name.
    pub fn column_name(&self) -> String {
        match self.column_override {
            Some(column) => column.to_string(),
            None => name::generate_column_name(self.field_name),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_auto_increment(&self) -> bool {
        self.primary_key == Some(PrimaryKeyMode::AutoIncrement)
    }

    pub(crate) fn read(&self, entity: &T) -> Value {
        (self.read)(entity)
    }

    pub(crate) fn write(&self, entity: &mut T, value: Value) {
        (self.write)(entity, value)
    }

    pub fn column_def(&self) -> ColumnDef {
        ColumnDef {
            name: self.column_name(),
            sql_type: self.kind.sql_type(),
            primary_key: self.primary_key,
            unique: self.unique,
            not_null: self.not_null,
            default_value: self.default_value.map(str::to_string),
            check: self.check.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Note {
        id: i64,
        title: String,
    }

    impl Entity for Note {
        fn bindings() -> Vec<FieldBinding<Self>> {
            vec![
                FieldBinding::new(
                    "id",
                    FieldKind::Long,
                    |note: &Note| note.id.into(),
                    |note, value| {
                        if let Some(id) = value.as_i64() {
                            note.id = id;
                        }
                    },
                )
                .id(),
                FieldBinding::new(
                    "title",
                    FieldKind::Text,
                    |note: &Note| note.title.clone().into(),
                    |note, value| {
                        if let Some(title) = value.as_str() {
                            note.title = title.to_string();
                        }
                    },
                ),
            ]
        }

        fn primary_key(&self) -> PrimaryKeyValue {
            PrimaryKeyValue::new(ID_COLUMN, self.id)
        }
    }

    #[test]
    fn default_table_name_is_snake_cased_type_name() {
        assert_eq!(table_name::<Note>(), "t_note");
    }

    #[test]
    fn id_binding_forces_physical_name() {
        let def = table_def::<Note>();
        assert_eq!(def.columns[0].name, "_id");
        assert!(def.columns[0].is_auto_increment());
    }

    #[test]
    fn descriptor_order_is_declaration_order() {
        let def = table_def::<Note>();
        let names: Vec<_> = def.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["_id", "title"]);
    }

    #[test]
    fn override_is_used_verbatim() {
        #[derive(Default)]
        struct Alt;
        impl Entity for Alt {
            const TABLE: Option<&'static str> = Some("custom_table");
            fn bindings() -> Vec<FieldBinding<Self>> {
                vec![]
            }
            fn primary_key(&self) -> PrimaryKeyValue {
                PrimaryKeyValue::new(ID_COLUMN, 0i64)
            }
        }
        assert_eq!(table_name::<Alt>(), "custom_table");
    }
}
