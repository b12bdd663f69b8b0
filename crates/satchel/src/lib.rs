mod config;
pub use config::DbConfig;

mod convert;
pub use convert::{CommaListConverter, PropertyConverter};

mod dao;
pub use dao::Dao;

mod db;
pub use db::{database, init, is_prepared, Db};

mod entity;
pub use entity::{table_def, table_name, Entity, FieldBinding, PrimaryKeyValue};

mod param;

mod schema;

pub mod transaction;

pub use satchel_core::{
    bail, err, ColumnDef, Error, FieldKind, FromValue, PrimaryKeyMode, Result, SqlType, TableDef,
    Value,
};
pub use satchel_sql::{Condition, QueryBuilder, WhereBuilder};
