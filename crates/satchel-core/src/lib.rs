mod error;
pub use error::Error;

pub mod name;

pub mod schema;
pub use schema::{ColumnDef, PrimaryKeyMode, TableDef};

pub mod ty;
pub use ty::{FieldKind, SqlType};

pub mod value;
pub use value::{FromValue, Value};

/// A Result type alias that uses satchel's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
