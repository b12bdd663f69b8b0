mod condition;
pub use condition::Condition;

pub mod ddl;

pub mod dml;

mod query_builder;
pub use query_builder::QueryBuilder;

mod where_builder;
pub use where_builder::WhereBuilder;
