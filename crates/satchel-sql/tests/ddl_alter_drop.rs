use pretty_assertions::assert_eq;
use satchel_core::{ColumnDef, PrimaryKeyMode, SqlType, TableDef};
use satchel_sql::ddl;

fn profile_table() -> TableDef {
    let mut id = ColumnDef::new("_id", SqlType::Integer);
    id.primary_key = Some(PrimaryKeyMode::AutoIncrement);
    let mut table = TableDef::new("t_user_profile");
    table.columns = vec![
        id,
        ColumnDef::new("nick_name", SqlType::Text),
        ColumnDef::new("avatar", SqlType::Blob),
    ];
    table
}

#[test]
fn upgrade_emits_one_add_column_per_field() {
    let statements = ddl::upgrade_table(&profile_table());

    assert_eq!(
        statements,
        vec![
            "ALTER TABLE t_user_profile ADD COLUMN _id INTEGER PRIMARY KEY AUTOINCREMENT;"
                .to_string(),
            "ALTER TABLE t_user_profile ADD COLUMN nick_name TEXT;".to_string(),
            "ALTER TABLE t_user_profile ADD COLUMN avatar BLOB;".to_string(),
        ]
    );
}

#[test]
fn upgrade_is_not_diffed() {
    // The statement list always covers every mapped column; duplicates are
    // the execution layer's problem.
    let statements = ddl::upgrade_table(&profile_table());
    assert_eq!(statements.len(), profile_table().columns.len());
}

#[test]
fn drop_table_text() {
    assert_eq!(ddl::drop_table(&profile_table()), "DROP TABLE t_user_profile");
}
