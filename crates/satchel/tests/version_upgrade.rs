use satchel::{Db, DbConfig, Entity, FieldBinding, FieldKind, PrimaryKeyValue};

use std::path::PathBuf;

fn temp_db_path(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("satchel_{tag}_{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[derive(Debug, Default, Clone)]
struct Account {
    id: i64,
    owner: String,
}

impl Entity for Account {
    fn bindings() -> Vec<FieldBinding<Self>> {
        vec![
            FieldBinding::new(
                "id",
                FieldKind::Long,
                |account: &Account| account.id.into(),
                |account, value| {
                    if let Some(id) = value.as_i64() {
                        account.id = id;
                    }
                },
            )
            .id(),
            FieldBinding::new(
                "owner",
                FieldKind::Text,
                |account: &Account| account.owner.clone().into(),
                |account, value| {
                    if let Some(owner) = value.as_str() {
                        account.owner = owner.to_string();
                    }
                },
            ),
        ]
    }

    fn primary_key(&self) -> PrimaryKeyValue {
        PrimaryKeyValue::new("_id", self.id)
    }
}

/// The same table with a column added in a later schema version.
#[derive(Debug, Default, Clone)]
struct AccountV2 {
    id: i64,
    owner: String,
    email: String,
}

impl Entity for AccountV2 {
    const TABLE: Option<&'static str> = Some("t_account");

    fn bindings() -> Vec<FieldBinding<Self>> {
        vec![
            FieldBinding::new(
                "id",
                FieldKind::Long,
                |account: &AccountV2| account.id.into(),
                |account, value| {
                    if let Some(id) = value.as_i64() {
                        account.id = id;
                    }
                },
            )
            .id(),
            FieldBinding::new(
                "owner",
                FieldKind::Text,
                |account: &AccountV2| account.owner.clone().into(),
                |account, value| {
                    if let Some(owner) = value.as_str() {
                        account.owner = owner.to_string();
                    }
                },
            ),
            FieldBinding::new(
                "email",
                FieldKind::Text,
                |account: &AccountV2| account.email.clone().into(),
                |account, value| {
                    if let Some(email) = value.as_str() {
                        account.email = email.to_string();
                    }
                },
            ),
        ]
    }

    fn primary_key(&self) -> PrimaryKeyValue {
        PrimaryKeyValue::new("_id", self.id)
    }
}

#[test]
fn version_bump_upgrades_additively() {
    let path = temp_db_path("additive");

    {
        let config = DbConfig::builder()
            .database(&path)
            .version(1)
            .table::<Account>()
            .build()
            .unwrap();
        let db = Db::open(config).unwrap();
        let dao = db.dao::<Account>();
        dao.insert(&Account {
            id: 0,
            owner: "Ada".to_string(),
        })
        .unwrap();
        assert_eq!(dao.select_count().unwrap(), 1);
    }

    // Reopen at a newer version with an extra mapped column. The upgrade
    // adds `email` and keeps the existing row.
    {
        let config = DbConfig::builder()
            .database(&path)
            .version(2)
            .table::<AccountV2>()
            .build()
            .unwrap();
        let db = Db::open(config).unwrap();
        let dao = db.dao::<AccountV2>();
        assert_eq!(dao.select_count().unwrap(), 1);

        let row = dao.select_one().unwrap().unwrap();
        assert_eq!(row.owner, "Ada");
        // The new column reads back as the hydration default.
        assert_eq!(row.email, "");
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn reopen_at_same_version_changes_nothing() {
    let path = temp_db_path("same_version");

    {
        let config = DbConfig::builder()
            .database(&path)
            .version(1)
            .table::<Account>()
            .build()
            .unwrap();
        let db = Db::open(config).unwrap();
        db.dao::<Account>()
            .insert(&Account {
                id: 0,
                owner: "Ada".to_string(),
            })
            .unwrap();
    }

    {
        let config = DbConfig::builder()
            .database(&path)
            .version(1)
            .table::<Account>()
            .build()
            .unwrap();
        let db = Db::open(config).unwrap();
        assert_eq!(db.dao::<Account>().select_count().unwrap(), 1);
    }

    let _ = std::fs::remove_file(&path);
}

#[derive(Debug, Default, Clone)]
struct Scratch {
    id: i64,
    note: String,
}

impl Entity for Scratch {
    const RECREATE_ON_UPGRADE: bool = true;

    fn bindings() -> Vec<FieldBinding<Self>> {
        vec![
            FieldBinding::new(
                "id",
                FieldKind::Long,
                |scratch: &Scratch| scratch.id.into(),
                |scratch, value| {
                    if let Some(id) = value.as_i64() {
                        scratch.id = id;
                    }
                },
            )
            .id(),
            FieldBinding::new(
                "note",
                FieldKind::Text,
                |scratch: &Scratch| scratch.note.clone().into(),
                |scratch, value| {
                    if let Some(note) = value.as_str() {
                        scratch.note = note.to_string();
                    }
                },
            ),
        ]
    }

    fn primary_key(&self) -> PrimaryKeyValue {
        PrimaryKeyValue::new("_id", self.id)
    }
}

#[test]
fn recreate_on_upgrade_drops_existing_rows() {
    let path = temp_db_path("recreate");

    {
        let config = DbConfig::builder()
            .database(&path)
            .version(1)
            .table::<Scratch>()
            .build()
            .unwrap();
        let db = Db::open(config).unwrap();
        db.dao::<Scratch>()
            .insert(&Scratch {
                id: 0,
                note: "ephemeral".to_string(),
            })
            .unwrap();
    }

    {
        let config = DbConfig::builder()
            .database(&path)
            .version(2)
            .table::<Scratch>()
            .build()
            .unwrap();
        let db = Db::open(config).unwrap();
        assert_eq!(db.dao::<Scratch>().select_count().unwrap(), 0);
    }

    let _ = std::fs::remove_file(&path);
}
