use pretty_assertions::assert_eq;
use satchel::{
    CommaListConverter, Db, DbConfig, Entity, FieldBinding, FieldKind, PrimaryKeyValue,
    QueryBuilder, WhereBuilder,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Article {
    id: i64,
    title: String,
    tags: Vec<String>,
}

impl Entity for Article {
    fn bindings() -> Vec<FieldBinding<Self>> {
        vec![
            FieldBinding::new(
                "id",
                FieldKind::Long,
                |article: &Article| article.id.into(),
                |article, value| {
                    if let Some(id) = value.as_i64() {
                        article.id = id;
                    }
                },
            )
            .id(),
            FieldBinding::new(
                "title",
                FieldKind::Text,
                |article: &Article| article.title.clone().into(),
                |article, value| {
                    if let Some(title) = value.as_str() {
                        article.title = title.to_string();
                    }
                },
            ),
            FieldBinding::converted::<CommaListConverter>(
                "tags",
                |article: &Article| article.tags.clone(),
                |article, tags| article.tags = tags,
            ),
        ]
    }

    fn primary_key(&self) -> PrimaryKeyValue {
        PrimaryKeyValue::new("_id", self.id)
    }
}

fn open_dao() -> std::sync::Arc<satchel::Dao<Article>> {
    let config = DbConfig::builder()
        .in_memory()
        .table::<Article>()
        .build()
        .unwrap();
    Db::open(config).unwrap().dao::<Article>()
}

#[test]
fn converted_field_round_trips() {
    let dao = open_dao();

    let article = Article {
        id: 0,
        title: "storage classes".to_string(),
        tags: vec!["rust".to_string(), "sqlite".to_string()],
    };
    assert!(dao.insert(&article).unwrap());

    let read = dao.select_one().unwrap().unwrap();
    assert_eq!(read.tags, ["rust", "sqlite"]);
}

#[test]
fn converted_field_is_queryable_by_stored_form() {
    let dao = open_dao();

    dao.insert(&Article {
        id: 0,
        title: "a".to_string(),
        tags: vec!["x".to_string()],
    })
    .unwrap();

    // The stored representation carries the trailing separator.
    let query = QueryBuilder::create()
        .with_where(WhereBuilder::create().add_where_equal_to("tags", "x,"));
    assert_eq!(dao.select_count_where(&query).unwrap(), 1);
}

#[test]
fn empty_list_round_trips_as_empty() {
    let dao = open_dao();

    dao.insert(&Article {
        id: 0,
        title: "untagged".to_string(),
        tags: vec![],
    })
    .unwrap();

    let read = dao.select_one().unwrap().unwrap();
    assert!(read.tags.is_empty());
}
