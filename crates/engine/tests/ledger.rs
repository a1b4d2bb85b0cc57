use chrono::Utc;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, NewExpense};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn catalog_names(db: &DatabaseConnection) -> Vec<String> {
    let backend = db.get_database_backend();
    let rows = db
        .query_all(Statement::from_string(
            backend,
            "SELECT name FROM categories ORDER BY name;",
        ))
        .await
        .unwrap();
    rows.into_iter()
        .map(|row| {
            let name: String = row.try_get("", "name").unwrap();
            name
        })
        .collect()
}

fn new_expense(user_id: i64, message_id: i64, value: f64, category: &str) -> NewExpense {
    NewExpense {
        message_id,
        chat_id: 99,
        user_id,
        date: Utc::now(),
        value,
        category: category.to_string(),
        currency: "ARS".to_string(),
        text: "cafe en la facu".to_string(),
    }
}

#[tokio::test]
async fn registration_seeds_the_current_catalog() {
    let (engine, db) = engine_with_db().await;

    assert!(!engine.is_registered(1).await.unwrap());
    engine.register_user(1).await.unwrap();
    assert!(engine.is_registered(1).await.unwrap());

    let catalog = catalog_names(&db).await;
    assert!(!catalog.is_empty());
    assert_eq!(engine.user_categories(1).await.unwrap(), catalog);
}

#[tokio::test]
async fn duplicate_registration_fails() {
    let (engine, _db) = engine_with_db().await;

    engine.register_user(1).await.unwrap();
    let err = engine.register_user(1).await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("1".to_string()));
}

#[tokio::test]
async fn later_catalog_additions_are_not_retroactive() {
    let (engine, _db) = engine_with_db().await;

    engine.register_user(1).await.unwrap();
    assert!(engine.add_global_category("JARDINERÍA").await.unwrap());
    // insert-if-absent: a second add reports nothing new
    assert!(!engine.add_global_category("JARDINERÍA").await.unwrap());

    let linked = engine.user_categories(1).await.unwrap();
    assert!(!linked.contains(&"JARDINERÍA".to_string()));

    // a user registered after the addition gets it seeded
    engine.register_user(2).await.unwrap();
    let linked = engine.user_categories(2).await.unwrap();
    assert!(linked.contains(&"JARDINERÍA".to_string()));

    // the earlier user gets it only by explicit link
    assert!(engine.link_user_category(1, "JARDINERÍA").await.unwrap());
    let linked = engine.user_categories(1).await.unwrap();
    assert!(linked.contains(&"JARDINERÍA".to_string()));
}

#[tokio::test]
async fn link_and_unlink_user_category() {
    let (engine, _db) = engine_with_db().await;
    engine.register_user(1).await.unwrap();

    // linking a name missing from the catalog fails
    assert!(!engine.link_user_category(1, "NO-EXISTE").await.unwrap());

    engine.add_global_category("JARDINERÍA").await.unwrap();
    assert!(engine.link_user_category(1, "JARDINERÍA").await.unwrap());
    // already linked
    assert!(!engine.link_user_category(1, "JARDINERÍA").await.unwrap());

    assert!(engine.unlink_user_category(1, "JARDINERÍA").await.unwrap());
    assert!(!engine.unlink_user_category(1, "JARDINERÍA").await.unwrap());
    let linked = engine.user_categories(1).await.unwrap();
    assert!(!linked.contains(&"JARDINERÍA".to_string()));
}

#[tokio::test]
async fn add_expense_validates_the_category() {
    let (engine, _db) = engine_with_db().await;
    engine.register_user(1).await.unwrap();

    let err = engine
        .add_expense(new_expense(1, 10, 12.0, "NO-EXISTE"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownCategory("NO-EXISTE".to_string()));

    // globally known but never linked to this user
    engine.add_global_category("JARDINERÍA").await.unwrap();
    let err = engine
        .add_expense(new_expense(1, 10, 12.0, "JARDINERÍA"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::CategoryNotLinked("JARDINERÍA".to_string()));

    // unlinking a seeded category revokes it
    assert!(engine.unlink_user_category(1, "TAXI").await.unwrap());
    let err = engine
        .add_expense(new_expense(1, 10, 12.0, "TAXI"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::CategoryNotLinked("TAXI".to_string()));

    // nothing was written along the way
    assert!(engine.user_expenses(1).await.unwrap().is_empty());

    engine
        .add_expense(new_expense(1, 10, 12.0, "SUPERMERCADO"))
        .await
        .unwrap();
    assert_eq!(engine.user_expenses(1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn add_expense_rejects_negative_values() {
    let (engine, _db) = engine_with_db().await;
    engine.register_user(1).await.unwrap();

    let err = engine
        .add_expense(new_expense(1, 10, -1.0, "SUPERMERCADO"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert!(engine.user_expenses(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_reports_whether_a_row_existed() {
    let (engine, _db) = engine_with_db().await;
    engine.register_user(1).await.unwrap();

    engine
        .add_expense(new_expense(1, 10, 12.0, "SUPERMERCADO"))
        .await
        .unwrap();

    assert!(engine.remove_by_message_id(1, 10).await.unwrap());
    // a second delete of the same identity is a clean miss, not an error
    assert!(!engine.remove_by_message_id(1, 10).await.unwrap());
    assert!(!engine.remove_by_message_id(1, 999).await.unwrap());
}

#[tokio::test]
async fn replace_keeps_one_expense_per_message() {
    let (engine, _db) = engine_with_db().await;
    engine.register_user(1).await.unwrap();

    // editing a message that never produced a record still creates one
    let (_, replaced) = engine
        .replace_expense(new_expense(1, 10, 5.0, "TAXI"))
        .await
        .unwrap();
    assert!(!replaced);

    // latest edit wins
    let (stored, replaced) = engine
        .replace_expense(new_expense(1, 10, 9.5, "SUPERMERCADO"))
        .await
        .unwrap();
    assert!(replaced);
    assert_eq!(stored.category, "SUPERMERCADO");

    let rows = engine.user_expenses(1).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].message_id, 10);
    assert_eq!(rows[0].value, 9.5);
    assert_eq!(rows[0].category, "SUPERMERCADO");
}

#[tokio::test]
async fn failed_replace_leaves_the_previous_row() {
    let (engine, _db) = engine_with_db().await;
    engine.register_user(1).await.unwrap();

    engine
        .add_expense(new_expense(1, 10, 5.0, "TAXI"))
        .await
        .unwrap();

    let err = engine
        .replace_expense(new_expense(1, 10, 7.0, "NO-EXISTE"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownCategory("NO-EXISTE".to_string()));

    let rows = engine.user_expenses(1).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, 5.0);
    assert_eq!(rows[0].category, "TAXI");
}

#[tokio::test]
async fn query_orders_newest_first() {
    let (engine, _db) = engine_with_db().await;
    engine.register_user(1).await.unwrap();
    engine.register_user(2).await.unwrap();

    for (message_id, value) in [(11, 1.0), (12, 2.0), (13, 3.0)] {
        engine
            .add_expense(new_expense(1, message_id, value, "SUPERMERCADO"))
            .await
            .unwrap();
    }
    engine
        .add_expense(new_expense(2, 11, 4.0, "SUPERMERCADO"))
        .await
        .unwrap();

    engine.remove_by_message_id(1, 12).await.unwrap();

    // length equals successful adds minus successful removals for the user
    let rows = engine.user_expenses(1).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].id > rows[1].id);
    assert_eq!(rows[0].value, 3.0);
    assert_eq!(rows[1].value, 1.0);

    // the other user's ledger is untouched
    let rows = engine.user_expenses(2).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, 4.0);
}
