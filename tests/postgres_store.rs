use hbnb_api::{Entity, Kind, PgStore, Storage};
use serde_json::json;
use sqlx::{postgres::PgPoolOptions, PgPool};

async fn maybe_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;

    PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .ok()
}

#[tokio::test]
async fn postgres_store_round_trip() {
    let Some(pool) = maybe_pool().await else {
        eprintln!("Skipping postgres_store_round_trip: TEST_DATABASE_URL/DATABASE_URL is not set or database is unreachable.");
        return;
    };

    let store = PgStore::new(pool.clone(), "hbnb_test");
    store.ensure_tables().await.expect("tables should be created");
    sqlx::query(r#"TRUNCATE TABLE "hbnb_test"."objects""#)
        .execute(&pool)
        .await
        .expect("truncate should succeed");

    let ca = Entity::build(Kind::State, json!({"name": "CA"}).as_object().unwrap()).unwrap();
    let ny = Entity::build(Kind::State, json!({"name": "NY"}).as_object().unwrap()).unwrap();
    store.save(&ca).await.unwrap();
    store.save(&ny).await.unwrap();

    let mut renamed = ca.clone();
    renamed.set_field("name", &json!("California")).unwrap();
    store.save(&renamed).await.unwrap();

    assert_eq!(store.count(Kind::State).await.unwrap(), 2);
    assert_eq!(store.all(Kind::State).await.unwrap(), vec![renamed.clone(), ny.clone()]);
    assert_eq!(store.get(Kind::State, ca.id()).await.unwrap(), Some(renamed));

    store.delete(&ny).await.unwrap();
    assert_eq!(store.get(Kind::State, ny.id()).await.unwrap(), None);
    assert_eq!(store.count(Kind::City).await.unwrap(), 0);

    let sf = Entity::build(Kind::City, json!({"name": "SF", "state_id": ca.id()}).as_object().unwrap()).unwrap();
    store.save(&sf).await.unwrap();
    store.delete_many(&[sf.clone(), ca.clone()]).await.unwrap();
    assert_eq!(store.count(Kind::State).await.unwrap(), 0);
    assert_eq!(store.count(Kind::City).await.unwrap(), 0);
}
