use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_round_trips_and_overwrites_values() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get_item("app_theme").await.unwrap(), None);

    repo.set_item("app_theme", "dark").await.unwrap();
    assert_eq!(
        repo.get_item("app_theme").await.unwrap().as_deref(),
        Some("dark")
    );

    repo.set_item("app_theme", "sepia").await.unwrap();
    assert_eq!(
        repo.get_item("app_theme").await.unwrap().as_deref(),
        Some("sepia")
    );

    repo.remove_item("app_theme").await.unwrap();
    assert_eq!(repo.get_item("app_theme").await.unwrap(), None);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .expect("count");
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn storage_sqlite_exposes_preferences() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("open storage");
    storage
        .preferences
        .set_item("app_theme", "light")
        .await
        .unwrap();
    assert_eq!(
        storage
            .preferences
            .get_item("app_theme")
            .await
            .unwrap()
            .as_deref(),
        Some("light")
    );
}
