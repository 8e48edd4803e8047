//! Integration tests for `PgLedgerStore`.

use guesswork_core::ledger_store::LedgerStore;
use guesswork_ledger_store::PgLedgerStore;
use sqlx::PgPool;

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_load_returns_empty_when_nothing_stored(pool: PgPool) {
    let store = PgLedgerStore::new(pool);

    let loaded = store.load().await.unwrap();

    assert!(loaded.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_save_then_load_preserves_order(pool: PgPool) {
    let store = PgLedgerStore::new(pool);
    let stored = labels(&["Espresso", "Compass", "Umbrella"]);

    store.save(&stored).await.unwrap();

    assert_eq!(store.load().await.unwrap(), stored);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_save_overwrites_previous_list(pool: PgPool) {
    let store = PgLedgerStore::new(pool);

    store.save(&labels(&["Espresso"])).await.unwrap();
    store.save(&labels(&["Compass", "Kite"])).await.unwrap();

    assert_eq!(store.load().await.unwrap(), labels(&["Compass", "Kite"]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_storage_keys_are_isolated(pool: PgPool) {
    let first = PgLedgerStore::with_key(pool.clone(), "player-one");
    let second = PgLedgerStore::with_key(pool, "player-two");

    first.save(&labels(&["Espresso"])).await.unwrap();

    assert!(second.load().await.unwrap().is_empty());
    assert_eq!(first.load().await.unwrap(), labels(&["Espresso"]));
}

#[sqlx::test]
async fn test_ensure_schema_is_idempotent(pool: PgPool) {
    let store = PgLedgerStore::new(pool);

    store.ensure_schema().await.unwrap();
    store.ensure_schema().await.unwrap();
    store.save(&labels(&["Kite"])).await.unwrap();

    assert_eq!(store.load().await.unwrap(), labels(&["Kite"]));
}
