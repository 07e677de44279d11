//! Offline tests for adcraft-db pool configuration and row types.
//! These tests do not require a live database connection.

use adcraft_core::{AppConfig, Environment, InvoiceDraft, InvoiceItem, LlmProviderKind, PartyInfo};
use adcraft_db::{DbError, PoolConfig, PosterEventKind, PosterEventRow};

fn app_config(database_url: Option<&str>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        llm_provider: LlmProviderKind::Gemini,
        gemini_api_key: None,
        anthropic_api_key: None,
        openai_api_key: None,
        llm_user_agent: "ua".to_string(),
        database_url: database_url.map(str::to_string),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config(Some("postgres://example")));
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connect_without_database_url_is_missing_url() {
    let err = adcraft_db::connect_pool_from_config(&app_config(None))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::MissingDatabaseUrl));

    let err = adcraft_db::connect_pool_from_config(&app_config(Some("   ")))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::MissingDatabaseUrl));
}

/// Compile-time smoke test: confirm that [`PosterEventRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn poster_event_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let poster_id = Uuid::new_v4();
    let row = PosterEventRow {
        id: 1_i64,
        user_id: Uuid::nil(),
        poster_id: Some(poster_id),
        event_type: PosterEventKind::Generated.to_string(),
        event_data: serde_json::json!({ "provider": "gemini", "score": 85 }),
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.poster_id, Some(poster_id));
    assert_eq!(row.event_type, "generated");
    assert_eq!(row.event_data["score"], 85);
}

#[tokio::test]
async fn overflowing_invoice_is_rejected_before_any_query() {
    // Lazy pool: nothing listens here, so any query would fail with Sqlx.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://adcraft@127.0.0.1:1/adcraft")
        .expect("lazy pool should build");
    let party = |name: &str| PartyInfo {
        name: name.to_string(),
        contact: String::new(),
        address: String::new(),
    };
    let draft = InvoiceDraft {
        business: party("Biz"),
        client: party("Client"),
        items: vec![InvoiceItem {
            description: "Work".to_string(),
            quantity: 2,
            unit_price: rust_decimal::Decimal::MAX,
        }],
        notes: None,
    };

    let err = adcraft_db::insert_invoice(&pool, uuid::Uuid::nil(), &draft, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidRecord(ref msg) if msg.contains("out of range")));

    let err = adcraft_db::update_invoice(&pool, uuid::Uuid::nil(), uuid::Uuid::nil(), &draft, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidRecord(_)));
}
