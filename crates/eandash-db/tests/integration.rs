//! Offline unit tests for eandash-db pool configuration and row types.
//! These tests do not require a live database connection.

use eandash_core::{AppConfig, Dimensions, Environment, ProductStatus, Weight};
use eandash_db::{PoolConfig, ProductFilters, ProductRow, ProductSort};
use rust_decimal::Decimal;
use sqlx::types::Json;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        seller_api_base_url: "https://sellingpartnerapi-eu.amazon.com".to_string(),
        seller_request_timeout_secs: 30,
        seller_user_agent: "ua".to_string(),
        import_chunk_size: 10,
        import_inter_chunk_delay_ms: 1000,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`ProductRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn product_row_has_expected_fields() {
    use chrono::Utc;

    let row = ProductRow {
        id: 1_i64,
        title: "Product 5013493389571".to_string(),
        description: "Fetching product details...".to_string(),
        ean_code: "5013493389571".to_string(),
        asin: None,
        category: None,
        price: Decimal::ZERO,
        dimensions: Json(Dimensions::zero()),
        weight: Json(Weight::zero()),
        images: vec![],
        status: "pending".to_string(),
        browse_nodes: vec![],
        sales_rank: None,
        brand: None,
        list_price: None,
        product_group: None,
        product_type: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.ean_code, "5013493389571");
    assert_eq!(row.status.parse::<ProductStatus>().unwrap(), ProductStatus::Pending);
    assert!(row.asin.is_none());
}

#[test]
fn product_sort_parses_whitelisted_columns() {
    for (raw, expected) in [
        ("title", ProductSort::Title),
        ("price", ProductSort::Price),
        ("ean_code", ProductSort::EanCode),
        ("status", ProductSort::Status),
        ("created_at", ProductSort::CreatedAt),
        ("updated_at", ProductSort::UpdatedAt),
    ] {
        assert_eq!(raw.parse::<ProductSort>().unwrap(), expected);
    }
}

#[test]
fn product_sort_rejects_arbitrary_columns() {
    assert!("id; DROP TABLE products".parse::<ProductSort>().is_err());
    assert!("".parse::<ProductSort>().is_err());
}

#[test]
fn product_filters_default_is_unfiltered_first_page() {
    let filters = ProductFilters::default();
    assert!(filters.search.is_none());
    assert!(filters.status.is_none());
    assert!(filters.category.is_none());
    assert_eq!(filters.sort, ProductSort::CreatedAt);
    assert!(!filters.ascending);
}
