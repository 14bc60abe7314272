//! Live integration tests for eandash-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/eandash-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use rust_decimal::Decimal;

use eandash_core::{
    Dimensions, LengthUnit, MarketplaceAttributes, NewProduct, ProductStatus, Weight, WeightUnit,
};
use eandash_db::{
    delete_product, get_product, get_product_by_ean, get_seller_credentials, list_products,
    ping, upsert_product, upsert_seller_credentials, DbError, ProductFilters, DEFAULT_PROFILE,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn camera_attrs() -> MarketplaceAttributes {
    MarketplaceAttributes {
        title: "Sony ZV-1 Digital Camera".to_string(),
        description: "Compact vlogging camera".to_string(),
        asin: Some("B08965JV8D".to_string()),
        price: Decimal::new(74999, 2),
        dimensions: Dimensions {
            length: Decimal::new(105, 1),
            width: Decimal::new(44, 1),
            height: Decimal::new(6, 0),
            unit: LengthUnit::Cm,
        },
        weight: Weight {
            value: Decimal::new(294, 3),
            unit: WeightUnit::Kg,
        },
        images: vec!["https://example.com/zv1.jpg".to_string()],
        browse_nodes: vec!["Digital Cameras".to_string()],
        sales_rank: Some(127),
        brand: Some("Sony".to_string()),
        list_price: Some(Decimal::new(79999, 2)),
        product_group: Some("Electronics".to_string()),
        product_type: Some("Digital Camera".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Section 1: Product upsert keyed by EAN code
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_twice_converges_on_one_row(pool: sqlx::PgPool) {
    let ean = "5013493389571";
    let first = upsert_product(&pool, &NewProduct::placeholder(ean))
        .await
        .expect("first upsert failed");
    let second = upsert_product(&pool, &NewProduct::placeholder(ean))
        .await
        .expect("second upsert failed");

    // Same natural key, same row: the second import updates in place.
    assert_eq!(first.id, second.id);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE ean_code = $1")
            .bind(ean)
            .fetch_one(&pool)
            .await
            .expect("count query failed");
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn placeholder_then_enriched_transitions_pending_to_active(pool: sqlx::PgPool) {
    let ean = "5013493389571";
    let placeholder = upsert_product(&pool, &NewProduct::placeholder(ean))
        .await
        .expect("placeholder upsert failed");
    assert_eq!(placeholder.status, "pending");
    assert_eq!(placeholder.title, format!("Product {ean}"));
    assert_eq!(placeholder.price, Decimal::ZERO);

    let enriched = upsert_product(&pool, &NewProduct::enriched(ean, &camera_attrs()))
        .await
        .expect("enriched upsert failed");

    assert_eq!(enriched.id, placeholder.id);
    assert_eq!(enriched.status, "active");
    assert_eq!(enriched.title, "Sony ZV-1 Digital Camera");
    assert_eq!(enriched.price, Decimal::new(74999, 2));
    assert_eq!(enriched.asin.as_deref(), Some("B08965JV8D"));
    assert_eq!(enriched.dimensions.0.unit, LengthUnit::Cm);
    assert_eq!(enriched.weight.0.value, Decimal::new(294, 3));
    assert_eq!(enriched.images, vec!["https://example.com/zv1.jpg"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_product_by_ean_distinguishes_present_and_absent(pool: sqlx::PgPool) {
    upsert_product(&pool, &NewProduct::placeholder("5013493389571"))
        .await
        .expect("upsert failed");

    let found = get_product_by_ean(&pool, "5013493389571")
        .await
        .expect("query failed");
    assert!(found.is_some());

    let missing = get_product_by_ean(&pool, "4006381333931")
        .await
        .expect("query failed");
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_products_filters_by_status(pool: sqlx::PgPool) {
    upsert_product(&pool, &NewProduct::placeholder("5013493389571"))
        .await
        .expect("upsert failed");
    upsert_product(
        &pool,
        &NewProduct::enriched("4006381333931", &camera_attrs()),
    )
    .await
    .expect("upsert failed");

    let filters = ProductFilters {
        status: Some(ProductStatus::Pending),
        ..ProductFilters::default()
    };
    let page = list_products(&pool, &filters).await.expect("list failed");

    assert_eq!(page.total, 1);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].ean_code, "5013493389571");
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_product_removes_row_and_reports_missing(pool: sqlx::PgPool) {
    let row = upsert_product(&pool, &NewProduct::placeholder("5013493389571"))
        .await
        .expect("upsert failed");

    delete_product(&pool, row.id).await.expect("delete failed");
    assert!(matches!(
        get_product(&pool, row.id).await,
        Err(DbError::NotFound)
    ));
    assert!(matches!(
        delete_product(&pool, row.id).await,
        Err(DbError::NotFound)
    ));
}

// ---------------------------------------------------------------------------
// Section 2: Seller credentials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn credential_upsert_converges_on_profile(pool: sqlx::PgPool) {
    let first = upsert_seller_credentials(
        &pool,
        DEFAULT_PROFILE,
        "old-access",
        "old-secret",
        "eu-west-1",
        "A13V1IB3VIYZZH",
        "M1",
    )
    .await
    .expect("first upsert failed");

    let second = upsert_seller_credentials(
        &pool,
        DEFAULT_PROFILE,
        "new-access",
        "new-secret",
        "eu-west-1",
        "A13V1IB3VIYZZH",
        "M1",
    )
    .await
    .expect("second upsert failed");

    assert_eq!(first.id, second.id);
    assert_eq!(second.access_key, "new-access");

    let fetched = get_seller_credentials(&pool, DEFAULT_PROFILE)
        .await
        .expect("fetch failed");
    assert_eq!(fetched.secret_key, "new-secret");
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_credentials_profile_is_not_found(pool: sqlx::PgPool) {
    assert!(matches!(
        get_seller_credentials(&pool, "nonexistent").await,
        Err(DbError::NotFound)
    ));
}

// ---------------------------------------------------------------------------
// Section 3: Pool health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn ping_succeeds_on_live_pool(pool: sqlx::PgPool) {
    ping(&pool).await.expect("ping failed");
}
