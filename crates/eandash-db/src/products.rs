//! Database operations for the `products` table.
//!
//! The EAN code is the natural key: writes go through an upsert so that
//! re-importing a code updates the existing row instead of duplicating it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;

use eandash_core::{Dimensions, NewProduct, ProductStatus, Weight};

use crate::DbError;

/// A row from the `products` table.
///
/// `dimensions` and `weight` are stored as JSONB and decoded through the
/// core types.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub ean_code: String,
    pub asin: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    pub dimensions: Json<Dimensions>,
    pub weight: Json<Weight>,
    pub images: Vec<String>,
    pub status: String,
    pub browse_nodes: Vec<String>,
    pub sales_rank: Option<i64>,
    pub brand: Option<String>,
    pub list_price: Option<Decimal>,
    pub product_group: Option<String>,
    pub product_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort column for product listings. A closed set so that the ORDER BY
/// clause is never built from caller-supplied strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    Title,
    Price,
    EanCode,
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl ProductSort {
    fn column(self) -> &'static str {
        match self {
            ProductSort::Title => "title",
            ProductSort::Price => "price",
            ProductSort::EanCode => "ean_code",
            ProductSort::Status => "status",
            ProductSort::CreatedAt => "created_at",
            ProductSort::UpdatedAt => "updated_at",
        }
    }
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(ProductSort::Title),
            "price" => Ok(ProductSort::Price),
            "ean_code" => Ok(ProductSort::EanCode),
            "status" => Ok(ProductSort::Status),
            "created_at" => Ok(ProductSort::CreatedAt),
            "updated_at" => Ok(ProductSort::UpdatedAt),
            other => Err(format!("unknown sort column: {other}")),
        }
    }
}

/// Input filters for product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters<'a> {
    /// Substring match against title and EAN code.
    pub search: Option<&'a str>,
    pub status: Option<ProductStatus>,
    pub category: Option<&'a str>,
    pub sort: ProductSort,
    pub ascending: bool,
    /// 1-based page number; clamped to the available range.
    pub page: i64,
    pub limit: i64,
}

impl ProductFilters<'_> {
    pub const DEFAULT_LIMIT: i64 = 25;
}

/// One page of product rows plus pagination bookkeeping.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub rows: Vec<ProductRow>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
    pub limit: i64,
}

const PRODUCT_COLUMNS: &str = "id, title, description, ean_code, asin, category, price, \
     dimensions, weight, images, status, browse_nodes, sales_rank, brand, \
     list_price, product_group, product_type, created_at, updated_at";

/// Upserts a product row keyed by EAN code.
///
/// Conflicts on `ean_code` update every mutable column and `updated_at` in
/// place, so a second import of the same code converges on one row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_product(pool: &PgPool, product: &NewProduct) -> Result<ProductRow, DbError> {
    let query = format!(
        "INSERT INTO products \
             (title, description, ean_code, asin, category, price, dimensions, \
              weight, images, status, browse_nodes, sales_rank, brand, \
              list_price, product_group, product_type) \
         VALUES ($1, $2, $3, $4, $5, $6, $7::jsonb, \
                 $8::jsonb, $9, $10, $11, $12, $13, \
                 $14, $15, $16) \
         ON CONFLICT (ean_code) DO UPDATE SET \
             title         = EXCLUDED.title, \
             description   = EXCLUDED.description, \
             asin          = EXCLUDED.asin, \
             category      = EXCLUDED.category, \
             price         = EXCLUDED.price, \
             dimensions    = EXCLUDED.dimensions, \
             weight        = EXCLUDED.weight, \
             images        = EXCLUDED.images, \
             status        = EXCLUDED.status, \
             browse_nodes  = EXCLUDED.browse_nodes, \
             sales_rank    = EXCLUDED.sales_rank, \
             brand         = EXCLUDED.brand, \
             list_price    = EXCLUDED.list_price, \
             product_group = EXCLUDED.product_group, \
             product_type  = EXCLUDED.product_type, \
             updated_at    = NOW() \
         RETURNING {PRODUCT_COLUMNS}"
    );

    let row = sqlx::query_as::<_, ProductRow>(&query)
        .bind(&product.title)
        .bind(&product.description)
        .bind(&product.ean_code)
        .bind(&product.asin)
        .bind(&product.category)
        .bind(product.price)
        .bind(Json(&product.dimensions))
        .bind(Json(&product.weight))
        .bind(&product.images)
        .bind(product.status.as_str())
        .bind(&product.browse_nodes)
        .bind(product.sales_rank)
        .bind(&product.brand)
        .bind(product.list_price)
        .bind(&product.product_group)
        .bind(&product.product_type)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

/// Fetches a single product by its internal `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_product(pool: &PgPool, id: i64) -> Result<ProductRow, DbError> {
    let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
    let row = sqlx::query_as::<_, ProductRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Fetches a single product by its EAN code, if present.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_product_by_ean(
    pool: &PgPool,
    ean_code: &str,
) -> Result<Option<ProductRow>, DbError> {
    let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE ean_code = $1");
    let row = sqlx::query_as::<_, ProductRow>(&query)
        .bind(ean_code)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Returns one page of products matching the filters, with a total count.
///
/// The page number is clamped to `1..=total_pages` so an out-of-range page
/// returns the last page rather than an empty one.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either query fails.
pub async fn list_products(
    pool: &PgPool,
    filters: &ProductFilters<'_>,
) -> Result<ProductPage, DbError> {
    let status = filters.status.map(ProductStatus::as_str);

    let total: i64 = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM products \
         WHERE ($1::TEXT IS NULL OR title ILIKE '%' || $1 || '%' \
                OR ean_code ILIKE '%' || $1 || '%') \
           AND ($2::TEXT IS NULL OR status = $2) \
           AND ($3::TEXT IS NULL OR category = $3)",
    )
    .bind(filters.search)
    .bind(status)
    .bind(filters.category)
    .fetch_one(pool)
    .await?;

    let limit = if filters.limit > 0 {
        filters.limit
    } else {
        ProductFilters::DEFAULT_LIMIT
    };
    let total_pages = ((total + limit - 1) / limit).max(1);
    let page = filters.page.clamp(1, total_pages);
    let offset = (page - 1) * limit;

    let direction = if filters.ascending { "ASC" } else { "DESC" };
    // Sort column comes from the ProductSort whitelist, never from input.
    let query = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products \
         WHERE ($1::TEXT IS NULL OR title ILIKE '%' || $1 || '%' \
                OR ean_code ILIKE '%' || $1 || '%') \
           AND ($2::TEXT IS NULL OR status = $2) \
           AND ($3::TEXT IS NULL OR category = $3) \
         ORDER BY {} {direction}, id DESC \
         LIMIT $4 OFFSET $5",
        filters.sort.column()
    );

    let rows = sqlx::query_as::<_, ProductRow>(&query)
        .bind(filters.search)
        .bind(status)
        .bind(filters.category)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(ProductPage {
        rows,
        total,
        page,
        total_pages,
        limit,
    })
}

/// Replaces every mutable column of a product by internal `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_product(
    pool: &PgPool,
    id: i64,
    product: &NewProduct,
) -> Result<ProductRow, DbError> {
    let query = format!(
        "UPDATE products SET \
             title         = $1, \
             description   = $2, \
             ean_code      = $3, \
             asin          = $4, \
             category      = $5, \
             price         = $6, \
             dimensions    = $7::jsonb, \
             weight        = $8::jsonb, \
             images        = $9, \
             status        = $10, \
             browse_nodes  = $11, \
             sales_rank    = $12, \
             brand         = $13, \
             list_price    = $14, \
             product_group = $15, \
             product_type  = $16, \
             updated_at    = NOW() \
         WHERE id = $17 \
         RETURNING {PRODUCT_COLUMNS}"
    );

    let row = sqlx::query_as::<_, ProductRow>(&query)
        .bind(&product.title)
        .bind(&product.description)
        .bind(&product.ean_code)
        .bind(&product.asin)
        .bind(&product.category)
        .bind(product.price)
        .bind(Json(&product.dimensions))
        .bind(Json(&product.weight))
        .bind(&product.images)
        .bind(product.status.as_str())
        .bind(&product.browse_nodes)
        .bind(product.sales_rank)
        .bind(&product.brand)
        .bind(product.list_price)
        .bind(&product.product_group)
        .bind(&product.product_type)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Deletes a product by internal `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_product(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
