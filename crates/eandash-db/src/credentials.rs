//! Database operations for the `seller_credentials` table.
//!
//! One credential set per profile (a single `default` profile in practice).
//! Secrets live in the database, never in config files.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

pub const DEFAULT_PROFILE: &str = "default";

/// A row from the `seller_credentials` table.
#[derive(Clone, sqlx::FromRow)]
pub struct SellerCredentialRow {
    pub id: i64,
    pub profile: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub marketplace_id: String,
    pub merchant_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for SellerCredentialRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerCredentialRow")
            .field("id", &self.id)
            .field("profile", &self.profile)
            .field("access_key", &"[redacted]")
            .field("secret_key", &"[redacted]")
            .field("region", &self.region)
            .field("marketplace_id", &self.marketplace_id)
            .field("merchant_id", &self.merchant_id)
            .finish()
    }
}

/// Upserts the credential set for a profile.
///
/// Conflicts on `profile` replace every credential column and `updated_at`
/// in place.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_seller_credentials(
    pool: &PgPool,
    profile: &str,
    access_key: &str,
    secret_key: &str,
    region: &str,
    marketplace_id: &str,
    merchant_id: &str,
) -> Result<SellerCredentialRow, DbError> {
    let row = sqlx::query_as::<_, SellerCredentialRow>(
        "INSERT INTO seller_credentials \
             (profile, access_key, secret_key, region, marketplace_id, merchant_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (profile) DO UPDATE SET \
             access_key     = EXCLUDED.access_key, \
             secret_key     = EXCLUDED.secret_key, \
             region         = EXCLUDED.region, \
             marketplace_id = EXCLUDED.marketplace_id, \
             merchant_id    = EXCLUDED.merchant_id, \
             updated_at     = NOW() \
         RETURNING id, profile, access_key, secret_key, region, marketplace_id, \
                   merchant_id, created_at, updated_at",
    )
    .bind(profile)
    .bind(access_key)
    .bind(secret_key)
    .bind(region)
    .bind(marketplace_id)
    .bind(merchant_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Fetches the credential set for a profile.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the profile has no stored credentials,
/// or [`DbError::Sqlx`] if the query fails.
pub async fn get_seller_credentials(
    pool: &PgPool,
    profile: &str,
) -> Result<SellerCredentialRow, DbError> {
    let row = sqlx::query_as::<_, SellerCredentialRow>(
        "SELECT id, profile, access_key, secret_key, region, marketplace_id, \
                merchant_id, created_at, updated_at \
         FROM seller_credentials \
         WHERE profile = $1",
    )
    .bind(profile)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}
