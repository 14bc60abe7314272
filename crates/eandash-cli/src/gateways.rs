//! Wiring between the import engine's gateway traits and the real services.

use std::collections::HashMap;

use anyhow::Context;
use sqlx::PgPool;

use eandash_core::{AppConfig, MarketplaceAttributes, NewProduct};
use eandash_db::{DbError, PoolConfig, SellerCredentialRow};
use eandash_import::{CredentialsSource, GatewayError, LookupGateway, ProductStore};
use eandash_seller::{SellerClient, SellerCredentials};

/// Connects to Postgres and brings the schema up to date.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = eandash_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
        .await
        .context("failed to connect to database")?;
    eandash_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;
    Ok(pool)
}

pub fn build_seller_client(config: &AppConfig) -> anyhow::Result<SellerClient> {
    SellerClient::new(
        &config.seller_api_base_url,
        config.seller_request_timeout_secs,
        &config.seller_user_agent,
    )
    .context("failed to build seller API client")
}

pub fn row_to_credentials(row: SellerCredentialRow) -> SellerCredentials {
    SellerCredentials {
        access_key: row.access_key,
        secret_key: row.secret_key,
        region: row.region,
        marketplace_id: row.marketplace_id,
        merchant_id: row.merchant_id,
    }
}

/// Product persistence backed by the `products` table.
///
/// Both placeholder and enriched writes go through the same upsert keyed by
/// EAN code, so re-importing a code converges on one row.
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProductStore for PgProductStore {
    async fn create_placeholder(&self, product: &NewProduct) -> Result<(), GatewayError> {
        eandash_db::upsert_product(&self.pool, product).await?;
        Ok(())
    }

    async fn upsert_enriched(&self, product: &NewProduct) -> Result<(), GatewayError> {
        eandash_db::upsert_product(&self.pool, product).await?;
        Ok(())
    }

    async fn refresh(&self) -> Result<(), GatewayError> {
        // No cached listing on the CLI side; nothing to invalidate.
        Ok(())
    }
}

/// Marketplace lookups delegated to the seller API client.
pub struct SellerLookup {
    client: SellerClient,
}

impl SellerLookup {
    pub fn new(client: SellerClient) -> Self {
        Self { client }
    }
}

impl LookupGateway for SellerLookup {
    async fn fetch_batch(
        &self,
        ean_codes: &[String],
        credentials: &SellerCredentials,
    ) -> Result<HashMap<String, MarketplaceAttributes>, GatewayError> {
        Ok(self.client.fetch_batch(ean_codes, credentials).await?)
    }
}

/// Loads seller credentials for a profile from the database.
pub struct DbCredentialsSource {
    pool: PgPool,
    profile: String,
}

impl DbCredentialsSource {
    pub fn new(pool: PgPool, profile: &str) -> Self {
        Self {
            pool,
            profile: profile.to_string(),
        }
    }
}

impl CredentialsSource for DbCredentialsSource {
    async fn credentials(&self) -> Result<SellerCredentials, GatewayError> {
        let row = eandash_db::get_seller_credentials(&self.pool, &self.profile)
            .await
            .map_err(|error| -> GatewayError {
                match error {
                    DbError::NotFound => format!(
                        "no seller credentials stored for profile '{}'; \
                         run `eandash credentials set` first",
                        self.profile
                    )
                    .into(),
                    other => Box::new(other),
                }
            })?;
        Ok(row_to_credentials(row))
    }
}
