//! Seller credential management: store a profile, verify it against the API.

use anyhow::Context;
use clap::Subcommand;

use eandash_core::AppConfig;
use eandash_db::DEFAULT_PROFILE;

use crate::gateways;

#[derive(Subcommand)]
pub enum CredentialCommand {
    /// Store (or replace) the credentials for a profile
    Set {
        #[arg(long)]
        access_key: String,
        #[arg(long)]
        secret_key: String,
        #[arg(long, default_value = "eu-west-1")]
        region: String,
        #[arg(long)]
        marketplace_id: String,
        #[arg(long)]
        merchant_id: String,
        #[arg(long, default_value = DEFAULT_PROFILE)]
        profile: String,
    },
    /// Verify stored credentials against the seller API
    Test {
        #[arg(long, default_value = DEFAULT_PROFILE)]
        profile: String,
    },
}

pub async fn run(config: &AppConfig, command: CredentialCommand) -> anyhow::Result<()> {
    let pool = gateways::connect(config).await?;

    match command {
        CredentialCommand::Set {
            access_key,
            secret_key,
            region,
            marketplace_id,
            merchant_id,
            profile,
        } => {
            eandash_db::upsert_seller_credentials(
                &pool,
                &profile,
                &access_key,
                &secret_key,
                &region,
                &marketplace_id,
                &merchant_id,
            )
            .await?;
            println!("seller credentials saved for profile '{profile}'");
        }
        CredentialCommand::Test { profile } => {
            let row = eandash_db::get_seller_credentials(&pool, &profile)
                .await
                .with_context(|| {
                    format!(
                        "no seller credentials stored for profile '{profile}'; \
                         run `eandash credentials set` first"
                    )
                })?;
            let credentials = gateways::row_to_credentials(row);

            let client = gateways::build_seller_client(config)?;
            let result = client.test_connection(&credentials).await?;

            if result.success {
                println!("connection ok: {}", result.message);
            } else {
                println!("connection failed: {}", result.message);
            }
            if let Some(marketplace) = result.marketplace {
                println!("marketplace: {marketplace}");
            }
            if let Some(rate_limit) = result.rate_limit {
                println!(
                    "rate limit: {}/{} requests remaining",
                    rate_limit.remaining, rate_limit.total
                );
            }
        }
    }

    Ok(())
}
