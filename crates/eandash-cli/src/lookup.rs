//! Single-code lookup. Validates the code first and persists nothing.

use anyhow::Context;
use clap::Args;

use eandash_core::{AppConfig, EanCode};
use eandash_db::DEFAULT_PROFILE;

use crate::gateways;

#[derive(Args)]
pub struct LookupArgs {
    /// 13-digit EAN code
    pub ean: String,
    /// Credentials profile to use
    #[arg(long, default_value = DEFAULT_PROFILE)]
    pub profile: String,
}

pub async fn run(config: &AppConfig, args: LookupArgs) -> anyhow::Result<()> {
    let code = EanCode::parse(&args.ean)
        .map_err(|error| anyhow::anyhow!("invalid EAN code '{}': {error}", args.ean))?;

    let pool = gateways::connect(config).await?;
    let row = eandash_db::get_seller_credentials(&pool, &args.profile)
        .await
        .with_context(|| {
            format!(
                "no seller credentials stored for profile '{}'; \
                 run `eandash credentials set` first",
                args.profile
            )
        })?;
    let credentials = gateways::row_to_credentials(row);

    let client = gateways::build_seller_client(config)?;
    match client.fetch_one(&code, &credentials).await? {
        Some(attributes) => {
            println!("{}", serde_json::to_string_pretty(&attributes)?);
        }
        None => println!("no marketplace data found for {code}"),
    }

    Ok(())
}
