//! Bulk import: parse codes, then run the enrichment engine to completion.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio::io::AsyncReadExt;

use eandash_core::AppConfig;
use eandash_db::DEFAULT_PROFILE;
use eandash_import::{parse_codes, EngineConfig, ImportEngine, RunControl};

use crate::gateways::{self, DbCredentialsSource, PgProductStore, SellerLookup};

#[derive(Args)]
pub struct ImportArgs {
    /// File with EAN codes, one per line; reads stdin when omitted
    pub file: Option<PathBuf>,
    /// Override the configured chunk size
    #[arg(long)]
    pub chunk_size: Option<usize>,
    /// Credentials profile to use
    #[arg(long, default_value = DEFAULT_PROFILE)]
    pub profile: String,
    /// Parse and report the codes without importing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(config: &AppConfig, args: ImportArgs) -> anyhow::Result<()> {
    let raw = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read codes from stdin")?;
            buf
        }
    };

    let parsed = parse_codes(&raw);
    if parsed.total == 0 {
        anyhow::bail!("no EAN codes found in input");
    }
    println!("parsed {} unique EAN codes", parsed.total);

    if args.dry_run {
        const SHOWN: usize = 10;
        for code in parsed.codes.iter().take(SHOWN) {
            println!("  {code}");
        }
        if parsed.total > SHOWN {
            println!("  ... and {} more", parsed.total - SHOWN);
        }
        return Ok(());
    }

    let pool = gateways::connect(config).await?;
    let store = PgProductStore::new(pool.clone());
    let lookup = SellerLookup::new(gateways::build_seller_client(config)?);
    let credentials = DbCredentialsSource::new(pool.clone(), &args.profile);

    let mut engine_config = EngineConfig::from_app_config(config);
    if let Some(chunk_size) = args.chunk_size {
        engine_config.chunk_size = chunk_size.max(1);
    }

    let control = RunControl::new();
    let (engine, mut progress) = ImportEngine::new(
        &store,
        &lookup,
        &credentials,
        engine_config,
        control.subscribe(),
    );

    // Ctrl-C requests a graceful stop; the chunk in flight still completes.
    let stopper = control.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("stop requested; finishing the current chunk");
            stopper.stop();
        }
    });

    let printer = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let snapshot = *progress.borrow();
            println!(
                "{:>3}%  {}/{} processed ({} ok, {} failed)",
                snapshot.percent,
                snapshot.processed,
                snapshot.total,
                snapshot.succeeded,
                snapshot.failed
            );
        }
    });

    let summary = engine.run(&parsed.codes).await?;
    printer.abort();

    if summary.stopped {
        println!(
            "import stopped: {} of {} codes processed ({} ok, {} failed)",
            summary.processed, summary.total, summary.succeeded, summary.failed
        );
    } else {
        println!(
            "import complete: {} codes processed ({} ok, {} failed)",
            summary.processed, summary.succeeded, summary.failed
        );
    }

    Ok(())
}
