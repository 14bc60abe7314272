//! The batch enrichment engine.
//!
//! Processes an ordered EAN list to completion, chunk by chunk, against two
//! external gateways, with cooperative pause/stop control and progress
//! reporting. Chunks are strictly sequential; within a chunk, placeholder
//! and enrichment writes fan out concurrently and are joined with
//! all-settled semantics so one failed write never aborts its siblings.
//!
//! State machine: `Idle → Running → {Paused ⇄ Running} → {Completed | Stopped}`.
//! Stop is observed at the top of the chunk loop only — a chunk already in
//! flight completes, and nothing persisted for it is rolled back.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;

use eandash_core::{AppConfig, MarketplaceAttributes, NewProduct};
use eandash_seller::SellerCredentials;

use crate::control::ControlState;
use crate::error::ImportError;
use crate::progress::{ProgressSnapshot, RunSummary};

/// Opaque error type at the gateway seams. The engine never inspects
/// collaborator errors beyond logging and counting them.
pub type GatewayError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Persistence gateway for product records.
#[allow(async_fn_in_trait)]
pub trait ProductStore {
    /// Persists a pending placeholder. Upsert semantics by EAN code: writing
    /// the same code twice converges on one record.
    async fn create_placeholder(&self, product: &NewProduct) -> Result<(), GatewayError>;

    /// Persists a merged, enriched record (status already `active`).
    async fn upsert_enriched(&self, product: &NewProduct) -> Result<(), GatewayError>;

    /// Called after every chunk so readers can refresh cached listings.
    async fn refresh(&self) -> Result<(), GatewayError>;
}

/// Marketplace lookup gateway. Codes the service cannot resolve are absent
/// from the returned mapping — not an error.
#[allow(async_fn_in_trait)]
pub trait LookupGateway {
    async fn fetch_batch(
        &self,
        ean_codes: &[String],
        credentials: &SellerCredentials,
    ) -> Result<HashMap<String, MarketplaceAttributes>, GatewayError>;
}

/// Supplies seller credentials for the run. A failure here aborts the run
/// before any chunk is processed.
#[allow(async_fn_in_trait)]
pub trait CredentialsSource {
    async fn credentials(&self) -> Result<SellerCredentials, GatewayError>;
}

/// Chunking and pacing knobs, fed from app config.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub chunk_size: usize,
    /// Fixed delay between chunks, to avoid overwhelming the lookup service.
    pub inter_chunk_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            inter_chunk_delay: Duration::from_secs(1),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            chunk_size: config.import_chunk_size.max(1),
            inter_chunk_delay: Duration::from_millis(config.import_inter_chunk_delay_ms),
        }
    }
}

enum PauseWait {
    Resumed,
    Stopped,
}

/// One run of the batch enrichment pipeline.
///
/// Borrows its gateways; consumed by [`ImportEngine::run`]. Construction
/// hands back a progress receiver for display.
pub struct ImportEngine<'a, S, L, C> {
    store: &'a S,
    lookup: &'a L,
    credentials: &'a C,
    config: EngineConfig,
    control: watch::Receiver<ControlState>,
    progress: watch::Sender<ProgressSnapshot>,
}

impl<'a, S, L, C> ImportEngine<'a, S, L, C>
where
    S: ProductStore,
    L: LookupGateway,
    C: CredentialsSource,
{
    pub fn new(
        store: &'a S,
        lookup: &'a L,
        credentials: &'a C,
        config: EngineConfig,
        control: watch::Receiver<ControlState>,
    ) -> (Self, watch::Receiver<ProgressSnapshot>) {
        let (progress, progress_rx) = watch::channel(ProgressSnapshot::default());
        (
            Self {
                store,
                lookup,
                credentials,
                config,
                control,
                progress,
            },
            progress_rx,
        )
    }

    /// Drives the full run to a terminal state.
    ///
    /// Returns a [`RunSummary`] for both completion and user-requested stop;
    /// a stop is a normal partial-success terminal state, not an error.
    ///
    /// # Errors
    ///
    /// - [`ImportError::EmptyInput`] if `codes` is empty.
    /// - [`ImportError::Credentials`] if credentials cannot be loaded; no
    ///   chunk is processed in that case.
    pub async fn run(mut self, codes: &[String]) -> Result<RunSummary, ImportError> {
        if codes.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        let credentials = self
            .credentials
            .credentials()
            .await
            .map_err(ImportError::Credentials)?;

        let total = codes.len();
        let total_chunks = total.div_ceil(self.config.chunk_size);
        tracing::info!(total, total_chunks, "starting EAN import run");

        let mut processed = 0_usize;
        let mut succeeded = 0_usize;
        let mut failed = 0_usize;
        let mut stopped = false;

        self.publish(processed, succeeded, failed, total);

        for (index, chunk) in codes.chunks(self.config.chunk_size).enumerate() {
            if self.control.borrow().stopped {
                stopped = true;
                break;
            }
            if matches!(self.wait_while_paused().await, PauseWait::Stopped) {
                stopped = true;
                break;
            }

            let (chunk_ok, chunk_err) = self.persist_placeholders(chunk).await;
            succeeded += chunk_ok;
            failed += chunk_err;

            if let Err(error) = self.enrich_chunk(chunk, &credentials).await {
                tracing::warn!(
                    chunk = index + 1,
                    total_chunks,
                    error = %error,
                    "chunk lookup failed; continuing with next"
                );
            }

            processed += chunk.len();
            self.publish(processed, succeeded, failed, total);

            if let Err(error) = self.store.refresh().await {
                tracing::debug!(error = %error, "listing refresh failed after chunk");
            }

            tokio::time::sleep(self.config.inter_chunk_delay).await;
        }

        let summary = RunSummary {
            processed,
            succeeded,
            failed,
            total,
            stopped,
        };
        if stopped {
            tracing::info!(
                processed = summary.processed,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "import stopped by request"
            );
        } else {
            tracing::info!(
                processed = summary.processed,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "import completed"
            );
        }

        Ok(summary)
    }

    /// Blocks while the run is paused, waking on control-state changes.
    ///
    /// No progress is consumed while waiting. Returns `Stopped` if a stop
    /// request arrives during (or before) the pause.
    async fn wait_while_paused(&mut self) -> PauseWait {
        loop {
            let state = *self.control.borrow();
            if state.stopped {
                return PauseWait::Stopped;
            }
            if !state.paused {
                return PauseWait::Resumed;
            }
            tracing::debug!("import paused; waiting for resume");
            if self.control.changed().await.is_err() {
                // Control handle dropped; nothing can unpause us anymore.
                return PauseWait::Resumed;
            }
        }
    }

    /// Writes a placeholder for every code in the chunk concurrently.
    ///
    /// All writes settle before returning; a failure increments the failure
    /// count without affecting its siblings.
    async fn persist_placeholders(&self, chunk: &[String]) -> (usize, usize) {
        let writes = chunk.iter().map(|code| async move {
            let placeholder = NewProduct::placeholder(code);
            self.store.create_placeholder(&placeholder).await
        });
        let results = join_all(writes).await;

        let mut ok = 0_usize;
        let mut errs = 0_usize;
        for (code, result) in chunk.iter().zip(results) {
            match result {
                Ok(()) => ok += 1,
                Err(error) => {
                    tracing::warn!(ean = %code, error = %error, "failed to create placeholder");
                    errs += 1;
                }
            }
        }
        (ok, errs)
    }

    /// Resolves the chunk against the lookup gateway and persists the merged
    /// records for every code present in the mapping. Absent codes keep
    /// their pending placeholder.
    ///
    /// Like placeholder writes, enrichment writes all settle before
    /// returning: a failed upsert leaves that one code pending and is
    /// logged, never cancelling its siblings. Only a lookup failure errors,
    /// which the caller treats as a whole-chunk failure.
    async fn enrich_chunk(
        &self,
        chunk: &[String],
        credentials: &SellerCredentials,
    ) -> Result<(), GatewayError> {
        let mapping = self.lookup.fetch_batch(chunk, credentials).await?;

        let resolved: Vec<&String> = chunk
            .iter()
            .filter(|code| mapping.contains_key(code.as_str()))
            .collect();
        let writes = resolved.iter().map(|&code| {
            let enriched = NewProduct::enriched(code, &mapping[code.as_str()]);
            async move { self.store.upsert_enriched(&enriched).await }
        });
        let results = join_all(writes).await;

        for (code, result) in resolved.iter().zip(results) {
            if let Err(error) = result {
                tracing::warn!(ean = %code, error = %error, "failed to persist enriched product");
            }
        }

        Ok(())
    }

    fn publish(&self, processed: usize, succeeded: usize, failed: usize, total: usize) {
        let snapshot = ProgressSnapshot::new(processed, succeeded, failed, total);
        self.progress.send_replace(snapshot);
        tracing::debug!(
            processed,
            total,
            percent = snapshot.percent,
            "import progress"
        );
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
