use thiserror::Error;

use crate::engine::GatewayError;

/// Errors that abort an import run before any chunk is processed.
///
/// Everything that can go wrong after the run has started — per-item
/// persistence failures, per-chunk lookup failures — is counted and logged
/// rather than surfaced here, so a single bad chunk never kills the run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no EAN codes to import")]
    EmptyInput,

    /// Credentials could not be loaded; the run must not start without them.
    #[error("failed to load seller credentials: {0}")]
    Credentials(#[source] GatewayError),
}
