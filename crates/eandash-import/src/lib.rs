//! Batch EAN import and enrichment pipeline.
//!
//! Drives an ordered list of EAN codes through fixed-size chunks: persist a
//! placeholder for every code, resolve the chunk against the marketplace
//! lookup gateway, persist the merged records, and report progress after
//! each chunk. The run is controlled cooperatively — pause, resume, and a
//! one-way stop are observed at chunk boundaries, never mid-chunk.
//!
//! The engine is written against gateway traits ([`engine::ProductStore`],
//! [`engine::LookupGateway`], [`engine::CredentialsSource`]) so the whole
//! state machine is unit-testable without a database or network.

pub mod control;
pub mod engine;
mod error;
pub mod parser;
pub mod progress;

pub use control::{ControlState, RunControl};
pub use engine::{
    CredentialsSource, EngineConfig, GatewayError, ImportEngine, LookupGateway, ProductStore,
};
pub use error::ImportError;
pub use parser::{parse_codes, ParsedCodes, PREVIEW_LIMIT};
pub use progress::{ProgressSnapshot, RunSummary};
