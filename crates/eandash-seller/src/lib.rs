//! HTTP client for the marketplace seller API.
//!
//! Resolves batches of EAN codes to marketplace product attributes and
//! exposes a connection test for credential validation. The client is
//! credential-independent; per-request seller credentials are supplied by
//! the caller.

mod client;
mod error;
mod types;

pub use client::SellerClient;
pub use error::SellerError;
pub use types::{ConnectionTest, RateLimitInfo, SellerCredentials, SellerProduct};
