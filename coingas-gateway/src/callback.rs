//! Caller-facing callback seam for the feed client.

use async_trait::async_trait;
use coingas_core::data::GasFee;
use coingas_core::error::FeedError;

/// Callback trait for feed events.
///
/// The pair supplied to [`FeedClient::connect`](crate::ws::FeedClient::connect)
/// is retained for the lifetime of the session, including across transparent
/// reconnects. `on_error` has a default no-op body, so callers that only want
/// data can ignore failures entirely.
#[async_trait]
pub trait FeedCallback: Send + Sync {
    /// Called with each decoded gas-fee update, in transport receipt order.
    async fn on_data(&self, update: Vec<GasFee>);

    /// Called when something goes wrong: a frame fails to decode, a
    /// connection attempt fails, or the retry budget is exhausted.
    async fn on_error(&self, error: FeedError) {
        let _ = error;
    }
}
