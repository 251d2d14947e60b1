//! # CoinGas Gateway
//!
//! Network communication for the CoinGas dashboard.
//!
//! This crate provides the live-feed connection manager: a WebSocket client
//! that keeps a single streaming session to the backend gas-fee feed alive,
//! probes it with heartbeats, and reconnects transparently when the session
//! drops. Consumers supply a callback pair and never observe transport
//! failures directly; decoded payloads arrive in receipt order and failure
//! descriptions arrive on the error callback.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use coingas_gateway::ws::{FeedClient, FeedConfig};
//!
//! let config = FeedConfig::from_env();
//! let client = FeedClient::new(config);
//! client.connect(Arc::new(MyCallback));
//! // ...
//! client.disconnect();
//! ```

#![warn(missing_docs)]
#![allow(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]

/// Feed event callback trait
pub mod callback;

/// WebSocket feed client infrastructure
pub mod ws;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callback::FeedCallback;
    pub use crate::ws::{ConnectionState, FeedClient, FeedConfig, FeedConfigBuilder};
    pub use coingas_core::data::{FeeLevel, GasFee, NetworkSpeed};
    pub use coingas_core::error::FeedError;
}
