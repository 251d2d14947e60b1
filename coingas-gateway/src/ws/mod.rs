//! WebSocket feed client infrastructure.
//!
//! This module provides the connection manager for the live gas-fee feed:
//! - At most one live session at a time, guarded against concurrent `connect`
//! - Automatic reconnection with a fixed delay and a bounded attempt budget
//! - Outbound text-sentinel heartbeat while the session is open
//! - An explicit connection state machine instead of scattered flags
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use coingas_gateway::callback::FeedCallback;
//! use coingas_gateway::ws::{FeedClient, FeedConfig};
//!
//! struct Printer;
//!
//! #[async_trait::async_trait]
//! impl FeedCallback for Printer {
//!     async fn on_data(&self, update: Vec<coingas_core::data::GasFee>) {
//!         println!("{} networks updated", update.len());
//!     }
//! }
//!
//! let client = FeedClient::new(FeedConfig::from_env());
//! client.connect(Arc::new(Printer));
//! ```

mod client;
mod config;
mod message;
mod state;

pub use client::FeedClient;
pub use config::{FeedConfig, FeedConfigBuilder};
pub use message::{FeedFrame, HEARTBEAT_PROBE, HEARTBEAT_REPLY};
pub use state::ConnectionState;
