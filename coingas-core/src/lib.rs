//! # CoinGas Core
//!
//! Core types for the CoinGas live gas-fee feed.
//!
//! This crate provides:
//! - The gas-fee payload model (`GasFee`, `NetworkSpeed`, `FeeLevel`)
//! - The `FeedError` taxonomy shared by the feed client and its callers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]

/// Gas-fee payload data structures
pub mod data;

/// Error types and classification
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{FeeLevel, GasFee, NetworkSpeed};
    pub use crate::error::FeedError;
}
