//! Gas-fee payload data structures.
//!
//! These types mirror the JSON the backend pushes over the live feed: an
//! array of per-network fee records, each carrying the fee options for the
//! low/medium/high speed tiers.

mod gas;

pub use gas::{FeeLevel, GasFee, NetworkSpeed};
