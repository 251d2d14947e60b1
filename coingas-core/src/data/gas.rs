//! Gas-fee record types as carried on the wire.

use serde::{Deserialize, Serialize};

/// Fee speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeLevel {
    /// Cheapest, slowest confirmation.
    Low,
    /// Balanced price and confirmation time.
    Medium,
    /// Most expensive, fastest confirmation.
    High,
}

impl FeeLevel {
    /// Returns the level as a static string matching the wire encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for FeeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One speed tier of a network's current fee schedule.
///
/// Price and ETA are kept as strings; the backend formats them for display
/// and the feed client never does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpeed {
    /// Speed tier this entry describes.
    pub level: FeeLevel,
    /// Formatted gas price (e.g., "12 gwei").
    pub gas_price: String,
    /// Estimated confirmation time (e.g., "~30 sec").
    pub estimated_time: String,
}

/// Current gas fees for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasFee {
    /// Network identifier (e.g., "ethereum").
    pub network: String,
    /// Native token symbol (e.g., "ETH").
    pub symbol: String,
    /// Fee options per speed tier.
    pub speeds: Vec<NetworkSpeed>,
    /// Backend timestamp of the last refresh.
    pub last_updated: String,
}

impl GasFee {
    /// Returns the speed entry for a given tier, if present.
    #[must_use]
    pub fn speed(&self, level: FeeLevel) -> Option<&NetworkSpeed> {
        self.speeds.iter().find(|s| s.level == level)
    }
}
