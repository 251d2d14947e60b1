//! Frame classification for the feed protocol.
//!
//! The backend speaks UTF-8 text frames only: the literal heartbeat
//! sentinels, and JSON arrays of gas-fee records for everything else.

use coingas_core::data::GasFee;
use tokio_tungstenite::tungstenite::protocol::Message;

/// Outbound liveness probe sent while the session is open.
pub const HEARTBEAT_PROBE: &str = "ping";

/// Expected heartbeat reply; consumed silently, never forwarded.
pub const HEARTBEAT_REPLY: &str = "pong";

/// A classified inbound frame.
#[derive(Debug, Clone)]
pub enum FeedFrame {
    /// A decoded gas-fee update to forward to the caller.
    Update(Vec<GasFee>),
    /// The heartbeat reply sentinel.
    HeartbeatReply,
    /// A text frame that failed to decode as gas-fee data.
    Malformed(String),
    /// The server is closing the connection.
    Close(String),
    /// A protocol-level frame with no feed meaning (ping/pong/binary).
    Ignored,
}

impl FeedFrame {
    /// Classifies a raw transport message.
    #[must_use]
    pub fn classify(message: Message) -> Self {
        match message {
            Message::Text(text) => {
                if text == HEARTBEAT_REPLY {
                    return Self::HeartbeatReply;
                }
                match serde_json::from_str::<Vec<GasFee>>(&text) {
                    Ok(update) => Self::Update(update),
                    Err(err) => Self::Malformed(err.to_string()),
                }
            }
            Message::Close(frame) => Self::Close(
                frame
                    .map(|f| f.reason.to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "server closed connection".to_string()),
            ),
            Message::Ping(_) | Message::Pong(_) | Message::Binary(_) | Message::Frame(_) => {
                Self::Ignored
            }
        }
    }
}
