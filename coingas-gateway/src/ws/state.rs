//! Connection state machine for the feed client.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::sync::mpsc;

/// Connection state of the feed client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No session and no work scheduled.
    Idle,
    /// A connection attempt is in flight.
    Connecting,
    /// A session is established and delivering data.
    Open,
    /// The caller requested a close; teardown is in progress. Nominal:
    /// teardown completes inside a single lock hold, so outside observers
    /// only ever see the `Idle` it settles on.
    Closing,
    /// The session dropped without the caller asking; a retry may follow.
    ClosedUnintentional,
}

impl ConnectionState {
    /// Returns true if a session is established.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns true if a connection attempt is in flight.
    #[must_use]
    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting)
    }

    /// Returns true if no session exists and none is being established.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        matches!(self, Self::Idle | Self::ClosedUnintentional)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Open => write!(f, "Open"),
            Self::Closing => write!(f, "Closing"),
            Self::ClosedUnintentional => write!(f, "ClosedUnintentional"),
        }
    }
}

/// Internal state of the feed client.
///
/// All mutation goes through the transition methods below; the client wraps
/// this in an `Arc<RwLock<_>>` shared with the session driver task. The
/// `epoch` counter identifies the current session: `connect` and
/// `disconnect` both bump it, and a driver whose epoch no longer matches
/// must exit without touching anything.
#[derive(Debug)]
pub(crate) struct InternalState {
    /// Current connection state.
    pub state: ConnectionState,
    /// Consecutive unintentional closures since the last successful open.
    pub reconnect_attempts: u32,
    /// Identity of the current session driver.
    pub epoch: u64,
    /// Shutdown signal for the open session, if one exists.
    pub shutdown_tx: Option<mpsc::Sender<()>>,
    /// Last successful connection time.
    pub last_connected: Option<Instant>,
    /// Last inbound frame time.
    pub last_message: Option<Instant>,
    /// Last heartbeat probe time.
    pub last_ping: Option<Instant>,
    /// Last heartbeat reply time.
    pub last_pong: Option<Instant>,
}

impl Default for InternalState {
    fn default() -> Self {
        Self {
            state: ConnectionState::Idle,
            reconnect_attempts: 0,
            epoch: 0,
            shutdown_tx: None,
            last_connected: None,
            last_message: None,
            last_ping: None,
            last_pong: None,
        }
    }
}

impl InternalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `epoch` still identifies the current session.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Starts a fresh session: tears down any residual one, clears the
    /// retry counter, and returns the new session epoch.
    pub fn begin_connect(&mut self) -> u64 {
        self.abort_session();
        self.state = ConnectionState::Connecting;
        self.reconnect_attempts = 0;
        self.epoch += 1;
        self.epoch
    }

    /// Marks a caller-initiated close: signals the driver, invalidates its
    /// epoch, and clears the retry counter. Passes through `Closing` and
    /// settles on `Idle` before the caller's lock is released.
    pub fn begin_disconnect(&mut self) {
        self.state = ConnectionState::Closing;
        self.abort_session();
        self.epoch += 1;
        self.reconnect_attempts = 0;
        self.state = ConnectionState::Idle;
    }

    /// Marks the session as open and arms its shutdown channel.
    pub fn mark_open(&mut self, shutdown_tx: mpsc::Sender<()>) {
        self.state = ConnectionState::Open;
        self.reconnect_attempts = 0;
        self.last_connected = Some(Instant::now());
        self.shutdown_tx = Some(shutdown_tx);
    }

    /// Records an unintentional closure and returns the new attempt count.
    pub fn mark_closed_unintentional(&mut self) -> u32 {
        self.state = ConnectionState::ClosedUnintentional;
        self.shutdown_tx = None;
        self.reconnect_attempts += 1;
        self.reconnect_attempts
    }

    /// Re-enters `Connecting` for a retry of the same session.
    pub fn mark_connecting(&mut self) {
        self.state = ConnectionState::Connecting;
    }

    /// Returns to `Idle` with no session.
    pub fn mark_idle(&mut self) {
        self.state = ConnectionState::Idle;
        self.shutdown_tx = None;
    }

    /// Records that a frame arrived.
    pub fn record_message(&mut self) {
        self.last_message = Some(Instant::now());
    }

    /// Records that a heartbeat probe was sent.
    pub fn record_ping(&mut self) {
        self.last_ping = Some(Instant::now());
    }

    /// Records that a heartbeat reply arrived.
    pub fn record_pong(&mut self) {
        self.last_pong = Some(Instant::now());
    }

    fn abort_session(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
        }
    }
}
