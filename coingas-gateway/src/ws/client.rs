//! Feed connection manager with automatic reconnection and heartbeat.

#![allow(clippy::unused_async)]
#![allow(clippy::future_not_send)]
#![allow(clippy::too_many_lines)]

use std::sync::Arc;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::RwLock;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep, timeout, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use coingas_core::error::FeedError;

use super::config::FeedConfig;
use super::message::{FeedFrame, HEARTBEAT_PROBE};
use super::state::{ConnectionState, InternalState};
use crate::callback::FeedCallback;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Why a running session ended.
enum SessionEnd {
    /// The caller asked for the close; no retry follows.
    Shutdown,
    /// The server or the transport ended the session.
    Remote(String),
}

/// Connection manager for the live gas-fee feed.
///
/// Owns at most one transport session at a time. `connect` and `disconnect`
/// are synchronous, non-blocking entry points; all network work happens on a
/// spawned driver task that reports back through the supplied
/// [`FeedCallback`]. When a session drops without the caller asking, the
/// driver retries with a fixed delay until the attempt budget is spent, then
/// reports a terminal error once and goes idle.
///
/// Both entry points must be called from within a Tokio runtime.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use coingas_gateway::ws::{FeedClient, FeedConfig};
///
/// let client = FeedClient::new(FeedConfig::from_env());
/// client.connect(Arc::new(DashboardSink::new()));
/// // ... later
/// client.disconnect();
/// ```
#[derive(Clone)]
pub struct FeedClient {
    config: FeedConfig,
    state: Arc<RwLock<InternalState>>,
}

impl FeedClient {
    /// Creates a new feed client with the given configuration.
    #[must_use]
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(InternalState::new())),
        }
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.read().state
    }

    /// Returns whether a session is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.read().state.is_open()
    }

    /// Returns the number of consecutive unintentional closures since the
    /// last successful open.
    #[must_use]
    pub fn reconnect_attempts(&self) -> u32 {
        self.state.read().reconnect_attempts
    }

    /// Requests a live stream of gas-fee updates.
    ///
    /// If an attempt is already in flight or a session is already open, the
    /// call is a logged no-op. Otherwise any residual session is torn down
    /// and a fresh one is established on a spawned driver task. The callback
    /// is retained for the lifetime of the session, including across
    /// transparent reconnects. Returns immediately.
    pub fn connect(&self, callback: Arc<dyn FeedCallback>) {
        let epoch = {
            let mut st = self.state.write();
            if st.state.is_connecting() {
                debug!("connect ignored, attempt already in flight");
                return;
            }
            if st.state.is_open() {
                debug!("connect ignored, session already open");
                return;
            }
            st.begin_connect()
        };

        let driver = SessionDriver {
            config: self.config.clone(),
            state: Arc::clone(&self.state),
            callback,
            epoch,
        };
        tokio::spawn(driver.run());
    }

    /// Closes the current session, if any.
    ///
    /// Idempotent and callable from any state, including mid-establishment:
    /// the closure is marked intentional, the heartbeat stops with the
    /// session, no retry is scheduled, and the retry counter resets. A
    /// no-op when nothing is connected.
    pub fn disconnect(&self) {
        let mut st = self.state.write();
        if st.state == ConnectionState::Idle && st.shutdown_tx.is_none() {
            debug!("disconnect ignored, no active session");
            return;
        }
        st.begin_disconnect();
        info!(url = %self.config.url, "feed disconnected");
    }
}

/// Owns one logical session: the connect/run/retry loop.
///
/// Every state mutation happens under the same write-lock acquisition as
/// the epoch check that authorizes it; once superseded the driver exits
/// without mutating anything, which keeps the at-most-one-session
/// invariant under any call interleaving.
struct SessionDriver {
    config: FeedConfig,
    state: Arc<RwLock<InternalState>>,
    callback: Arc<dyn FeedCallback>,
    epoch: u64,
}

impl SessionDriver {
    async fn run(self) {
        loop {
            debug!(url = %self.config.url, "opening feed transport");
            let attempt = timeout(
                self.config.connect_timeout(),
                connect_async(self.config.url.as_str()),
            )
            .await;

            let transient = match attempt {
                Ok(Ok((stream, _response))) => {
                    // Epoch check and open transition must share one lock
                    // acquisition: a disconnect() slipping between them
                    // would be silently undone by a stale mark_open.
                    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
                    {
                        let mut st = self.state.write();
                        if !st.is_current(self.epoch) {
                            debug!("session superseded during connect");
                            return;
                        }
                        st.mark_open(shutdown_tx);
                    }
                    info!(url = %self.config.url, "feed connected");

                    let end = self.run_session(stream, shutdown_rx).await;

                    match end {
                        // disconnect() already reset the shared state
                        SessionEnd::Shutdown => return,
                        SessionEnd::Remote(reason) => {
                            if !self.is_current() {
                                return;
                            }
                            FeedError::ConnectionClosed { reason }
                        }
                    }
                }
                Ok(Err(err)) => {
                    if matches!(err, WsError::Url(_)) {
                        error!(error = %err, "feed endpoint could not be constructed");
                        {
                            let mut st = self.state.write();
                            if !st.is_current(self.epoch) {
                                return;
                            }
                            st.mark_idle();
                        }
                        self.callback
                            .on_error(FeedError::Construction {
                                reason: err.to_string(),
                            })
                            .await;
                        return;
                    }
                    FeedError::ConnectionFailed {
                        reason: err.to_string(),
                    }
                }
                Err(_elapsed) => FeedError::Timeout {
                    timeout_ms: self.config.connect_timeout_ms,
                },
            };

            let attempts = {
                let mut st = self.state.write();
                if !st.is_current(self.epoch) {
                    return;
                }
                st.mark_closed_unintentional()
            };

            if attempts >= self.config.max_reconnect_attempts {
                error!(attempts, "feed reconnect attempts exhausted");
                {
                    let mut st = self.state.write();
                    if !st.is_current(self.epoch) {
                        return;
                    }
                    st.mark_idle();
                }
                self.callback
                    .on_error(FeedError::RetriesExhausted { attempts })
                    .await;
                return;
            }

            warn!(
                error = %transient,
                attempt = attempts,
                max_attempts = self.config.max_reconnect_attempts,
                delay_ms = self.config.reconnect_delay_ms,
                "feed connection lost, reconnecting"
            );
            self.callback.on_error(transient).await;

            sleep(self.config.reconnect_delay()).await;

            let mut st = self.state.write();
            if !st.is_current(self.epoch) {
                debug!("session superseded during reconnect delay");
                return;
            }
            st.mark_connecting();
        }
    }

    /// Drives one open session until shutdown or remote closure.
    ///
    /// Inbound frames are handled one at a time and data callbacks are
    /// awaited in place, so updates reach the caller strictly in transport
    /// receipt order.
    async fn run_session(&self, stream: WsStream, mut shutdown_rx: mpsc::Receiver<()>) -> SessionEnd {
        let (mut sink, mut source): (WsSink, WsSource) = stream.split();

        let period = self.config.heartbeat_interval();
        let mut heartbeat = interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    debug!("shutdown signal received");
                    let _ = sink.close().await;
                    return SessionEnd::Shutdown;
                }

                frame = source.next() => {
                    match frame {
                        Some(Ok(message)) => {
                            self.state.write().record_message();
                            match FeedFrame::classify(message) {
                                FeedFrame::HeartbeatReply => {
                                    self.state.write().record_pong();
                                    debug!("heartbeat reply received");
                                }
                                FeedFrame::Update(update) => {
                                    self.callback.on_data(update).await;
                                }
                                FeedFrame::Malformed(reason) => {
                                    warn!(error = %reason, "undecodable feed frame");
                                    self.callback
                                        .on_error(FeedError::Decode { reason })
                                        .await;
                                }
                                FeedFrame::Close(reason) => {
                                    info!(reason = %reason, "server closed feed");
                                    return SessionEnd::Remote(reason);
                                }
                                FeedFrame::Ignored => {}
                            }
                        }
                        Some(Err(err)) => {
                            error!(error = %err, "feed transport error");
                            return SessionEnd::Remote(err.to_string());
                        }
                        None => {
                            return SessionEnd::Remote("stream ended".to_string());
                        }
                    }
                }

                _ = heartbeat.tick() => {
                    self.state.write().record_ping();
                    if let Err(err) = sink.send(Message::Text(HEARTBEAT_PROBE.to_string())).await {
                        warn!(error = %err, "heartbeat send failed");
                    } else {
                        debug!("heartbeat sent");
                    }
                }
            }
        }
    }

    fn is_current(&self) -> bool {
        self.state.read().is_current(self.epoch)
    }
}
