//! Error types for the live gas-fee feed.
//!
//! The feed client never returns errors on the caller's stack; every failure
//! is delivered asynchronously through the caller's error callback as a
//! [`FeedError`]. The variants split into recoverable failures (which the
//! client retries or tolerates) and terminal ones (which end the session).

mod feed;

pub use feed::FeedError;
