// MIT License - Copyright (c) 2026 Peter Wright
// Transport abstraction

pub mod tcp;

use std::time::Duration;

use crate::error::TransportError;

pub use tcp::{TcpConnection, TcpTransport};

/// Opens connections to the panel.
///
/// Each connection carries exactly one request/response exchange; callers
/// that need concurrent polls open one connection per poll.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    type Connection: Connection;

    /// Connect, giving up after `timeout`.
    async fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self::Connection, TransportError>;
}

/// An open connection owned by a single exchange.
#[allow(async_fn_in_trait)]
pub trait Connection: Send {
    async fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Wait up to `timeout` for one answer frame.
    async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError>;

    /// Release the connection. Idempotent.
    async fn close(&mut self);
}
