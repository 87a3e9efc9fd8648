// MIT License - Copyright (c) 2026 Peter Wright
// TCP transport to the ETHM-1 integration module

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, error, warn};

use crate::constants::FOOTER;
use crate::error::TransportError;
use crate::transport::{Connection, Transport};

/// Plain TCP transport, one connection per exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport;

impl Transport for TcpTransport {
    type Connection = TcpConnection;

    async fn connect(
        &self,
        host: &str,
        port: u16,
        connect_timeout: Duration,
    ) -> Result<TcpConnection, TransportError> {
        let addr = format!("{}:{}", host, port);
        debug!("Connecting to {}", addr);

        let stream = match timeout(connect_timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                error!("TCP connect to {} failed: {}", addr, e);
                return Err(TransportError::ConnectFailed { addr, source: e });
            }
            Err(_) => {
                warn!("Connection to {} timed out", addr);
                return Err(TransportError::Timeout {
                    operation: "connect",
                    timeout: connect_timeout,
                });
            }
        };
        stream.set_nodelay(true)?;

        debug!("Connected to {}", addr);
        Ok(TcpConnection {
            stream: Some(stream),
            addr,
        })
    }
}

/// An open TCP connection. Dropping it also closes the socket.
#[derive(Debug)]
pub struct TcpConnection {
    stream: Option<TcpStream>,
    addr: String,
}

impl TcpConnection {
    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

impl Connection for TcpConnection {
    async fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let stream = self.stream.as_mut().ok_or(TransportError::Closed)?;
        stream.write_all(bytes).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Read until the buffer ends with the frame footer, the panel closes the
    /// connection, or the deadline passes.
    ///
    /// Bytes read before a close or timeout are returned as-is; deciding whether
    /// they form a valid frame is left to the frame parser.
    async fn receive(&mut self, receive_timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let stream = self.stream.as_mut().ok_or(TransportError::Closed)?;
        let deadline = Instant::now() + receive_timeout;
        let mut received = Vec::new();
        let mut buf = [0u8; 512];

        loop {
            match timeout_at(deadline, stream.read(&mut buf)).await {
                Err(_) if received.is_empty() => {
                    return Err(TransportError::Timeout {
                        operation: "receive",
                        timeout: receive_timeout,
                    });
                }
                Err(_) => {
                    warn!("Incomplete frame from {} after {}ms", self.addr, receive_timeout.as_millis());
                    break;
                }
                Ok(Ok(0)) if received.is_empty() => return Err(TransportError::Closed),
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => {
                    received.extend_from_slice(&buf[..n]);
                    if received.ends_with(&FOOTER) {
                        break;
                    }
                }
                Ok(Err(e)) => return Err(TransportError::Io(e)),
            }
        }

        Ok(received)
    }

    async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                debug!("Shutdown of {} failed: {}", self.addr, e);
            }
            debug!("Connection to {} closed", self.addr);
        }
    }
}
