// MIT License - Copyright (c) 2026 Peter Wright
// Request/response exchange with the panel

use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use crate::config::ClientConfig;
use crate::decode::{decode, DecodedPayload, DeviceInfo, ZoneBitmap};
use crate::error::{IntegraError, Result};
use crate::frame::{parse_frame, Frame};
use crate::protocol::{to_hex, Command};
use crate::transport::{Connection, TcpTransport, Transport};

/// Client for the panel's integration protocol.
///
/// Every request opens its own connection, sends one frame, waits for one
/// answer and closes the connection again, whatever the outcome.
///
/// # Example
///
/// ```no_run
/// use satel_integra_bridge::{ClientConfig, IntegraClient};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ClientConfig::builder().host("192.168.1.10").build();
///     let client = IntegraClient::new(config);
///
///     let info = client.device_info().await?;
///     println!("{} {} ({})", info.alarm_type, info.version, info.language);
///
///     let armed = client.armed_partitions().await?;
///     println!("armed partitions: {:?}", armed.to_vec());
///     Ok(())
/// }
/// ```
pub struct IntegraClient<T: Transport = TcpTransport> {
    config: ClientConfig,
    transport: T,
}

impl IntegraClient<TcpTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, TcpTransport)
    }
}

impl<T: Transport> IntegraClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `command` and return the validated answer frame.
    ///
    /// A single attempt; see [`query`](Self::query) for the retry policy.
    pub async fn exchange(&self, command: &Command) -> Result<Frame> {
        let request = command.to_frame();
        let mut conn = self
            .transport
            .connect(&self.config.host, self.config.port, self.config.connect_timeout())
            .await?;
        debug!("Connected to {}:{}", self.config.host, self.config.port);

        let response = self.round_trip(&mut conn, &request).await;
        conn.close().await;

        let bytes = response?;
        let frame = parse_frame(&bytes).map_err(|e| {
            warn!("Incorrect answer from panel: {} [{}]", e, to_hex(&bytes));
            e
        })?;
        self.log_frame("payload", &frame.payload());
        Ok(frame)
    }

    async fn round_trip(&self, conn: &mut T::Connection, request: &[u8]) -> Result<Vec<u8>> {
        self.log_frame("send", request);
        conn.send(request).await?;
        let response = conn.receive(self.config.response_timeout()).await?;
        self.log_frame("receive", &response);
        Ok(response)
    }

    /// Exchange `command` and decode the answer, retrying transient failures
    /// up to `max_retries` times on a fresh connection.
    pub async fn query(&self, command: &Command) -> Result<DecodedPayload> {
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                let delay = self.config.retry_delay(attempt);
                warn!(
                    "Attempt {} failed, retrying in {:.1}s...",
                    attempt,
                    delay.as_secs_f64()
                );
                sleep(delay).await;
            }

            match self.query_once(command).await {
                Ok(decoded) => return Ok(decoded),
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    warn!("Query {:02X} failed (attempt {}): {}", command.code(), attempt + 1, e);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn query_once(&self, command: &Command) -> Result<DecodedPayload> {
        let frame = self.exchange(command).await?;
        Ok(decode(&frame.payload())?)
    }

    /// Query panel type, firmware version and language (`7E`).
    pub async fn device_info(&self) -> Result<DeviceInfo> {
        match self.query(&Command::DeviceInfo).await? {
            DecodedPayload::DeviceInfo(info) => {
                info!(
                    "Panel: {}, version {}, language {}",
                    info.alarm_type, info.version, info.language
                );
                Ok(info)
            }
            other => Err(IntegraError::UnexpectedResponse {
                expected: Command::DeviceInfo.code(),
                received: other.command(),
            }),
        }
    }

    /// Query the armed partitions bitmap (`0A`).
    pub async fn armed_partitions(&self) -> Result<ZoneBitmap> {
        match self.query(&Command::ArmedPartitions).await? {
            DecodedPayload::ArmedPartitions(bitmap) => {
                debug!("Active partitions: {:?}", bitmap.to_vec());
                Ok(bitmap)
            }
            other => Err(IntegraError::UnexpectedResponse {
                expected: Command::ArmedPartitions.code(),
                received: other.command(),
            }),
        }
    }

    fn log_frame(&self, what: &str, bytes: &[u8]) {
        if self.config.trace_frames {
            debug!("{}: {}", what, to_hex(bytes));
        } else {
            trace!("{}: {}", what, to_hex(bytes));
        }
    }
}
