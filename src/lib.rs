// MIT License - Copyright (c) 2026 Peter Wright
//
//! # satel-integra-bridge
//!
//! Talks to Satel Integra alarm panels through the ETHM-1 integration
//! protocol: fixed `FE FE` header, a command byte, command data, a 16-bit
//! checksum and a fixed `FE 0D` footer.
//!
//! The codec ([`checksum`], [`frame`], [`decode`]) is pure and stateless.
//! [`IntegraClient`] wraps it in a bounded, one-frame-per-connection TCP
//! exchange, and [`PartitionTracker`] turns successive armed-partition polls
//! into [`PanelEvent`]s.
//!
//! ## Quick Start
//!
//! ```no_run
//! use satel_integra_bridge::{ClientConfig, IntegraClient, PartitionTracker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::builder()
//!         .host("192.168.1.10")
//!         .port(7094)
//!         .build();
//!     let client = IntegraClient::new(config);
//!
//!     let info = client.device_info().await?;
//!     println!("Panel: {} ({})", info.alarm_type, info.version);
//!
//!     let mut tracker = PartitionTracker::new();
//!     loop {
//!         let armed = client.armed_partitions().await?;
//!         for event in tracker.update(armed) {
//!             println!("Event: {:?}", event);
//!         }
//!         tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     }
//! }
//! ```
//!
//! Offline use of the codec:
//!
//! ```
//! use satel_integra_bridge::{decode, frame, DecodedPayload};
//!
//! let bytes = frame::build_frame(0x0A, &[0x01, 0x01]);
//! let parsed = frame::parse_frame(&bytes).unwrap();
//! match decode::decode(&parsed.payload()).unwrap() {
//!     DecodedPayload::ArmedPartitions(bitmap) => assert_eq!(bitmap.to_vec(), vec![1, 9]),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod checksum;
pub mod client;
pub mod config;
pub mod constants;
pub mod decode;
pub mod error;
pub mod event;
pub mod frame;
pub mod protocol;
pub mod tracker;
pub mod transport;

// Re-exports for convenience
pub use client::IntegraClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use constants::{AlarmType, Language};
pub use decode::{DecodedPayload, DeviceInfo, ZoneBitmap};
pub use error::{DecodeError, FrameError, IntegraError, Result, TransportError};
pub use event::PanelEvent;
pub use frame::Frame;
pub use protocol::Command;
pub use tracker::PartitionTracker;
pub use transport::{Connection, TcpTransport, Transport};
