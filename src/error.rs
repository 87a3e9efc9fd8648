// MIT License - Copyright (c) 2026 Peter Wright
// Error taxonomy

use std::time::Duration;

/// Why an incoming byte sequence is not a valid frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("frame too short: {len} bytes (minimum 6)")]
    TooShort { len: usize },

    #[error("bad frame header: {found:02X?}")]
    BadHeader { found: [u8; 2] },

    #[error("bad frame footer: {found:02X?}")]
    BadFooter { found: [u8; 2] },

    #[error("checksum mismatch: frame carries {received:04X}, computed {computed:04X}")]
    ChecksumMismatch { received: u16, computed: u16 },

    #[error("frame has no command byte")]
    EmptyPayload,
}

/// Why a valid frame payload could not be turned into a typed result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unsupported command {command:02X} ({} data bytes)", .data.len())]
    UnsupportedCommand { command: u8, data: Vec<u8> },

    #[error("malformed payload ({}): {reason}", describe_command(.command))]
    MalformedPayload {
        command: Option<u8>,
        reason: String,
        payload: Vec<u8>,
    },
}

fn describe_command(command: &Option<u8>) -> String {
    match command {
        Some(code) => format!("command {:02X}", code),
        None => "no command byte".to_string(),
    }
}

/// Failures of the connection to the panel.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation} timed out after {}ms", .timeout.as_millis())]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("connection closed by panel")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// All errors that can occur in the satel-integra-bridge library.
#[derive(Debug, thiserror::Error)]
pub enum IntegraError {
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected response: expected command {expected:02X}, got {received:02X}")]
    UnexpectedResponse { expected: u8, received: u8 },
}

impl IntegraError {
    /// Whether a fresh exchange could plausibly succeed.
    ///
    /// Transport failures and corrupted frames are transient; a decode failure
    /// means the panel answered in a way this library does not understand.
    pub fn is_retryable(&self) -> bool {
        match self {
            IntegraError::Transport(_) => true,
            IntegraError::Frame(FrameError::EmptyPayload) => false,
            IntegraError::Frame(_) => true,
            IntegraError::Decode(_) => false,
            IntegraError::UnexpectedResponse { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, IntegraError>;
