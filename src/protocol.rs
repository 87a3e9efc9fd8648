// MIT License - Copyright (c) 2026 Peter Wright
// Integration protocol commands

use crate::constants::{CMD_ARMED_PARTITIONS, CMD_DEVICE_INFO};
use crate::frame::build_frame;

/// Commands that can be sent to the panel's integration module.
///
/// Each request is a single frame; the panel answers with one frame carrying
/// the same command byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `7E` — panel type, firmware version and language.
    DeviceInfo,
    /// `0A` — armed partitions bitmap.
    ArmedPartitions,
    /// Any other command code with its raw data bytes.
    Raw { code: u8, data: Vec<u8> },
}

impl Command {
    pub fn code(&self) -> u8 {
        match self {
            Command::DeviceInfo => CMD_DEVICE_INFO,
            Command::ArmedPartitions => CMD_ARMED_PARTITIONS,
            Command::Raw { code, .. } => *code,
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            Command::Raw { data, .. } => data,
            _ => &[],
        }
    }

    /// Wire bytes for this request.
    pub fn to_frame(&self) -> Vec<u8> {
        build_frame(self.code(), self.data())
    }

    /// Build a command from `command + data`, mapping known codes without data
    /// to their typed variant.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let (&code, data) = payload.split_first()?;
        Some(match (code, data.is_empty()) {
            (CMD_DEVICE_INFO, true) => Command::DeviceInfo,
            (CMD_ARMED_PARTITIONS, true) => Command::ArmedPartitions,
            _ => Command::Raw {
                code,
                data: data.to_vec(),
            },
        })
    }
}

/// Render bytes as uppercase, space-separated hex pairs (e.g. `FE FE 7E`).
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse hex pairs, ignoring spaces and commas between them.
///
/// Returns `None` on an odd number of digits or a non-hex character.
pub fn parse_hex(s: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = s
        .bytes()
        .filter(|c| !c.is_ascii_whitespace() && *c != b',')
        .collect();
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect()
}
