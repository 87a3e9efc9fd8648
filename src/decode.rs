// MIT License - Copyright (c) 2026 Peter Wright
// Payload decoding

use std::collections::BTreeSet;

use serde::Serialize;

use crate::constants::{
    AlarmType, Language, CMD_ARMED_PARTITIONS, CMD_DEVICE_INFO, DEVICE_INFO_PAYLOAD_LEN,
    VERSION_LEN, VERSION_PATTERN,
};
use crate::error::DecodeError;

/// Panel identification returned by command `7E`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub alarm_type: AlarmType,
    /// Firmware version and date, e.g. `1.23 2015-03-12`.
    pub version: String,
    pub language: Language,
}

/// 1-indexed partitions whose bit is set in a `0A` answer, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneBitmap {
    active: BTreeSet<u32>,
}

impl ZoneBitmap {
    /// Expand packed data bytes into active partition numbers.
    ///
    /// Bits are read least-significant first within each byte, and the counter
    /// runs across the whole sequence: bit 0 of the second byte is partition 9.
    pub fn from_bits(data: &[u8]) -> Self {
        let mut active = BTreeSet::new();
        let mut partition: u32 = 0;
        for &byte in data {
            for bit in 0..8 {
                partition += 1;
                if (byte >> bit) & 1 == 1 {
                    active.insert(partition);
                }
            }
        }
        Self { active }
    }

    pub fn contains(&self, partition: u32) -> bool {
        self.active.contains(&partition)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.active.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Partitions active in `self` but not in `other`, ascending.
    pub fn difference(&self, other: &ZoneBitmap) -> Vec<u32> {
        self.active.difference(&other.active).copied().collect()
    }
}

impl FromIterator<u32> for ZoneBitmap {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

/// Typed result of decoding one payload, keyed by its command byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "result")]
pub enum DecodedPayload {
    DeviceInfo(DeviceInfo),
    ArmedPartitions(ZoneBitmap),
}

impl DecodedPayload {
    pub fn command(&self) -> u8 {
        match self {
            DecodedPayload::DeviceInfo(_) => CMD_DEVICE_INFO,
            DecodedPayload::ArmedPartitions(_) => CMD_ARMED_PARTITIONS,
        }
    }
}

/// Decode `command + data` into a typed result.
pub fn decode(payload: &[u8]) -> Result<DecodedPayload, DecodeError> {
    let Some((&command, data)) = payload.split_first() else {
        return Err(DecodeError::MalformedPayload {
            command: None,
            reason: "empty payload".to_string(),
            payload: Vec::new(),
        });
    };

    match command {
        CMD_DEVICE_INFO => decode_device_info(payload).map(DecodedPayload::DeviceInfo),
        CMD_ARMED_PARTITIONS => Ok(DecodedPayload::ArmedPartitions(ZoneBitmap::from_bits(data))),
        _ => Err(DecodeError::UnsupportedCommand {
            command,
            data: data.to_vec(),
        }),
    }
}

fn decode_device_info(payload: &[u8]) -> Result<DeviceInfo, DecodeError> {
    if payload.len() < DEVICE_INFO_PAYLOAD_LEN {
        return Err(DecodeError::MalformedPayload {
            command: Some(CMD_DEVICE_INFO),
            reason: format!(
                "expected at least {} bytes, got {}",
                DEVICE_INFO_PAYLOAD_LEN,
                payload.len()
            ),
            payload: payload.to_vec(),
        });
    }

    Ok(DeviceInfo {
        alarm_type: AlarmType::from_code(payload[1]),
        version: format_version(&payload[2..2 + VERSION_LEN]),
        language: Language::from_code(payload[2 + VERSION_LEN]),
    })
}

/// Substitute each version byte, in order, into [`VERSION_PATTERN`].
///
/// A byte holding 0-9 is written as that digit. Firmware that sends the ASCII
/// digit instead (`0x30`-`0x39`) yields the same character. Anything else is
/// written as its decimal value; the result is not validated further.
pub fn format_version(digits: &[u8]) -> String {
    let mut out = String::with_capacity(VERSION_PATTERN.len());
    let mut digits = digits.iter();
    let mut rest = VERSION_PATTERN;
    while let Some(pos) = rest.find("%s") {
        out.push_str(&rest[..pos]);
        match digits.next() {
            Some(&b) if b.is_ascii_digit() => out.push(b as char),
            Some(&b) => out.push_str(&b.to_string()),
            None => out.push_str("%s"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
