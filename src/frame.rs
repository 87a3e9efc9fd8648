// MIT License - Copyright (c) 2026 Peter Wright
// Frame construction and validation

use crate::checksum;
use crate::constants::{FOOTER, FRAME_OVERHEAD, HEADER};
use crate::error::FrameError;

/// A validated frame with header, checksum and footer stripped.
///
/// Wire layout: `[FE FE | command | data.. | crc.high | crc.low | FE 0D]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: u8,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(command: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            command,
            data: data.into(),
        }
    }

    /// Command byte followed by the data bytes; the unit the decoder consumes.
    pub fn payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(1 + self.data.len());
        payload.push(self.command);
        payload.extend_from_slice(&self.data);
        payload
    }

    /// Serialize back to wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        build_frame(self.command, &self.data)
    }
}

/// Build the exact byte sequence to transmit for `command` and `data`.
///
/// The output is always six bytes longer than `command + data`.
pub fn build_frame(command: u8, data: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(1 + data.len());
    payload.push(command);
    payload.extend_from_slice(data);
    encode_payload(&payload)
}

/// Wrap an already assembled `command + data` payload in header, checksum and footer.
pub fn encode_payload(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(payload.len() + FRAME_OVERHEAD);
    frame.extend_from_slice(&HEADER);
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&checksum::compute_bytes(payload));
    frame.extend_from_slice(&FOOTER);
    frame
}

/// Validate a received byte sequence and unwrap its command and data.
///
/// Checks run in order and the first failure is returned: length, header,
/// footer, checksum over `command + data`.
pub fn parse_frame(bytes: &[u8]) -> Result<Frame, FrameError> {
    let len = bytes.len();
    if len < FRAME_OVERHEAD {
        return Err(FrameError::TooShort { len });
    }
    if bytes[..2] != HEADER {
        return Err(FrameError::BadHeader {
            found: [bytes[0], bytes[1]],
        });
    }
    if bytes[len - 2..] != FOOTER {
        return Err(FrameError::BadFooter {
            found: [bytes[len - 2], bytes[len - 1]],
        });
    }

    let interior = &bytes[2..len - 4];
    let received = u16::from_be_bytes([bytes[len - 4], bytes[len - 3]]);
    let computed = checksum::compute(interior);
    if received != computed {
        return Err(FrameError::ChecksumMismatch { received, computed });
    }

    match interior.split_first() {
        Some((&command, data)) => Ok(Frame::new(command, data)),
        None => Err(FrameError::EmptyPayload),
    }
}

/// `[frame.command] ++ frame.data`.
pub fn extract_payload(frame: &Frame) -> Vec<u8> {
    frame.payload()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_device_info_request() {
        assert_eq!(
            build_frame(0x7E, &[]),
            vec![0xFE, 0xFE, 0x7E, 0xD8, 0x60, 0xFE, 0x0D]
        );
    }

    #[test]
    fn test_build_armed_partitions_request() {
        assert_eq!(
            build_frame(0x0A, &[]),
            vec![0xFE, 0xFE, 0x0A, 0xD7, 0xEC, 0xFE, 0x0D]
        );
    }

    #[test]
    fn test_build_length() {
        for n in [0usize, 1, 4, 16, 200] {
            let data = vec![0x55; n];
            assert_eq!(build_frame(0x0A, &data).len(), n + 7);
        }
    }

    #[test]
    fn test_encode_payload_matches_build() {
        let payload = [0x7E];
        assert_eq!(encode_payload(&payload), build_frame(0x7E, &[]));
        assert_eq!(encode_payload(&payload).len(), payload.len() + 6);
    }

    #[test]
    fn test_parse_roundtrip() {
        let bytes = build_frame(0x0A, &[0x01, 0x00, 0x80, 0x00]);
        let frame = parse_frame(&bytes).unwrap();
        assert_eq!(frame.command, 0x0A);
        assert_eq!(frame.data, vec![0x01, 0x00, 0x80, 0x00]);
        assert_eq!(frame.payload(), vec![0x0A, 0x01, 0x00, 0x80, 0x00]);
        assert_eq!(extract_payload(&frame), frame.payload());
        assert_eq!(frame.to_bytes(), bytes);
    }

    #[test]
    fn test_parse_too_short_before_header() {
        assert_eq!(parse_frame(&[]), Err(FrameError::TooShort { len: 0 }));
        // Bad header too, but length is checked first.
        assert_eq!(
            parse_frame(&[0x00, 0x01, 0x02, 0x03, 0x04]),
            Err(FrameError::TooShort { len: 5 })
        );
    }

    #[test]
    fn test_parse_bad_header() {
        let mut bytes = build_frame(0x7E, &[]);
        bytes[1] = 0xFD;
        assert_eq!(
            parse_frame(&bytes),
            Err(FrameError::BadHeader { found: [0xFE, 0xFD] })
        );
    }

    #[test]
    fn test_parse_bad_header_before_footer() {
        let bytes = [0x00, 0x00, 0x7E, 0xD8, 0x60, 0x00, 0x00];
        assert!(matches!(parse_frame(&bytes), Err(FrameError::BadHeader { .. })));
    }

    #[test]
    fn test_parse_bad_footer() {
        let mut bytes = build_frame(0x7E, &[]);
        let last = bytes.len() - 1;
        bytes[last] = 0x0A;
        assert_eq!(
            parse_frame(&bytes),
            Err(FrameError::BadFooter { found: [0xFE, 0x0A] })
        );
    }

    #[test]
    fn test_parse_checksum_mismatch() {
        let mut bytes = build_frame(0x7E, &[]);
        bytes[3] ^= 0x01;
        assert_eq!(
            parse_frame(&bytes),
            Err(FrameError::ChecksumMismatch {
                received: 0xD960,
                computed: 0xD860,
            })
        );
    }

    #[test]
    fn test_parse_data_tamper() {
        let mut bytes = build_frame(0x0A, &[0x01, 0x02]);
        bytes[3] ^= 0x40;
        assert!(matches!(
            parse_frame(&bytes),
            Err(FrameError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_empty_interior() {
        // Six bytes whose checksum field matches the empty interior.
        let bytes = [0xFE, 0xFE, 0x14, 0x7A, 0xFE, 0x0D];
        assert_eq!(parse_frame(&bytes), Err(FrameError::EmptyPayload));

        let bytes = [0xFE, 0xFE, 0x00, 0x00, 0xFE, 0x0D];
        assert!(matches!(
            parse_frame(&bytes),
            Err(FrameError::ChecksumMismatch { .. })
        ));
    }
}
