// MIT License - Copyright (c) 2026 Peter Wright
// Panel checksum

use crate::constants::CHECKSUM_SEED;

/// Compute the panel checksum over `command + data`.
///
/// Not a CRC despite the name used in Satel's documentation: for each byte the
/// running word is rotated left by one bit, inverted, and then the high byte of
/// the result plus the input byte is added to it.
pub fn compute(bytes: &[u8]) -> u16 {
    let mut crc = CHECKSUM_SEED;
    for &b in bytes {
        crc = crc.rotate_left(1);
        crc ^= 0xFFFF;
        crc = crc.wrapping_add(crc >> 8).wrapping_add(b as u16);
    }
    crc
}

/// Checksum serialized as it appears on the wire (high byte first).
pub fn compute_bytes(bytes: &[u8]) -> [u8; 2] {
    compute(bytes).to_be_bytes()
}
