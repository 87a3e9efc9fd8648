// Property tests for the frame codec.

use proptest::prelude::*;

use satel_integra_bridge::checksum;
use satel_integra_bridge::decode::{decode, DecodedPayload, ZoneBitmap};
use satel_integra_bridge::frame::{build_frame, parse_frame};
use satel_integra_bridge::FrameError;

fn data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

proptest! {
    #[test]
    fn build_then_parse_is_identity(command: u8, data in data()) {
        let bytes = build_frame(command, &data);
        prop_assert_eq!(bytes.len(), data.len() + 7);

        let frame = parse_frame(&bytes).unwrap();
        prop_assert_eq!(frame.command, command);
        prop_assert_eq!(frame.data, data);
    }

    #[test]
    fn single_bit_flip_in_checksummed_region_is_detected(
        command: u8,
        data in data(),
        index: prop::sample::Index,
        bit in 0u8..8,
    ) {
        let mut bytes = build_frame(command, &data);
        // Command, data and the two checksum bytes.
        let region = 2..bytes.len() - 2;
        let pos = region.start + index.index(region.len());
        bytes[pos] ^= 1 << bit;

        match parse_frame(&bytes) {
            Err(FrameError::ChecksumMismatch { .. }) => {}
            // A flip that happens to reproduce the checksum is acceptable.
            Ok(_) => {
                let interior = &bytes[2..bytes.len() - 4];
                let claimed = u16::from_be_bytes([bytes[bytes.len() - 4], bytes[bytes.len() - 3]]);
                prop_assert_eq!(checksum::compute(interior), claimed);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn short_input_is_too_short(bytes in prop::collection::vec(any::<u8>(), 0..6)) {
        prop_assert_eq!(parse_frame(&bytes), Err(FrameError::TooShort { len: bytes.len() }));
    }

    #[test]
    fn wrong_header_is_rejected(first: u8, data in data()) {
        prop_assume!(first != 0xFE);
        let mut bytes = build_frame(0x0A, &data);
        bytes[0] = first;
        let is_bad_header = matches!(parse_frame(&bytes), Err(FrameError::BadHeader { .. }));
        prop_assert!(is_bad_header);
    }

    #[test]
    fn wrong_footer_is_rejected(last: u8, data in data()) {
        prop_assume!(last != 0x0D);
        let mut bytes = build_frame(0x0A, &data);
        let end = bytes.len() - 1;
        bytes[end] = last;
        let is_bad_footer = matches!(parse_frame(&bytes), Err(FrameError::BadFooter { .. }));
        prop_assert!(is_bad_footer);
    }

    #[test]
    fn bitmap_matches_bit_positions(data in data()) {
        let expected: Vec<u32> = (0..data.len() * 8)
            .filter(|i| (data[i / 8] >> (i % 8)) & 1 == 1)
            .map(|i| i as u32 + 1)
            .collect();

        let mut payload = vec![0x0A];
        payload.extend_from_slice(&data);
        let decoded = decode(&payload).unwrap();
        prop_assert_eq!(decoded, DecodedPayload::ArmedPartitions(expected.into_iter().collect::<ZoneBitmap>()));
    }
}
