mod common;

use bmpscrub::{BI_RGB, BitmapFile, BmpError, Limits, MemStore};
use common::BmpBuilder;

#[test]
fn classic_24bit_header_fields() {
    let bytes = BmpBuilder::new(4, 4, 24).reserved(5, 9).build();
    let bmp = bmpscrub::parse_bytes(bytes.clone()).unwrap();

    let header = bmp.file_header();
    assert_eq!(&header.signature, b"BM");
    assert_eq!(header.file_size as usize, bytes.len());
    assert_eq!(header.reserved1, 5);
    assert_eq!(header.reserved2, 9);
    assert_eq!(header.pixel_data_offset, 54);

    let dib = bmp.dib_header();
    assert_eq!(dib.header_size, 40);
    assert_eq!(dib.width, 4);
    assert_eq!(dib.height, 4);
    assert_eq!(dib.planes, 1);
    assert_eq!(dib.bit_count, 24);
    assert_eq!(dib.compression, BI_RGB);
    assert_eq!(dib.x_pixels_per_meter, 2835);
    assert_eq!(dib.y_pixels_per_meter, 2835);
    assert!(dib.tail.is_empty());

    assert!(bmp.color_table().is_empty());
    assert!(bmp.profile_bytes().is_empty());
}

#[test]
fn whitelisted_field_reencode_is_byte_identical() {
    let bytes = BmpBuilder::new(5, 2, 24)
        .reserved(17, 3)
        .resolution(-2835, 72)
        .palette_usage(12, 7)
        .build();
    let bmp = bmpscrub::parse_bytes(bytes.clone()).unwrap();

    assert_eq!(&bmp.file_header().encode_reserved()[..], &bytes[6..10]);
    assert_eq!(&bmp.file_header().encode_offset()[..], &bytes[10..14]);
    assert_eq!(&bmp.dib_header().encode_resolution()[..], &bytes[38..46]);
    assert_eq!(&bmp.dib_header().encode_palette_usage()[..], &bytes[46..54]);
}

#[test]
fn rejects_bad_signature() {
    let mut bytes = BmpBuilder::new(4, 4, 24).build();
    bytes[0..2].copy_from_slice(b"BA");
    let err = bmpscrub::parse_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        BmpError::InvalidSignature { found } if &found == b"BA"
    ));
}

#[test]
fn rejects_ten_byte_stream() {
    let mut bytes = BmpBuilder::new(4, 4, 24).build();
    bytes.truncate(10);
    let err = bmpscrub::parse_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        BmpError::Truncated {
            offset: 10,
            needed: 4,
            available: 0,
        }
    ));
}

#[test]
fn rejects_small_dib_header() {
    let mut bytes = BmpBuilder::new(4, 4, 24).build();
    bytes[14..18].copy_from_slice(&12u32.to_le_bytes());
    let err = bmpscrub::parse_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        BmpError::UnsupportedHeaderVariant { header_size: 12 }
    ));
}

#[test]
fn rejects_stream_ending_mid_dib_record() {
    let mut bytes = BmpBuilder::new(4, 4, 24).build();
    bytes.truncate(30);
    let err = bmpscrub::parse_bytes(bytes).unwrap_err();
    assert!(matches!(err, BmpError::Truncated { offset: 30, .. }));
}

#[test]
fn palette_has_exactly_two_to_the_bit_count_entries() {
    for (bit_count, expected) in [(1u16, 2usize), (4, 16), (8, 256)] {
        let bytes = BmpBuilder::new(4, 2, bit_count).build();
        let bmp = bmpscrub::parse_bytes(bytes).unwrap();
        assert_eq!(bmp.color_table().len(), expected);
    }
}

#[test]
fn palette_entries_are_bgr_quadruplets() {
    let bytes = BmpBuilder::new(4, 2, 8).build();
    let bmp = bmpscrub::parse_bytes(bytes).unwrap();
    let entry = bmp.color_table().get(3).copied().unwrap();
    assert_eq!(entry.blue, 3);
    assert_eq!(entry.green, 6);
    assert_eq!(entry.red, 252);
}

#[test]
fn truecolor_has_empty_palette_and_opaque_profile() {
    let bytes = BmpBuilder::new(4, 2, 24).profile(vec![0xDE; 12]).build();
    let bmp = bmpscrub::parse_bytes(bytes).unwrap();
    assert!(bmp.color_table().is_empty());
    assert_eq!(bmp.profile_bytes(), &[0xDE; 12][..]);
    assert_eq!(bmp.layout().opaque_start, 54);
    assert_eq!(bmp.layout().opaque_len, 12);
}

#[test]
fn rejects_palette_crossing_pixel_array() {
    let mut bytes = BmpBuilder::new(4, 2, 8).build();
    // Declare the pixel array right after the DIB header, where the
    // 256-entry table would overlap it.
    bytes[10..14].copy_from_slice(&54u32.to_le_bytes());
    let err = bmpscrub::parse_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        BmpError::PaletteOutOfBounds {
            palette_end: 1078,
            pixel_data_offset: 54,
        }
    ));
}

#[test]
fn rejects_pixel_offset_inside_dib_header() {
    let mut bytes = BmpBuilder::new(4, 2, 24).build();
    bytes[10..14].copy_from_slice(&40u32.to_le_bytes());
    let err = bmpscrub::parse_bytes(bytes).unwrap_err();
    assert!(matches!(err, BmpError::LayoutInconsistency { offset: 10, .. }));
}

#[test]
fn rejects_pixel_array_running_past_end_of_file() {
    let mut bytes = BmpBuilder::new(4, 4, 24).build();
    let short = bytes.len() - 4;
    bytes.truncate(short);
    let err = bmpscrub::parse_bytes(bytes).unwrap_err();
    assert!(matches!(err, BmpError::LayoutInconsistency { .. }));
}

#[test]
fn top_down_orientation_is_recorded_not_acted_on() {
    let bytes = BmpBuilder::new(4, -3, 24).build();
    let bmp = bmpscrub::parse_bytes(bytes).unwrap();
    assert!(bmp.dib_header().is_top_down());
    assert_eq!(bmp.dib_header().height, -3);
    assert_eq!(bmp.layout().rows, 3);
}

#[test]
fn pixel_bytes_materializes_exact_region() {
    let bytes = BmpBuilder::new(3, 2, 24).build();
    let bmp = bmpscrub::parse_bytes(bytes.clone()).unwrap();
    let pixels = bmp.pixel_bytes().unwrap();
    assert_eq!(pixels.len(), 24); // 2 rows x 12-byte stride
    assert_eq!(&pixels[..], &bytes[54..]);
}

#[test]
fn display_reports_decoded_fields() {
    let bytes = BmpBuilder::new(4, 4, 24).reserved(5, 9).build();
    let bmp = bmpscrub::parse_bytes(bytes).unwrap();
    let header = format!("{}", bmp.file_header());
    assert!(header.contains("Signature: BM"));
    assert!(header.contains("Reserved 1: 5"));
    let dib = format!("{}", bmp.dib_header());
    assert!(dib.contains("Bit count: 24"));
    assert!(dib.contains("X pixels per meter: 2835"));
}

#[test]
fn limits_reject_oversized_pixel_counts() {
    let bytes = BmpBuilder::new(4, 4, 24).build();
    let limits = Limits {
        max_pixels: Some(8),
        ..Limits::default()
    };
    let err = BitmapFile::parse_with_limits(MemStore::new(bytes), Some(&limits)).unwrap_err();
    assert!(matches!(err, BmpError::LimitExceeded(_)));
}

#[test]
fn limits_reject_oversized_stores_before_reading() {
    let bytes = BmpBuilder::new(4, 4, 24).build();
    let limits = Limits {
        max_file_bytes: Some(10),
        ..Limits::default()
    };
    let err = BitmapFile::parse_with_limits(MemStore::new(bytes), Some(&limits)).unwrap_err();
    assert!(matches!(err, BmpError::LimitExceeded(_)));
}
