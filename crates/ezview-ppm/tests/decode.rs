/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{BufReader, Cursor};

use ezview_ppm::ezview_core::bytestream::ByteCursor;
use ezview_ppm::ezview_core::options::DecoderOptions;
use ezview_ppm::{PpmDecodeErrors, PpmDecoder, PpmFormat, PpmImage, Rgb};

fn decode(data: &[u8]) -> Result<PpmImage, PpmDecodeErrors> {
    PpmDecoder::new(ByteCursor::new(data)).decode()
}

#[test]
fn ascii_two_pixels() {
    let image = decode(b"P3\n2 1\n255\n255 0 0 0 255 0\n").unwrap();

    assert_eq!(image.dimensions(), (2, 1));
    assert_eq!(image.header().format, PpmFormat::Ascii);
    assert_eq!(image.pixels(), &[Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]);
}

#[test]
fn binary_single_pixel() {
    let mut data = b"P6\n1 1\n255\n".to_vec();
    data.extend_from_slice(&[10, 20, 30]);

    let image = decode(&data).unwrap();

    assert_eq!(image.dimensions(), (1, 1));
    assert_eq!(image.pixels(), &[Rgb::new(10, 20, 30)]);
}

#[test]
fn binary_payload_is_not_whitespace_skipped() {
    // 0x20 and 0x0a are pixel data here, not separators
    let image = decode(b"P6 2 1 255\n\x20\x0a\x09\x00\x0d\x0b").unwrap();

    assert_eq!(image.as_bytes(), b"\x20\x0a\x09\x00\x0d\x0b");
}

#[test]
fn ascii_samples_keep_the_low_eight_bits() {
    let image = decode(b"P3 1 1 255\n256 -1 300").unwrap();

    assert_eq!(image.pixels(), &[Rgb::new(0, 255, 44)]);
}

#[test]
fn ascii_rows_are_row_major() {
    let image = decode(b"P3\n2 2\n255\n1 1 1  2 2 2\n3 3 3\n\n4 4 4").unwrap();
    let reds: Vec<u8> = image.pixels().iter().map(|p| p.r).collect();

    assert_eq!(reds, [1, 2, 3, 4]);
}

#[test]
fn trailing_content_is_ignored() {
    let image = decode(b"P6 1 1 255\nabcTRAILING").unwrap();
    assert_eq!(image.as_bytes(), b"abc");

    let image = decode(b"P3 1 1 255\n1 2 3 4 5 garbage").unwrap();
    assert_eq!(image.pixels(), &[Rgb::new(1, 2, 3)]);
}

#[test]
fn leading_whitespace_is_skipped() {
    let image = decode(b" \r\n\tP3 1 1 255 9 8 7").unwrap();
    assert_eq!(image.pixels(), &[Rgb::new(9, 8, 7)]);
}

#[test]
fn comment_before_dimensions_is_skipped() {
    let plain = decode(b"P3\n2 1\n255\n1 2 3 4 5 6").unwrap();
    let commented = decode(b"P3\n# note\n2 1\n255\n1 2 3 4 5 6").unwrap();

    assert_eq!(plain, commented);
}

#[test]
fn consecutive_comments_are_skipped() {
    let image = decode(b"P6\n# first\n   # second with # inside\n\n1 1\n255\nxyz").unwrap();

    assert_eq!(image.dimensions(), (1, 1));
    assert_eq!(image.as_bytes(), b"xyz");
}

#[test]
fn comment_between_header_numbers_is_not_skipped() {
    let err = decode(b"P3\n2 # note\n1\n255\n").unwrap_err();

    assert!(matches!(err, PpmDecodeErrors::InvalidDimensions(2, 0)), "{err:?}");
}

#[test]
fn invalid_magic() {
    let cases: [&[u8]; 5] = [b"P5\n1 1\n255\n\0", b"Q3 1 1 255", b"p3 1 1 255", b"", b"P"];

    for data in cases {
        let err = decode(data).unwrap_err();
        assert!(matches!(err, PpmDecodeErrors::InvalidMagic(_)), "{err:?}");
    }
}

#[test]
fn zero_dimensions() {
    let err = decode(b"P3 0 1 255\n").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::InvalidDimensions(0, 1)));

    let err = decode(b"P6 1 0 255\n").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::InvalidDimensions(1, 0)));
}

#[test]
fn negative_dimensions() {
    let err = decode(b"P6 -2 1 255\n").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::InvalidDimensions(-2, 1)));
}

#[test]
fn unparsable_dimensions_read_as_zero() {
    let err = decode(b"P3 wide 1 255\n").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::InvalidDimensions(0, 0)), "{err:?}");
}

#[test]
fn sixteen_bit_depth_is_rejected() {
    let err = decode(b"P6\n1 1\n65535\n\0\0\0\0\0\0").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::UnsupportedChannelDepth(65535)));

    let err = decode(b"P3 1 1 15 1 2 3").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::UnsupportedChannelDepth(15)));
}

#[test]
fn dimensions_over_the_limit() {
    let options = DecoderOptions::default().set_max_width(4);
    let mut decoder = PpmDecoder::new_with_options(options, ByteCursor::new(b"P6 5 1 255\n"));

    let err = decoder.decode().unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::LargeDimensions(4, 5)), "{err:?}");
}

#[test]
fn truncated_binary_payload() {
    let err = decode(b"P6\n2 2\n255\n\x01\x02\x03\x04\x05").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::TruncatedStream(_)), "{err:?}");
}

#[test]
fn truncated_ascii_payload() {
    let err = decode(b"P3\n2 1\n255\n1 2 3 4 5").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::TruncatedStream(_)), "{err:?}");
}

#[test]
fn truncated_headers() {
    let cases: [&[u8]; 6] = [
        b"P3",
        b"P3\n",
        b"P3 2",
        b"P6 2 1",
        b"P6 2 1 255",
        b"P3\n# only a comment"
    ];

    for data in cases {
        let err = decode(data).unwrap_err();
        assert!(matches!(err, PpmDecodeErrors::TruncatedStream(_)), "{data:?}: {err:?}");
    }
}

#[test]
fn dangling_sign_in_pixel_data_is_truncation() {
    let err = decode(b"P3 1 1 255\n1 2 -").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::TruncatedStream(_)), "{err:?}");

    // in the header the same token reads as 0
    let err = decode(b"P3 2 -").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::InvalidDimensions(2, 0)), "{err:?}");
}

#[test]
#[cfg(target_pointer_width = "64")]
fn oversized_width_saturates() {
    let err = decode(b"P6 200376420520689663999 1 255\n").unwrap_err();

    match err {
        PpmDecodeErrors::LargeDimensions(limit, found) => {
            assert_eq!(limit, 16384);
            assert_eq!(found as u64, i64::MAX as u64);
        }
        err => panic!("unexpected error {err:?}")
    }
}

#[test]
fn invalid_ascii_sample_reports_the_pixel() {
    let err = decode(b"P3 2 1 255\n1 2 3 4 x 6").unwrap_err();
    assert!(matches!(err, PpmDecodeErrors::InvalidPixelData(1)), "{err:?}");
}

#[test]
fn headers_without_pixels() {
    let mut decoder = PpmDecoder::new(ByteCursor::new(b"P6\n# made by hand\n640 480\n255\n"));

    decoder.decode_headers().unwrap();

    let header = decoder.header().unwrap();
    assert_eq!((header.width, header.height, header.max_value), (640, 480, 255));
    assert_eq!(header.pixel_count(), 640 * 480);
}

#[test]
fn std_readers_decode_the_same() {
    let data = b"P3\n2 1\n255\n255 0 0 0 255 0\n";

    let from_cursor = decode(data).unwrap();
    let from_io_cursor = PpmDecoder::new(Cursor::new(data)).decode().unwrap();
    let from_buf_reader = PpmDecoder::new(BufReader::with_capacity(3, Cursor::new(data)))
        .decode()
        .unwrap();

    assert_eq!(from_cursor, from_io_cursor);
    assert_eq!(from_cursor, from_buf_reader);
}

#[test]
fn errors_display_without_newline() {
    let err = decode(b"P6 0 0 255\n").unwrap_err();
    let message = err.to_string();

    assert!(message.contains("0x0"), "{message}");
    assert!(!message.ends_with('\n'));
}
