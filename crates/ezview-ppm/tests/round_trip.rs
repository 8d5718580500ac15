/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use ezview_ppm::ezview_core::bytestream::ByteCursor;
use ezview_ppm::ezview_core::options::DecoderOptions;
use ezview_ppm::{decode_file, PpmDecodeErrors, PpmDecoder, PpmEncoder, PpmFormat, Rgb};
use nanorand::Rng;

fn random_pixels(rand: &mut nanorand::WyRand, count: usize) -> Vec<Rgb> {
    let mut bytes = vec![0_u8; count * 3];
    rand.fill(&mut bytes);

    bytes
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect()
}

fn round_trip(format: PpmFormat) {
    let mut rand = nanorand::WyRand::new_seed(0x5eed);

    for _ in 0..32 {
        let width = rand.generate_range(1_usize..=24);
        let height = rand.generate_range(1_usize..=24);
        let pixels = random_pixels(&mut rand, width * height);

        let mut encoded = vec![];
        PpmEncoder::new(&mut encoded)
            .encode(width, height, format, &pixels)
            .unwrap();

        let image = PpmDecoder::new(ByteCursor::new(&encoded)).decode().unwrap();

        assert_eq!(image.dimensions(), (width, height));
        assert_eq!(image.header().format, format);
        assert_eq!(image.pixels(), &pixels[..]);
    }
}

#[test]
fn ascii_round_trip() {
    round_trip(PpmFormat::Ascii);
}

#[test]
fn binary_round_trip() {
    round_trip(PpmFormat::Binary);
}

#[test]
fn re_encoding_a_decoded_image() {
    let source = b"P3\n# note\n2 1\n255\n255   0 0\n0 255 0";
    let image = PpmDecoder::new(ByteCursor::new(source)).decode().unwrap();

    let mut out = vec![];
    PpmEncoder::new(&mut out)
        .encode_image(&image, PpmFormat::Ascii)
        .unwrap();

    assert_eq!(out, b"P3\n2 1\n255\n255 0 0\n0 255 0\n");
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ezview-{}-{name}", std::process::id()))
}

#[test]
fn decode_file_reads_from_disk() {
    let path = temp_path("disk.ppm");
    let pixels = [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6), Rgb::new(7, 8, 9)];

    let mut encoded = vec![];
    PpmEncoder::new(&mut encoded)
        .encode(3, 1, PpmFormat::Binary, &pixels)
        .unwrap();
    std::fs::write(&path, encoded).unwrap();

    let result = decode_file(&path, DecoderOptions::default());
    std::fs::remove_file(&path).unwrap();

    assert_eq!(result.unwrap().pixels(), &pixels);
}

#[test]
fn decode_file_missing_path() {
    let path = temp_path("does-not-exist.ppm");

    let err = decode_file(&path, DecoderOptions::default()).unwrap_err();

    match err {
        PpmDecodeErrors::FileNotFound(reported, _) => assert_eq!(reported, path),
        err => panic!("expected FileNotFound, got {err:?}")
    }
}
