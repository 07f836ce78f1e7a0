use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgb, RgbImage};
use rand::{Rng, RngCore};
use tempfile::TempDir;

use pngveil_core::commands::{decode, encode};
use pngveil_core::*;

const ROUNDS: u32 = 1_000;

fn write_carrier(dir: &Path, image: RgbImage) -> PathBuf {
    let path = dir.join("carrier.png");
    image.save(&path).expect("Cannot write carrier image");
    path
}

fn white(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_pixel(width, height, Rgb([255, 255, 255]))
}

fn noise(width: u32, height: u32) -> RgbImage {
    let mut rng = rand::thread_rng();
    let mut image = RgbImage::new(width, height);
    rng.fill_bytes(&mut image);
    image
}

#[test]
fn should_round_trip_with_default_iterations() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(out_dir.path(), white(100, 100));
    let secret = out_dir.path().join("encoded.png");

    encode(
        &carrier,
        &secret,
        "Hello, this is a test message!",
        "test_password123".into(),
        PBKDF2_ITERATIONS,
    )
    .unwrap();

    let message = decode(&secret, "test_password123".into(), PBKDF2_ITERATIONS).unwrap();
    assert_eq!(message, "Hello, this is a test message!");
}

#[test]
fn should_keep_the_carrier_untouched() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(out_dir.path(), white(20, 20));
    let before = std::fs::read(&carrier).unwrap();

    encode(
        &carrier,
        &out_dir.path().join("encoded.png"),
        "hi",
        "pw".into(),
        ROUNDS,
    )
    .unwrap();

    assert_eq!(std::fs::read(&carrier).unwrap(), before);
}

#[test]
fn should_round_trip_unicode_and_newlines() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(out_dir.path(), white(64, 64));
    let secret = out_dir.path().join("encoded.png");
    let text = "Grüße, 世界!\nzweite Zeile\t🦀\n";

    encode(&carrier, &secret, text, "pw".into(), ROUNDS).unwrap();

    assert_eq!(decode(&secret, "pw".into(), ROUNDS).unwrap(), text);
}

#[test]
fn should_decode_the_same_artifact_repeatedly() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(out_dir.path(), white(40, 40));
    let secret = out_dir.path().join("encoded.png");
    encode(&carrier, &secret, "again and again", "pw".into(), ROUNDS).unwrap();
    let bytes = std::fs::read(&secret).unwrap();

    for _ in 0..3 {
        assert_eq!(
            decode(&secret, "pw".into(), ROUNDS).unwrap(),
            "again and again"
        );
    }
    assert_eq!(std::fs::read(&secret).unwrap(), bytes);
}

#[test]
fn should_produce_different_artifacts_for_the_same_input() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(out_dir.path(), white(40, 40));
    let first = out_dir.path().join("first.png");
    let second = out_dir.path().join("second.png");

    encode(&carrier, &first, "same", "pw".into(), ROUNDS).unwrap();
    encode(&carrier, &second, "same", "pw".into(), ROUNDS).unwrap();

    let first = Container::from_file(&first).unwrap();
    let second = Container::from_file(&second).unwrap();
    assert_ne!(first.text("salt"), second.text("salt"));
    assert_ne!(first.text("iv"), second.text("iv"));
}

#[test]
fn should_find_the_real_end_marker_in_noisy_carriers() {
    let mut rng = rand::thread_rng();
    let out_dir = TempDir::new().unwrap();

    for round in 0..8 {
        let carrier = write_carrier(out_dir.path(), noise(48, 48));
        let secret = out_dir.path().join(format!("encoded-{round}.png"));
        let len = rng.gen_range(1..=200);
        let message: String = (0..len)
            .map(|_| rng.gen_range(0x20u8..0x7f) as char)
            .collect();
        if message.trim().is_empty() {
            continue;
        }

        encode(&carrier, &secret, &message, "noise".into(), ROUNDS).unwrap();

        assert_eq!(decode(&secret, "noise".into(), ROUNDS).unwrap(), message);
    }
}

#[test]
fn should_fill_an_image_up_to_its_capacity() {
    let out_dir = TempDir::new().unwrap();
    // 10x10 offers 300 bits, (300 - 16) / 8 / 2 = 17 message bytes
    let carrier = write_carrier(out_dir.path(), white(10, 10));
    let secret = out_dir.path().join("encoded.png");
    let largest = "x".repeat(17);

    encode(&carrier, &secret, &largest, "pw".into(), ROUNDS).unwrap();
    assert_eq!(decode(&secret, "pw".into(), ROUNDS).unwrap(), largest);

    let too_large = "x".repeat(18);
    let result = encode(
        &carrier,
        &out_dir.path().join("too-large.png"),
        &too_large,
        "pw".into(),
        ROUNDS,
    );
    assert!(matches!(
        result,
        Err(VeilError::CapacityError {
            required: 304,
            capacity: 300,
            ..
        })
    ));
}

#[test]
fn should_not_create_the_destination_when_the_image_is_too_small() {
    let out_dir = TempDir::new().unwrap();
    let carrier = write_carrier(out_dir.path(), white(1, 1));
    let secret = out_dir.path().join("encoded.png");

    let result = encode(&carrier, &secret, "hi", "pw".into(), ROUNDS);

    assert!(matches!(
        result,
        Err(VeilError::CapacityError {
            capacity: 3,
            width: 1,
            height: 1,
            ..
        })
    ));
    assert!(!secret.exists());
}

#[test]
fn should_reject_non_png_media() {
    let out_dir = TempDir::new().unwrap();
    let jpeg = out_dir.path().join("carrier.jpg");
    std::fs::write(&jpeg, b"not really a jpeg").unwrap();

    let result = encode(
        &jpeg,
        &out_dir.path().join("out.png"),
        "hi",
        "pw".into(),
        ROUNDS,
    );
    assert!(matches!(result, Err(VeilError::UnsupportedMedia)));

    let broken = out_dir.path().join("broken.png");
    std::fs::write(&broken, b"not a png at all").unwrap();
    let result = decode(&broken, "pw".into(), ROUNDS);
    assert!(matches!(result, Err(VeilError::InvalidImageMedia)));
}

#[test]
fn should_carry_over_the_text_chunks_of_the_carrier() {
    let out_dir = TempDir::new().unwrap();
    let carrier = out_dir.path().join("carrier.png");
    {
        let file = std::io::BufWriter::new(std::fs::File::create(&carrier).unwrap());
        let mut encoder = png::Encoder::new(file, 20, 20);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .add_text_chunk("Author".to_owned(), "somebody".to_owned())
            .unwrap();
        encoder
            .add_ztxt_chunk("Comment".to_owned(), "a longer comment".to_owned())
            .unwrap();
        encoder
            .add_itxt_chunk("Title".to_owned(), "Ünïcödé title".to_owned())
            .unwrap();
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[200; 20 * 20 * 3]).unwrap();
        writer.finish().unwrap();
    }
    let secret = out_dir.path().join("encoded.png");

    encode(&carrier, &secret, "keep my chunks", "pw".into(), ROUNDS).unwrap();

    let container = Container::from_file(&secret).unwrap();
    let keys: Vec<&str> = container.text_fields().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec!["Author", "Comment", "Title", "authTag", "formatVersion", "iv", "salt"]
    );
    assert_eq!(container.text("Author"), Some("somebody"));
    assert_eq!(container.text_kind("Author"), Some(TextKind::Latin1));
    assert_eq!(container.text("Comment"), Some("a longer comment"));
    assert_eq!(container.text_kind("Comment"), Some(TextKind::CompressedLatin1));
    assert_eq!(container.text("Title"), Some("Ünïcödé title"));
    assert_eq!(container.text_kind("Title"), Some(TextKind::Utf8));
    assert_eq!(decode(&secret, "pw".into(), ROUNDS).unwrap(), "keep my chunks");
}

#[test]
fn should_carry_alpha_images_as_rgb() {
    let out_dir = TempDir::new().unwrap();
    let carrier = out_dir.path().join("carrier.png");
    image::RgbaImage::from_pixel(16, 16, image::Rgba([10, 20, 30, 40]))
        .save(&carrier)
        .unwrap();
    let secret = out_dir.path().join("encoded.png");

    encode(&carrier, &secret, "alpha", "pw".into(), ROUNDS).unwrap();

    let container = Container::from_file(&secret).unwrap();
    assert_eq!((container.width(), container.height()), (16, 16));
    assert_eq!(decode(&secret, "pw".into(), ROUNDS).unwrap(), "alpha");
}
