use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgb};
use pngveil_core::bit_codec::{from_bits, to_bits};
use pngveil_core::media::image::LsbCodec;

pub fn image_extraction(c: &mut Criterion) {
    c.bench_function("Image Extraction", |b| {
        let mut secret_image = ImageBuffer::from_pixel(512, 512, Rgb([255u8, 255, 255]));
        let payload = "0123456789abcdef".repeat(64);
        let bits = to_bits(payload.as_bytes()).expect("Payload is not 7-bit clean");
        LsbCodec::embed(&mut secret_image, &bits).expect("Cannot embed the payload");

        b.iter(|| {
            let bits = LsbCodec::extract(&secret_image).expect("End marker not found");
            from_bits(&bits).expect("Payload is not byte aligned");
        })
    });
}

criterion_group!(benches, image_extraction);
criterion_main!(benches);
