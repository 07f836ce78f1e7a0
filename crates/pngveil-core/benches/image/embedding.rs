use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgb};
use pngveil_core::bit_codec::to_bits;
use pngveil_core::media::image::LsbCodec;

pub fn image_embedding(c: &mut Criterion) {
    c.bench_function("Image Embedding", |b| {
        let mut plain_image = ImageBuffer::from_pixel(512, 512, Rgb([255u8, 255, 255]));
        let payload = "0123456789abcdef".repeat(64);
        let bits = to_bits(payload.as_bytes()).expect("Payload is not 7-bit clean");

        b.iter(|| {
            LsbCodec::embed(&mut plain_image, &bits).expect("Cannot embed the payload");
        })
    });
}

criterion_group!(benches, image_embedding);
criterion_main!(benches);
