use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

pub use image::RgbImage;
use log::{debug, error};

use crate::bit_codec::BitStream;
use crate::error::VeilError;
use crate::media::image::{capacity_bits, LsbCodec};
use crate::result::Result;

/// the PNG chunk type a text field is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// `tEXt`, uncompressed Latin-1
    Latin1,
    /// `zTXt`, compressed Latin-1
    CompressedLatin1,
    /// `iTXt`, UTF-8
    Utf8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TextField {
    kind: TextKind,
    value: String,
}

/// a lossless RGB image plus the textual metadata that travels with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    image: RgbImage,
    text: BTreeMap<String, TextField>,
}

impl Container {
    pub fn from_image(image: RgbImage) -> Self {
        Self {
            image,
            text: BTreeMap::new(),
        }
    }

    /// loads a PNG file, any color type is converted to 8-bit RGB, alpha is dropped
    pub fn from_file(f: &Path) -> Result<Self> {
        if !is_png_extension(f) {
            return Err(VeilError::UnsupportedMedia);
        }
        let bytes = fs::read(f).map_err(|source| VeilError::ReadError { source })?;
        let container = Self::from_png_bytes(&bytes)?;
        debug!(
            "loaded {:?} with {}x{} pixels and {} text fields",
            f,
            container.width(),
            container.height(),
            container.text.len()
        );

        Ok(container)
    }

    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
            .map_err(|e| {
                debug!("Error decoding image: {e}");
                VeilError::InvalidImageMedia
            })?
            .to_rgb8();
        let reader = png::Decoder::new(Cursor::new(bytes))
            .read_info()
            .map_err(|e| {
                debug!("Error reading png chunks: {e}");
                VeilError::InvalidImageMedia
            })?;

        Self::with_text_of(image, reader.info())
    }

    /// pairs pixels with all `tEXt`, `zTXt` and `iTXt` chunks found ahead of the pixel data
    pub(crate) fn with_text_of(image: RgbImage, info: &png::Info) -> Result<Self> {
        let mut container = Self::from_image(image);
        for chunk in &info.uncompressed_latin1_text {
            container.set_text_as(chunk.keyword.clone(), TextKind::Latin1, chunk.text.clone());
        }
        for chunk in &info.compressed_latin1_text {
            let text = chunk.get_text().map_err(decoding_error)?;
            container.set_text_as(chunk.keyword.clone(), TextKind::CompressedLatin1, text);
        }
        for chunk in &info.utf8_text {
            let text = chunk.get_text().map_err(decoding_error)?;
            container.set_text_as(chunk.keyword.clone(), TextKind::Utf8, text);
        }

        Ok(container)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// bits the pixel channels can carry
    pub fn capacity(&self) -> u64 {
        capacity_bits(self.width(), self.height())
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.text.get(key).map(|field| field.value.as_str())
    }

    pub fn text_kind(&self, key: &str) -> Option<TextKind> {
        self.text.get(key).map(|field| field.kind)
    }

    /// sets a plain `tEXt` field, replacing any field of the same keyword
    pub fn set_text<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.set_text_as(key, TextKind::Latin1, value)
    }

    pub fn set_text_as<K: Into<String>, V: Into<String>>(
        &mut self,
        key: K,
        kind: TextKind,
        value: V,
    ) -> &mut Self {
        let value = value.into();
        self.text.insert(key.into(), TextField { kind, value });
        self
    }

    pub fn remove_text(&mut self, key: &str) -> Option<String> {
        self.text.remove(key).map(|field| field.value)
    }

    pub fn text_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.text
            .iter()
            .map(|(k, field)| (k.as_str(), field.value.as_str()))
    }

    pub fn hide_data(&mut self, bits: &BitStream) -> Result<&mut Self> {
        LsbCodec::embed(&mut self.image, bits)?;
        Ok(self)
    }

    pub fn unveil_data(&self) -> Result<BitStream> {
        LsbCodec::extract(&self.image)
    }

    /// serializes as 8-bit RGB PNG, text fields keep their chunk type and go ahead of the pixel data
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let (width, height) = self.image.dimensions();
        let mut encoder = png::Encoder::new(writer, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        for (keyword, field) in &self.text {
            let (keyword, text) = (keyword.clone(), field.value.clone());
            match field.kind {
                TextKind::Latin1 => encoder.add_text_chunk(keyword, text),
                TextKind::CompressedLatin1 => encoder.add_ztxt_chunk(keyword, text),
                TextKind::Utf8 => encoder.add_itxt_chunk(keyword, text),
            }
            .map_err(encoding_error)?;
        }

        let mut writer = encoder.write_header().map_err(encoding_error)?;
        writer
            .write_image_data(self.image.as_raw())
            .map_err(encoding_error)?;
        writer.finish().map_err(encoding_error)
    }
}

pub(crate) fn is_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

fn decoding_error(e: png::DecodingError) -> VeilError {
    debug!("Error reading text chunk: {e}");
    VeilError::InvalidImageMedia
}

fn encoding_error(e: png::EncodingError) -> VeilError {
    error!("Error saving image: {e}");
    VeilError::ImageEncodingError
}
