//! Least significant bit embedding into 8-bit RGB pixel data.
//!
//! Channels are visited in raster order: rows top to bottom, pixels left to
//! right, then R, G and B. That is exactly the memory layout of an
//! [`RgbImage`], so both directions walk the raw buffer.

use image::RgbImage;
use log::debug;

use crate::bit_codec::{BitStream, DELIMITER, DELIMITER_BITS};
use crate::error::VeilError;
use crate::result::Result;

pub const CHANNELS_PER_PIXEL: u64 = 3;

/// number of bits an image of the given dimensions can carry, one per color channel
pub fn capacity_bits(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * CHANNELS_PER_PIXEL
}

/// largest plaintext in bytes that fits, every byte travels as two hex chars plus the delimiter
pub fn max_message_len(capacity_bits: u64) -> u64 {
    capacity_bits.saturating_sub(DELIMITER_BITS as u64) / 8 / 2
}

pub trait HideBit {
    fn hide_bit(self, bit: bool);
}

impl HideBit for &mut u8 {
    #[inline(always)]
    fn hide_bit(self, bit: bool) {
        *self = (*self & (u8::MAX - 1)) | u8::from(bit);
    }
}

pub trait UnveilBit {
    fn unveil_bit(self) -> bool;
}

impl UnveilBit for u8 {
    #[inline(always)]
    fn unveil_bit(self) -> bool {
        self & 1 == 1
    }
}

pub struct LsbCodec;

impl LsbCodec {
    /// writes the bitstream into the channel LSBs, the image stays untouched if it does not fit
    pub fn embed(carrier: &mut RgbImage, bits: &BitStream) -> Result<()> {
        let (width, height) = carrier.dimensions();
        let capacity = capacity_bits(width, height);
        let required = bits.len() as u64;
        if required > capacity {
            return Err(VeilError::CapacityError {
                required,
                capacity,
                width,
                height,
            });
        }

        for (channel, bit) in carrier.iter_mut().zip(bits.iter()) {
            channel.hide_bit(bit);
        }
        debug!("embedded {required} of {capacity} available bits");

        Ok(())
    }

    /// reads channel LSBs up to the first delimiter and returns the bits before it
    pub fn extract(carrier: &RgbImage) -> Result<BitStream> {
        let mut bits = BitStream::new();
        let mut window: u16 = 0;

        for channel in carrier.iter() {
            let bit = channel.unveil_bit();
            bits.push(bit);
            window = (window << 1) | u16::from(bit);

            if bits.len() >= DELIMITER_BITS && window == DELIMITER {
                bits.truncate(bits.len() - DELIMITER_BITS);
                debug!("found end marker after {} payload bits", bits.len());
                return Ok(bits);
            }
        }

        Err(VeilError::DelimiterNotFound)
    }
}
