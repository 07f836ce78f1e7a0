//! Conversion between payload bytes and the bitstream stored in pixel LSBs.
//!
//! A bitstream is every payload bit, most significant bit first per byte,
//! terminated by [`DELIMITER`]. Payload bytes must be 7-bit clean: with the
//! leading bit of every byte at 0, fifteen consecutive ones can never occur
//! inside the payload, so the first delimiter match is always the real end.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::Cursor;

use crate::error::VeilError;
use crate::result::Result;

/// end marker `1111111111111110`
pub const DELIMITER: u16 = 0xFFFE;
pub const DELIMITER_BITS: usize = 16;

/// ordered bits, as they are laid into (or read from) the color channels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bits: Vec<bool>,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// number of bits needed to carry `payload_len` bytes including the delimiter
    pub fn required_bits(payload_len: usize) -> u64 {
        payload_len as u64 * 8 + DELIMITER_BITS as u64
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }
}

impl From<Vec<bool>> for BitStream {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl AsRef<[bool]> for BitStream {
    fn as_ref(&self) -> &[bool] {
        &self.bits
    }
}

/// turns payload bytes into a delimited bitstream
pub fn to_bits(payload: &[u8]) -> Result<BitStream> {
    if payload.iter().any(|b| b & 0x80 != 0) {
        return Err(VeilError::InvalidPayloadAlphabet);
    }

    let mut stream = BitStream::with_capacity(BitStream::required_bits(payload.len()) as usize);
    let mut reader = BitReader::endian(Cursor::new(payload), BigEndian);
    for _ in 0..payload.len() * 8 {
        stream.push(reader.read_bit()?);
    }
    for i in (0..DELIMITER_BITS).rev() {
        stream.push((DELIMITER >> i) & 1 == 1);
    }

    Ok(stream)
}

/// turns an undelimited bitstream back into bytes, the length must be a multiple of 8
pub fn from_bits(stream: &BitStream) -> Result<Vec<u8>> {
    if stream.len() % 8 != 0 {
        return Err(VeilError::FramingError(stream.len()));
    }

    let mut writer = BitWriter::endian(Vec::with_capacity(stream.len() / 8), BigEndian);
    for bit in stream.iter() {
        writer.write_bit(bit)?;
    }

    Ok(writer.into_writer())
}
