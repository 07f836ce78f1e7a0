//! Cryptographic parameters carried as text fields next to the pixel data.
//!
//! The field names match the artifacts of earlier tools, `formatVersion`
//! is new and treated as `1` when absent.

use log::debug;
use pngveil_seal::{NONCE_LEN, SALT_LEN, TAG_LEN};

use crate::error::VeilError;
use crate::media::types::Container;
use crate::result::Result;

pub const SALT_FIELD: &str = "salt";
pub const NONCE_FIELD: &str = "iv";
pub const TAG_FIELD: &str = "authTag";
pub const VERSION_FIELD: &str = "formatVersion";

/// PBKDF2-HMAC-SHA256, AES-256-GCM, hex payload, delimiter framing
pub const FORMAT_VERSION: &str = "1";

/// salt, nonce and tag of one encryption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoParams {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
}

impl CryptoParams {
    /// stores all fields as lower case hex, overwriting whatever was there
    pub fn attach(&self, container: &mut Container) {
        container
            .set_text(SALT_FIELD, hex::encode(self.salt))
            .set_text(NONCE_FIELD, hex::encode(self.nonce))
            .set_text(TAG_FIELD, hex::encode(self.tag))
            .set_text(VERSION_FIELD, FORMAT_VERSION);
    }

    /// reads and validates all fields, fails before anybody scans the pixels
    pub fn read(container: &Container) -> Result<Self> {
        if let Some(version) = container.text(VERSION_FIELD) {
            if version != FORMAT_VERSION {
                return Err(VeilError::UnsupportedFormatVersion(version.to_owned()));
            }
        }

        let params = Self {
            salt: read_hex_field(container, SALT_FIELD)?,
            nonce: read_hex_field(container, NONCE_FIELD)?,
            tag: read_hex_field(container, TAG_FIELD)?,
        };
        debug!("crypto parameters present and well formed");

        Ok(params)
    }
}

fn read_hex_field<const N: usize>(container: &Container, field: &'static str) -> Result<[u8; N]> {
    let value = container
        .text(field)
        .ok_or(VeilError::MissingField(field))?;
    if value.len() != N * 2 {
        return Err(VeilError::InvalidFieldLength {
            field,
            expected: N * 2,
            actual: value.len(),
        });
    }

    let mut out = [0u8; N];
    hex::decode_to_slice(value, &mut out).map_err(|_| VeilError::NonHexField(field))?;

    Ok(out)
}
