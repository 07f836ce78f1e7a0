//! # Sealing
//! Password based key derivation (PBKDF2-HMAC-SHA256) and authenticated
//! encryption (AES-256-GCM) for the pngveil image envelope.
//!
//! The tag is kept detached from the ciphertext, because pngveil stores it
//! next to the salt and nonce in the image metadata, while only the
//! ciphertext travels through the pixels.

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::Aes256Gcm;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

pub mod error;

pub use crate::error::SealError;

/// Iteration count of the key derivation.
/// Encode and decode must agree on it, a mismatch only surfaces as an authentication failure.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
pub const KEY_LEN: usize = 32;

pub type Result<T> = std::result::Result<T, SealError>;
pub type Key = Zeroizing<[u8; KEY_LEN]>;

/// Output of one encryption, the three parts are only valid together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
}

/// fresh random salt from the operating system rng
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// derives a 256 bit key from password and salt with PBKDF2-HMAC-SHA256
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN], iterations: u32) -> Key {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut *key);

    key
}

/// encrypt data with AES-256-GCM under a fresh random nonce, the tag is returned detached
pub fn encrypt(plaintext: &[u8], key: &Key) -> Result<Sealed> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let cipher = Aes256Gcm::new(GenericArray::from_slice(key.as_slice()));
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), b"", &mut buffer)
        .map_err(|_| SealError::EncryptionFailed)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(Sealed {
        ciphertext: buffer,
        nonce,
        tag: tag_bytes,
    })
}

/// verifies the tag and decrypts, nothing of the plaintext is returned when verification fails
pub fn decrypt(
    ciphertext: &[u8],
    nonce: &[u8; NONCE_LEN],
    tag: &[u8; TAG_LEN],
    key: &Key,
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(GenericArray::from_slice(key.as_slice()));
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            b"",
            &mut buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| SealError::AuthenticationFailed)?;

    Ok(buffer)
}
