use log::debug;
use pngveil_seal::{decrypt, derive_key, encrypt, generate_salt, SealError, SALT_LEN};

use crate::error::VeilError;
use crate::media::metadata::CryptoParams;
use crate::result::Result;

/// ciphertext plus everything needed to open it again, produced and consumed as a whole
#[derive(Clone, PartialEq, Eq)]
pub struct CryptoEnvelope {
    pub ciphertext: Vec<u8>,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; pngveil_seal::NONCE_LEN],
    pub tag: [u8; pngveil_seal::TAG_LEN],
}

impl std::fmt::Debug for CryptoEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoEnvelope")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

impl CryptoEnvelope {
    /// encrypts under a key derived from the password and a fresh salt
    pub fn seal(password: &str, plaintext: &[u8], iterations: u32) -> Result<Self> {
        if iterations == 0 {
            return Err(VeilError::InvalidIterationCount);
        }
        let salt = generate_salt();
        let key = derive_key(password, &salt, iterations);
        let sealed = encrypt(plaintext, &key).map_err(VeilError::EncryptionError)?;
        debug!("sealed {} bytes", sealed.ciphertext.len());

        Ok(Self {
            ciphertext: sealed.ciphertext,
            salt,
            nonce: sealed.nonce,
            tag: sealed.tag,
        })
    }

    pub fn open(&self, password: &str, iterations: u32) -> Result<Vec<u8>> {
        if iterations == 0 {
            return Err(VeilError::InvalidIterationCount);
        }
        let key = derive_key(password, &self.salt, iterations);

        decrypt(&self.ciphertext, &self.nonce, &self.tag, &key).map_err(|e| match e {
            SealError::AuthenticationFailed => VeilError::AuthFailure,
            other => VeilError::EncryptionError(other),
        })
    }

    /// lower case hex of the ciphertext, this is what travels through the pixels
    pub fn ciphertext_hex(&self) -> String {
        hex::encode(&self.ciphertext)
    }

    pub fn params(&self) -> CryptoParams {
        CryptoParams {
            salt: self.salt,
            nonce: self.nonce,
            tag: self.tag,
        }
    }

    /// reassembles the envelope from the extracted payload and the metadata
    ///
    /// The payload must be lower case hex as written by [`Self::ciphertext_hex`]. Upper case
    /// is refused here, otherwise a flipped `0x20` bit in the pixels would go unnoticed.
    /// A payload that is not such hex can only come from modified pixels, so it is reported
    /// as [`VeilError::AuthFailure`] like any other ciphertext modification.
    pub fn from_parts(ciphertext_hex: &[u8], params: &CryptoParams) -> Result<Self> {
        if !ciphertext_hex
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
        {
            debug!("hidden payload is not lower case hex");
            return Err(VeilError::AuthFailure);
        }
        let ciphertext = hex::decode(ciphertext_hex).map_err(|_| {
            debug!("hidden payload has an odd number of hex digits");
            VeilError::AuthFailure
        })?;

        Ok(Self {
            ciphertext,
            salt: params.salt,
            nonce: params.nonce,
            tag: params.tag,
        })
    }
}
