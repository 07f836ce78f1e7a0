use std::path::{Path, PathBuf};

use log::info;
use pngveil_seal::PBKDF2_ITERATIONS;

use super::Password;
use crate::bit_codec::from_bits;
use crate::envelope::CryptoEnvelope;
use crate::media::{Container, CryptoParams};
use crate::VeilError;

pub fn prepare() -> DecodeApi {
    DecodeApi::default()
}

#[derive(Debug)]
pub struct DecodeApi {
    secret_image: Option<PathBuf>,
    password: Password,
    iterations: u32,
}

impl Default for DecodeApi {
    fn default() -> Self {
        Self {
            secret_image: None,
            password: Password::default(),
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

impl DecodeApi {
    /// This is the secret image that contains the message to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// Set the password the message was encrypted with
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Key derivation rounds, must be the ones used on encode
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Execute the unveil process, returns exactly the hidden message
    pub fn execute(self) -> Result<String, VeilError> {
        let Some(secret_image) = self.secret_image else {
            return Err(VeilError::CarrierNotSet);
        };
        let Some(password) = self.password.non_empty() else {
            return Err(VeilError::MissingPassword);
        };
        if self.iterations == 0 {
            return Err(VeilError::InvalidIterationCount);
        }

        let container = Container::from_file(&secret_image)?;
        let params = CryptoParams::read(&container)?;
        let bits = container.unveil_data()?;
        let payload = from_bits(&bits)?;
        let envelope = CryptoEnvelope::from_parts(&payload, &params)?;
        let plaintext = envelope.open(password, self.iterations)?;
        info!(
            "unveiled {} message bytes from {:?}",
            plaintext.len(),
            secret_image
        );

        Ok(String::from_utf8(plaintext)?)
    }
}
