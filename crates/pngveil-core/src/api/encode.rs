use std::path::{Path, PathBuf};

use log::info;
use pngveil_seal::PBKDF2_ITERATIONS;

use super::Password;
use crate::bit_codec::{to_bits, BitStream};
use crate::envelope::CryptoEnvelope;
use crate::media::{commit, Container};
use crate::VeilError;

pub fn prepare() -> EncodeApi {
    EncodeApi::default()
}

/// everything one encode run needs, nothing is read from global state
#[derive(Debug)]
pub struct EncodeApi {
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    message: Option<String>,
    password: Password,
    iterations: u32,
}

impl Default for EncodeApi {
    fn default() -> Self {
        Self {
            image: None,
            output: None,
            message: None,
            password: Password::default(),
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

impl EncodeApi {
    /// The carrier image, it is only read
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the image with the hidden message is written to
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Set the password the message gets encrypted with
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.into();
        self
    }

    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Key derivation rounds, must match on decode. Defaults to [`PBKDF2_ITERATIONS`].
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Execute the encode process, returns the path of the written image
    pub fn execute(self) -> Result<PathBuf, VeilError> {
        let (message, password) = self.validate()?;
        let Some(image) = self.image.as_deref() else {
            return Err(VeilError::CarrierNotSet);
        };
        let Some(output) = self.output.as_deref() else {
            return Err(VeilError::TargetNotSet);
        };

        let mut container = Container::from_file(image)?;
        let bits_needed = BitStream::required_bits(message.len() * 2);
        if bits_needed > container.capacity() {
            // fail before paying for the key derivation
            return Err(VeilError::CapacityError {
                required: bits_needed,
                capacity: container.capacity(),
                width: container.width(),
                height: container.height(),
            });
        }

        let envelope = CryptoEnvelope::seal(password, message.as_bytes(), self.iterations)?;
        let bits = to_bits(envelope.ciphertext_hex().as_bytes())?;
        container.hide_data(&bits)?;
        envelope.params().attach(&mut container);

        commit(&container, output)?;
        info!(
            "hid {} message bytes in {}x{} image {:?}",
            message.len(),
            container.width(),
            container.height(),
            output
        );

        Ok(output.to_path_buf())
    }

    /// returns message and password once both are usable
    fn validate(&self) -> Result<(&str, &str), VeilError> {
        let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) else {
            return Err(VeilError::MissingMessage);
        };
        let Some(password) = self.password.non_empty() else {
            return Err(VeilError::MissingPassword);
        };
        if self.iterations == 0 {
            return Err(VeilError::InvalidIterationCount);
        }

        Ok((message, password))
    }
}
