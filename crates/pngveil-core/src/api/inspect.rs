use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use crate::media::image::max_message_len;
use crate::media::{Container, CryptoParams};
use crate::VeilError;

pub fn prepare() -> InspectApi {
    InspectApi::default()
}

#[derive(Default, Debug)]
pub struct InspectApi {
    image: Option<PathBuf>,
}

/// what can be told about an image without a password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub width: u32,
    pub height: u32,
    pub capacity_bits: u64,
    pub max_message_bytes: u64,
    pub text_fields: Vec<(String, String)>,
    /// `None` when all crypto parameters are present and well formed, otherwise the reason
    pub params_problem: Option<String>,
}

impl InspectReport {
    pub fn has_valid_params(&self) -> bool {
        self.params_problem.is_none()
    }
}

impl InspectApi {
    pub fn from_file(mut self, image: impl AsRef<Path>) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<InspectReport, VeilError> {
        let Some(image) = self.image else {
            return Err(VeilError::CarrierNotSet);
        };
        let container = Container::from_file(&image)?;

        Ok(InspectReport {
            width: container.width(),
            height: container.height(),
            capacity_bits: container.capacity(),
            max_message_bytes: max_message_len(container.capacity()),
            text_fields: container
                .text_fields()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            params_problem: CryptoParams::read(&container).err().map(|e| e.to_string()),
        })
    }
}

impl Display for InspectReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "dimensions: {}x{}", self.width, self.height)?;
        writeln!(f, "capacity: {} bits", self.capacity_bits)?;
        writeln!(f, "max message length: {} bytes", self.max_message_bytes)?;
        match &self.params_problem {
            None => writeln!(f, "crypto parameters: valid")?,
            Some(problem) => writeln!(f, "crypto parameters: {problem}")?,
        }
        for (key, value) in &self.text_fields {
            writeln!(f, "  {key}: {value}")?;
        }

        Ok(())
    }
}
