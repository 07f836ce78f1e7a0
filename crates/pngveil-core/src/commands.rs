use std::path::{Path, PathBuf};

use crate::api::inspect::InspectReport;
use crate::api::Password;
use crate::VeilError;

pub fn encode(
    input_image: &Path,
    output_image: &Path,
    message: &str,
    password: Password,
    iterations: u32,
) -> Result<PathBuf, VeilError> {
    crate::api::encode::prepare()
        .with_image(input_image)
        .with_output(output_image)
        .with_message(message)
        .using_password(password)
        .with_iterations(iterations)
        .execute()
}

pub fn decode(
    secret_image: &Path,
    password: Password,
    iterations: u32,
) -> Result<String, VeilError> {
    crate::api::decode::prepare()
        .from_secret_file(secret_image)
        .using_password(password)
        .with_iterations(iterations)
        .execute()
}

pub fn inspect(image: &Path) -> Result<InspectReport, VeilError> {
    crate::api::inspect::prepare().from_file(image).execute()
}
