use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Hides an encrypted text message in a PNG image
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Password used to encrypt the message, asked for when omitted
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// PNG image used as carrier, used readonly.
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message", required = true)]
    pub message: String,
}

impl EncodeArgs {
    pub fn run(self, iterations: u32) -> CliResult<()> {
        let password = match self.password {
            Some(password) => password,
            None => crate::cli::ask_for_password(true)?,
        };

        let written = pngveil_core::commands::encode(
            &self.media,
            &self.write_to_file,
            &self.message,
            password.into(),
            iterations,
        )?;
        println!("{}", written.display());

        Ok(())
    }
}
