use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Unveils the text message hidden in a PNG image
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Password used to encrypt the message, asked for when omitted
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Source image that contains the secret message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,
}

impl DecodeArgs {
    pub fn run(self, iterations: u32) -> CliResult<()> {
        let password = match self.password {
            Some(password) => password,
            None => crate::cli::ask_for_password(false)?,
        };

        let message = pngveil_core::commands::decode(&self.media, password.into(), iterations)?;

        // exactly the message, no trailing newline
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(message.as_bytes())?;
        stdout.flush()?;

        Ok(())
    }
}
