use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Shows capacity and metadata of a PNG image, without decrypting anything
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image to inspect
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,
}

impl InspectArgs {
    pub fn run(self) -> CliResult<()> {
        let report = pngveil_core::commands::inspect(&self.media)?;
        print!("{report}");

        Ok(())
    }
}
