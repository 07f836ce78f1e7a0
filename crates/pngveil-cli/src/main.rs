use clap::Parser;
use log::debug;
use pngveil_core::{VeilError, PBKDF2_ITERATIONS};

mod cli;
mod commands;

use crate::cli::{CliArgs, Commands};

pub type CliResult<T> = std::result::Result<T, VeilError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let iterations = args.kdf_iterations;
    if iterations != PBKDF2_ITERATIONS {
        debug!("experimental key derivation with {iterations} iterations");
    }

    match args.command {
        Commands::Encode(encode) => encode.run(iterations),
        Commands::Decode(decode) => decode.run(iterations),
        Commands::Inspect(inspect) => inspect.run(),
    }
}
