use clap::{Parser, Subcommand};
use log::debug;
use pngveil_core::{VeilError, PBKDF2_ITERATIONS};

use crate::commands::*;
use crate::CliResult;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Experimental: key derivation rounds, encode and decode must agree
    #[arg(
        long = "x-kdf-iterations",
        global = true,
        hide = true,
        default_value_t = PBKDF2_ITERATIONS
    )]
    pub kdf_iterations: u32,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Encode(encode::EncodeArgs),
    Decode(decode::DecodeArgs),
    Inspect(inspect::InspectArgs),
}

/// asks on the terminal, the input is not echoed
pub fn ask_for_password(confirm: bool) -> CliResult<String> {
    debug!("no password given, asking on the terminal");
    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }

    prompt
        .interact()
        .map_err(|e| VeilError::PasswordPrompt(e.to_string()))
}
