//! # pngveil Core API
//!
//! Hides a password encrypted text message in the least significant bits of
//! a PNG image. The message is sealed with AES-256-GCM under a PBKDF2 derived
//! key, its ciphertext travels hex encoded through the pixels, terminated by a
//! 16 bit end marker, and salt, nonce and tag are stored as `tEXt` chunks.
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust,no_run
//! pngveil_core::api::encode::prepare()
//!     .with_image("carrier.png")
//!     .with_message("Hello, World!")
//!     .with_password("SuperSecret42")
//!     .with_output("image-with-a-secret.png")
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```
//!
//! ## Unveil the message again
//!
//! ```rust,no_run
//! let message = pngveil_core::api::decode::prepare()
//!     .from_secret_file("image-with-a-secret.png")
//!     .using_password("SuperSecret42")
//!     .execute()
//!     .expect("Failed to unveil message from image");
//!
//! assert_eq!(message, "Hello, World!");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod bit_codec;
pub mod commands;
pub mod envelope;
pub mod error;
pub mod media;
pub mod result;

pub use crate::bit_codec::{BitStream, DELIMITER};
pub use crate::envelope::CryptoEnvelope;
pub use crate::error::VeilError;
pub use crate::media::{Container, CryptoParams, Persist, TextKind};
pub use crate::result::Result;
pub use pngveil_seal::PBKDF2_ITERATIONS;
