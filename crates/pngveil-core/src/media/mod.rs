pub mod image;
pub mod metadata;
pub mod persist;
mod types;

pub use metadata::{CryptoParams, FORMAT_VERSION};
pub use persist::{commit, Persist};
pub use types::*;
