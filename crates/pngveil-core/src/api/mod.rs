pub mod decode;
pub mod encode;
pub mod inspect;
mod shared;

pub use shared::*;
