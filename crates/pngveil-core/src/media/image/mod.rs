pub mod lsb_codec;

pub use lsb_codec::{capacity_bits, max_message_len, LsbCodec};
