use std::fmt;
use std::string::FromUtf8Error;
use thiserror::Error;

pub use pngveil_seal::SealError;

#[derive(Error)]
pub enum VeilError {
    /// Represents an unsupported carrier media. For example, a JPEG or a text file
    #[error("Media format is not supported, only PNG images can carry a secret")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure to read from input.
    #[error("Read error: {source}")]
    ReadError { source: std::io::Error },

    /// The bitstream does not fit into the pixel channels of the carrier
    #[error(
        "Capacity Error: the {width}x{height} image offers {capacity} bits but {required} bits are needed"
    )]
    CapacityError {
        required: u64,
        capacity: u64,
        width: u32,
        height: u32,
    },

    /// A required metadata field is not present on the image
    #[error("Format Error: metadata field `{0}` is missing")]
    MissingField(&'static str),

    /// A metadata field has not the fixed length it must have
    #[error("Format Error: metadata field `{field}` must be {expected} hex chars, found {actual}")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A metadata field contains characters outside of the hex alphabet
    #[error("Format Error: metadata field `{0}` is not valid hex")]
    NonHexField(&'static str),

    /// The image was written by a format version this build does not understand
    #[error("Format Error: unsupported format version `{0}`")]
    UnsupportedFormatVersion(String),

    /// A payload byte has its most significant bit set, it could fake a delimiter
    #[error("Format Error: payload is not 7-bit clean and cannot be delimited safely")]
    InvalidPayloadAlphabet,

    /// The extracted bitstream is not a whole number of bytes
    #[error("Format Error: extracted {0} bits, which is not a multiple of 8")]
    FramingError(usize),

    /// Represents an unveil of no secret data, the scan ran out of pixels
    #[error("No hidden message found: end marker is missing")]
    DelimiterNotFound,

    /// Wrong password, tampered pixels or tampered metadata. Deliberately not more specific.
    /// A hidden payload that is not valid hex ends up here too.
    #[error("Authentication failed: wrong password or modified image")]
    AuthFailure,

    /// Represents an error when encrypting the data
    #[error("Encryption error")]
    EncryptionError(SealError),

    /// Represents the error of invalid UTF-8 text data found inside of a message
    #[error("Invalid text data found inside the message")]
    InvalidTextData(#[from] FromUtf8Error),

    /// Represents a failure to write target file.
    #[error("Write error: {source}")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// The freshly written artifact did not read back as expected
    #[error("Verification of the written image failed: {0}")]
    VerificationFailed(String),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,

    #[error("API Error: Missing password")]
    MissingPassword,

    #[error("API Error: key derivation iterations must be greater than zero")]
    InvalidIterationCount,

    /// Reading the password interactively failed
    #[error("Password prompt failed: {0}")]
    PasswordPrompt(String),
}

impl fmt::Debug for VeilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use Display for Debug so a failing `main` prints a single readable line
        write!(f, "{self}")
    }
}
