use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SealError {
    /// The cipher refused the input, only happens for absurdly large payloads
    #[error("Encryption error")]
    EncryptionFailed,

    /// Tag verification failed. Deliberately carries no detail about the cause.
    #[error("Authentication failed")]
    AuthenticationFailed,
}
