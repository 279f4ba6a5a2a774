//! Error handling for the ECDH key-wrapping pipeline

use core::fmt;

/// Error type for ECDH session-key wrapping operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Recipient key material is malformed: bad KEK parameter blob,
    /// algorithm id outside the enumerated set, or a public point too
    /// short for its curve
    BadPublicKey { reason: &'static str },

    /// An MPI or length-prefixed field is inconsistent with its
    /// self-described size
    BadMpi { context: &'static str },

    /// AES key-unwrap integrity check failed: wrong KEK, tampered
    /// wrap, or wrong recipient key
    BadKey,

    /// Secure allocation was refused
    OutOfMemory,

    /// Unexpected failure in a cryptographic primitive; fatal, never
    /// retried
    Crypto { context: &'static str },
}

/// Result type for ECDH session-key wrapping operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadPublicKey { reason } => {
                write!(f, "bad public key: {}", reason)
            }
            Error::BadMpi { context } => {
                write!(f, "bad MPI value: {}", context)
            }
            Error::BadKey => {
                write!(f, "key unwrap failed: integrity check mismatch")
            }
            Error::OutOfMemory => {
                write!(f, "secure allocation refused")
            }
            Error::Crypto { context } => {
                write!(f, "cryptographic backend failure in {}", context)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub mod validate;
