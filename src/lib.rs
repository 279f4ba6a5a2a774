//! OpenPGP ECDH session-key wrapping (RFC 6637)
//!
//! This crate implements the symmetric half of OpenPGP public-key
//! encryption with ECDH subkeys: given an already-computed shared
//! point and the recipient's parsed key material, it derives the
//! key-encryption key with the one-block concatenation KDF of NIST
//! SP 800-56A §5.8.1 and wraps the caller-padded session key with AES
//! Key Wrap (RFC 3394). Every octet of the KDF input is standardized;
//! the assembly here is byte-exact with RFC 6637 §8.
//!
//! Scalar multiplication, ephemeral scalar generation, packet grammar,
//! and session-key padding are the callers' business; the crate
//! consumes and produces their values through the [`mpi::Mpi`] and
//! session-key types.
//!
//! All operations are synchronous and CPU-bound, hold no shared
//! mutable state, and wipe their secret intermediates on every exit
//! path.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod ecdh;
pub mod error;
pub mod kdf;
pub mod mpi;
pub mod params;
pub mod secret;
pub mod secure;
pub mod wrap;

// Re-exports
pub use ecdh::{decrypt_session_key, encrypt_session_key, EcdhParams};
pub use error::{Error, Result};
pub use mpi::Mpi;
pub use params::{HashAlgorithm, KekParams, SymmetricAlgorithm};
pub use secret::SharedSecret;
pub use secure::SecretVec;
pub use wrap::{PaddedSessionKey, WrappedSessionKey};
