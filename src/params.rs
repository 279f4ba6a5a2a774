//! Algorithm identifiers and KEK parameter selection
//!
//! OpenPGP numbers the algorithms this subsystem may combine: hashes
//! SHA-256/384/512 (ids 8, 9, 10) and ciphers AES-128/192/256 (ids 7,
//! 8, 9). The matrix is closed; new combinations require a revision of
//! the wrapping profile, not an extension point here.

use crate::error::{validate, Error, Result};

/// Public-key algorithm octet for ECDH in the KDF parameter string
pub const ECDH_ALGORITHM_ID: u8 = 0x12;

/// Serialized length of a KEK parameter blob: count, version, hash,
/// cipher
pub const KEK_PARAMS_LEN: usize = 4;

/// Version octet identifying the KDF+AESWRAP wrapping method
const VERSION_KDF_AESWRAP: u8 = 1;

/// Curve OID for NIST P-256 (1.2.840.10045.3.1.7)
pub const NIST_P256_OID: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07];

/// Curve OID for NIST P-384 (1.3.132.0.34)
pub const NIST_P384_OID: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x22];

/// Curve OID for NIST P-521 (1.3.132.0.35)
pub const NIST_P521_OID: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x23];

/// Curve OID for Curve25519 (1.3.6.1.4.1.3029.1.5.1)
pub const CURVE25519_OID: &[u8] = &[
    0x2B, 0x06, 0x01, 0x04, 0x01, 0x97, 0x55, 0x01, 0x05, 0x01,
];

/// KDF digest algorithm for the key-encryption key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// OpenPGP digest algorithm id
    pub const fn openpgp_id(self) -> u8 {
        match self {
            HashAlgorithm::Sha256 => 8,
            HashAlgorithm::Sha384 => 9,
            HashAlgorithm::Sha512 => 10,
        }
    }

    /// Digest output length in octets
    pub const fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    fn from_openpgp_id(id: u8) -> Result<Self> {
        match id {
            8 => Ok(HashAlgorithm::Sha256),
            9 => Ok(HashAlgorithm::Sha384),
            10 => Ok(HashAlgorithm::Sha512),
            _ => Err(Error::BadPublicKey {
                reason: "KDF hash algorithm outside the allowed set",
            }),
        }
    }
}

/// AES variant used for the RFC 3394 key wrap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymmetricAlgorithm {
    Aes128,
    Aes192,
    Aes256,
}

impl SymmetricAlgorithm {
    /// OpenPGP symmetric algorithm id
    pub const fn openpgp_id(self) -> u8 {
        match self {
            SymmetricAlgorithm::Aes128 => 7,
            SymmetricAlgorithm::Aes192 => 8,
            SymmetricAlgorithm::Aes256 => 9,
        }
    }

    /// Key length in octets; equals the derived KEK length
    pub const fn key_len(self) -> usize {
        match self {
            SymmetricAlgorithm::Aes128 => 16,
            SymmetricAlgorithm::Aes192 => 24,
            SymmetricAlgorithm::Aes256 => 32,
        }
    }

    fn from_openpgp_id(id: u8) -> Result<Self> {
        match id {
            7 => Ok(SymmetricAlgorithm::Aes128),
            8 => Ok(SymmetricAlgorithm::Aes192),
            9 => Ok(SymmetricAlgorithm::Aes256),
            _ => Err(Error::BadPublicKey {
                reason: "KEK cipher algorithm outside the allowed set",
            }),
        }
    }
}

/// Default hash/cipher pairings, sorted by ascending field strength.
/// 528 is 521 rounded up to the octet boundary for NIST P-521.
const DEFAULT_KEK_TABLE: &[(u16, HashAlgorithm, SymmetricAlgorithm)] = &[
    (256, HashAlgorithm::Sha256, SymmetricAlgorithm::Aes128),
    (384, HashAlgorithm::Sha384, SymmetricAlgorithm::Aes256),
    (528, HashAlgorithm::Sha512, SymmetricAlgorithm::Aes256),
];

/// The hash/cipher pairing bound into a recipient's ECDH key.
///
/// Serializes as the four octets `03 01 hash cipher`; the encoding is
/// hashed into the KDF parameter string, so it must survive a decode/
/// encode round trip byte for byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KekParams {
    hash: HashAlgorithm,
    cipher: SymmetricAlgorithm,
}

impl KekParams {
    pub fn new(hash: HashAlgorithm, cipher: SymmetricAlgorithm) -> Self {
        Self { hash, cipher }
    }

    /// Select the default pairing for a curve of `qbits` field strength.
    ///
    /// Walks the table from the front and picks the first row at least
    /// as strong as the curve; anything beyond the table gets the last
    /// row. Interoperability is the only criterion, so the defaults
    /// bind each curve to an at-least-as-strong symmetric pairing.
    pub fn for_field_strength(qbits: u16) -> Self {
        let mut row = DEFAULT_KEK_TABLE[DEFAULT_KEK_TABLE.len() - 1];
        for &candidate in DEFAULT_KEK_TABLE {
            if candidate.0 >= qbits {
                row = candidate;
                break;
            }
        }
        let (_, hash, cipher) = row;
        Self { hash, cipher }
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn cipher(&self) -> SymmetricAlgorithm {
        self.cipher
    }

    /// Canonical four-octet encoding: count, version, hash id, cipher id
    pub fn encode(&self) -> [u8; KEK_PARAMS_LEN] {
        [
            (KEK_PARAMS_LEN - 1) as u8,
            VERSION_KDF_AESWRAP,
            self.hash.openpgp_id(),
            self.cipher.openpgp_id(),
        ]
    }

    /// Decode a KEK parameter blob, rejecting anything that is not
    /// exactly `03 01 hash cipher` with both ids in the allowed sets
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        validate::public_key(
            bytes.len() == KEK_PARAMS_LEN,
            "KEK parameter blob is not 4 octets",
        )?;
        validate::public_key(
            bytes[0] == (KEK_PARAMS_LEN - 1) as u8,
            "KEK parameter count octet is not 3",
        )?;
        validate::public_key(
            bytes[1] == VERSION_KDF_AESWRAP,
            "KEK parameter version is not KDF+AESWRAP",
        )?;
        Ok(Self {
            hash: HashAlgorithm::from_openpgp_id(bytes[2])?,
            cipher: SymmetricAlgorithm::from_openpgp_id(bytes[3])?,
        })
    }
}
