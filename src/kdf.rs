//! KDF parameter assembly and the one-block concatenation KDF
//!
//! The key-encryption key is derived with the single-block
//! concatenation KDF of NIST SP 800-56A §5.8.1: one digest over a
//! big-endian counter fixed at 1, the shared-secret octets, and a
//! deterministic parameter string. The string's layout is fixed down
//! to the last octet; one wrong length or field order and conforming
//! implementations cannot read the result.

use byteorder::{BigEndian, ByteOrder};
use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroize;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::{validate, Result};
use crate::mpi::Mpi;
use crate::params::{HashAlgorithm, KekParams, ECDH_ALGORITHM_ID, KEK_PARAMS_LEN};
use crate::secret::SharedSecret;
use crate::secure::SecretVec;

/// Upper bound on the assembled parameter string. A conforming curve
/// OID is at most 16 octets, so real inputs stay well under this.
pub const KDF_PARAMS_MAX: usize = 256;

/// Fixed sender field: 20 ASCII octets, four trailing spaces
const ANONYMOUS_SENDER: &[u8; 20] = b"Anonymous Sender    ";

/// Assemble the KDF parameter string:
///
/// ```text
/// len(OID) || OID
/// 0x12                       (ECDH public-key algorithm id)
/// len(kek params) || 03 01 hash cipher
/// "Anonymous Sender    "
/// recipient fingerprint      (copied verbatim)
/// ```
///
/// The result is re-derivable byte for byte from its inputs.
pub fn build_kdf_params(
    curve_oid: &Mpi,
    kek_params: &KekParams,
    fingerprint: &[u8],
) -> Result<Vec<u8>> {
    let total = 1 + curve_oid.byte_len() + 1 + 1 + KEK_PARAMS_LEN + ANONYMOUS_SENDER.len()
        + fingerprint.len();
    validate::public_key(total <= KDF_PARAMS_MAX, "KDF parameter string overflow")?;

    let mut out = Vec::with_capacity(total);
    curve_oid.write_size_body(&mut out)?;
    out.push(ECDH_ALGORITHM_ID);
    out.push(KEK_PARAMS_LEN as u8);
    out.extend_from_slice(&kek_params.encode());
    out.extend_from_slice(ANONYMOUS_SENDER);
    out.extend_from_slice(fingerprint);
    Ok(out)
}

/// Run the one-block concatenation KDF and return the full digest.
///
/// The caller truncates to the cipher key length; truncation is always
/// sound because the weakest allowed digest (SHA-256, 32 octets) covers
/// the largest allowed key (AES-256, 32 octets).
pub(crate) fn concat_kdf(
    hash: HashAlgorithm,
    secret: &SharedSecret,
    kdf_params: &[u8],
) -> Result<SecretVec> {
    match hash {
        HashAlgorithm::Sha256 => one_block::<Sha256>(secret.as_bytes(), kdf_params),
        HashAlgorithm::Sha384 => one_block::<Sha384>(secret.as_bytes(), kdf_params),
        HashAlgorithm::Sha512 => one_block::<Sha512>(secret.as_bytes(), kdf_params),
    }
}

fn one_block<D: Digest>(secret: &[u8], kdf_params: &[u8]) -> Result<SecretVec> {
    let mut counter = [0u8; 4];
    BigEndian::write_u32(&mut counter, 1);

    let mut hasher = D::new();
    hasher.update(counter);
    hasher.update(secret);
    hasher.update(kdf_params);
    let mut digest = hasher.finalize();

    let out = SecretVec::from_slice(digest.as_slice());
    digest.as_mut_slice().zeroize();
    out
}
