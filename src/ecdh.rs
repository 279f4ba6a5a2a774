// File: src/ecdh.rs
//! The ECDH session-key wrapping pipeline
//!
//! Encryption turns an externally computed shared point into a wrapped
//! session key: extract the X coordinate, assemble the KDF parameter
//! string, derive the KEK, wrap. Decryption reverses only the wrap
//! step under the same derived KEK. Scalar multiplication, ephemeral
//! scalar generation, and packet framing all live with the callers.

use crate::error::{validate, Result};
use crate::kdf::build_kdf_params;
use crate::mpi::Mpi;
use crate::params::KekParams;
use crate::secret::SharedSecret;
use crate::wrap::{Kek, PaddedSessionKey, WrappedSessionKey};

/// Recipient ECDH key material: the ordered tuple of curve OID, public
/// point, and KEK parameter blob carried by the public key.
///
/// Construction validates the KEK parameter blob and the point framing
/// once, so the pipeline entry points only ever see coherent material.
#[derive(Clone, Debug)]
pub struct EcdhParams {
    curve_oid: Mpi,
    public_point: Mpi,
    kek_params: KekParams,
    field_len: usize,
}

impl EcdhParams {
    pub fn new(curve_oid: Mpi, public_point: Mpi, kek_params: &Mpi) -> Result<Self> {
        let kek_params = KekParams::decode(kek_params.as_bytes())?;
        let field_len = field_len_of(&public_point)?;
        Ok(Self {
            curve_oid,
            public_point,
            kek_params,
            field_len,
        })
    }

    pub fn curve_oid(&self) -> &Mpi {
        &self.curve_oid
    }

    pub fn public_point(&self) -> &Mpi {
        &self.public_point
    }

    pub fn kek_params(&self) -> KekParams {
        self.kek_params
    }

    /// Field length in octets, `ceil(qbits / 8)`, derived from the
    /// public point's encoding
    pub fn field_len(&self) -> usize {
        self.field_len
    }

    /// Curve strength in bits, rounded up to the octet boundary
    pub fn qbits(&self) -> u16 {
        (8 * self.field_len) as u16
    }
}

/// Derive the field length from the point framing: an uncompressed
/// point `04 || X || Y` carries two coordinates behind its framing
/// octet, a native encoding (`40 || X`) carries one.
fn field_len_of(public_point: &Mpi) -> Result<usize> {
    let len = public_point.byte_len();
    validate::public_key(len >= 2, "public point has no coordinate octets")?;
    match public_point.as_bytes()[0] {
        0x04 => {
            validate::public_key(
                len % 2 == 1,
                "uncompressed point has uneven coordinate octets",
            )?;
            Ok((len - 1) / 2)
        }
        _ => Ok(len - 1),
    }
}

/// Wrap a padded session key for a recipient.
///
/// `shared_point` is the ECDH product of the ephemeral scalar and the
/// recipient's public point; the caller pairs the returned field with
/// the ephemeral public point when building the packet.
pub fn encrypt_session_key(
    recipient: &EcdhParams,
    fingerprint: &[u8],
    shared_point: &Mpi,
    session_key: &PaddedSessionKey,
) -> Result<WrappedSessionKey> {
    derive_kek(recipient, fingerprint, shared_point)?.wrap(session_key)
}

/// Recover the still-padded session key from a wrapped field.
///
/// `shared_point` is the ECDH product of the recipient's secret scalar
/// and the ephemeral public point from the packet. Padding removal
/// stays with the caller.
pub fn decrypt_session_key(
    recipient: &EcdhParams,
    fingerprint: &[u8],
    shared_point: &Mpi,
    wrapped: &WrappedSessionKey,
) -> Result<PaddedSessionKey> {
    derive_kek(recipient, fingerprint, shared_point)?.unwrap(wrapped)
}

fn derive_kek(recipient: &EcdhParams, fingerprint: &[u8], shared_point: &Mpi) -> Result<Kek> {
    let params = recipient.kek_params();
    let secret = SharedSecret::extract_x(shared_point, recipient.field_len())?;
    let kdf_params = build_kdf_params(recipient.curve_oid(), &params, fingerprint)?;
    Kek::derive(params.hash(), params.cipher(), secret, &kdf_params)
}
