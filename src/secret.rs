//! Shared-secret extraction from an ECDH point

use core::fmt;

use crate::error::{validate, Result};
use crate::mpi::Mpi;
use crate::secure::SecretVec;

/// The X coordinate of an ECDH shared point, normalized to the curve's
/// field length.
///
/// Exclusively owned and short-lived: created here, consumed by KEK
/// derivation, wiped on drop. The shared-point MPI itself stays under
/// the caller's control.
pub struct SharedSecret {
    x: SecretVec,
}

impl SharedSecret {
    /// Extract the X coordinate from a shared point.
    ///
    /// The point arrives as `04 || X || Y` for Weierstrass curves or as
    /// a single coordinate behind one framing octet (`0x40 || X`); in
    /// both encodings exactly one leading octet is skipped and
    /// `field_len` octets are taken. The point must be strictly longer
    /// than the field, otherwise the key material is malformed.
    pub fn extract_x(shared_point: &Mpi, field_len: usize) -> Result<Self> {
        let natural_len = shared_point.byte_len();
        validate::public_key(
            natural_len > field_len,
            "shared point shorter than the curve field",
        )?;
        let mut x = SecretVec::zeroed(field_len)?;
        x.as_mut_slice()
            .copy_from_slice(&shared_point.as_bytes()[1..1 + field_len]);
        Ok(Self { x })
    }

    /// Length in octets; always `ceil(qbits / 8)`
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.x.as_slice()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret")
            .field("x", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn extracts_x_from_uncompressed_point() {
        // 04 || X (4 octets) || Y (4 octets)
        let point = Mpi::from_be_bytes(&[
            0x04, 0xDE, 0xAD, 0xBE, 0xEF, 0x11, 0x22, 0x33, 0x44,
        ]);
        let secret = SharedSecret::extract_x(&point, 4).unwrap();
        assert_eq!(secret.as_bytes(), &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(secret.len(), 4);
    }

    #[test]
    fn interior_zero_octets_are_preserved() {
        let point = Mpi::from_be_bytes(&[0x04, 0x00, 0x00, 0x9C, 0x01, 0x02, 0x03]);
        let secret = SharedSecret::extract_x(&point, 3).unwrap();
        assert_eq!(secret.as_bytes(), &[0x00, 0x00, 0x9C]);
    }

    #[test]
    fn native_encoding_skips_one_framing_octet() {
        let mut encoded = vec![0x40];
        encoded.extend_from_slice(&[0x5A; 32]);
        let point = Mpi::from_be_bytes(&encoded);
        let secret = SharedSecret::extract_x(&point, 32).unwrap();
        assert_eq!(secret.as_bytes(), &[0x5A; 32]);
    }

    #[test]
    fn point_must_be_longer_than_field() {
        let point = Mpi::from_be_bytes(&[0x04, 0x01, 0x02, 0x03]);
        assert_eq!(
            SharedSecret::extract_x(&point, 4).unwrap_err(),
            Error::BadPublicKey {
                reason: "shared point shorter than the curve field",
            }
        );
    }

    #[test]
    fn debug_output_is_redacted() {
        let point = Mpi::from_be_bytes(&[0x04, 0xAB, 0xCD]);
        let secret = SharedSecret::extract_x(&point, 1).unwrap();
        assert!(format!("{:?}", secret).contains("REDACTED"));
    }
}
