// File: src/wrap.rs
//! Key-encryption key derivation and RFC 3394 AES Key Wrap

use core::fmt;

use aes::{Aes128, Aes192, Aes256};
use zeroize::Zeroize;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::{validate, Error, Result};
use crate::kdf;
use crate::params::{HashAlgorithm, SymmetricAlgorithm};
use crate::secret::SharedSecret;
use crate::secure::SecretVec;

/// Integrity block added by the wrap, in octets
const WRAP_OVERHEAD: usize = 8;

/// A caller-padded session key ready for wrapping.
///
/// Padding belongs to the packet layer and is never inspected here;
/// only the length laws of the wrap are enforced.
pub struct PaddedSessionKey {
    key: SecretVec,
}

impl PaddedSessionKey {
    /// Accept a padded session key, enforcing the wrap input laws: a
    /// multiple of 8 octets, at least 16, and small enough for the
    /// one-octet length framing of the wrapped field.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::mpi(
            bytes.len() % 8 == 0,
            "padded session key is not a multiple of 8 octets",
        )?;
        validate::mpi(bytes.len() >= 16, "padded session key shorter than 16 octets")?;
        validate::mpi(
            bytes.len() + WRAP_OVERHEAD <= u8::MAX as usize,
            "padded session key too long for one-octet framing",
        )?;
        Ok(Self {
            key: SecretVec::from_slice(bytes)?,
        })
    }

    pub(crate) fn from_secret(key: SecretVec) -> Self {
        Self { key }
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.key.as_slice()
    }
}

impl fmt::Debug for PaddedSessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddedSessionKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// The wrapped field of an ECDH encrypted-session-key packet: one
/// length octet followed by the RFC 3394 wrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedSessionKey {
    octets: Vec<u8>,
}

impl WrappedSessionKey {
    /// Parse the wrapped field, validating its self-described length:
    /// the leading octet must equal the remaining octet count, which in
    /// turn must be a multiple of 8 and at least 24.
    pub fn from_octets(octets: &[u8]) -> Result<Self> {
        validate::mpi(!octets.is_empty(), "wrapped field is empty")?;
        let described = octets[0] as usize;
        validate::mpi(
            described == octets.len() - 1,
            "wrapped field length octet disagrees with its payload",
        )?;
        validate::mpi(
            described % 8 == 0,
            "wrapped payload is not a multiple of 8 octets",
        )?;
        validate::mpi(
            described >= 16 + WRAP_OVERHEAD,
            "wrapped payload shorter than the minimum wrap",
        )?;
        Ok(Self {
            octets: octets.to_vec(),
        })
    }

    fn from_wrap(wrap: &[u8]) -> Self {
        let mut octets = Vec::with_capacity(1 + wrap.len());
        octets.push(wrap.len() as u8);
        octets.extend_from_slice(wrap);
        Self { octets }
    }

    /// The full field: length octet followed by the wrap
    pub fn octets(&self) -> &[u8] {
        &self.octets
    }

    /// Length of the wrap itself; always the padded key length plus 8
    pub fn wrap_len(&self) -> usize {
        self.octets.len() - 1
    }

    /// Bit length of the field in its full-octet wire form
    pub fn bits(&self) -> u16 {
        (8 * self.octets.len()) as u16
    }
}

/// A derived key-encryption key bound to its cipher choice.
///
/// Straight-line lifecycle: derived from a consumed [`SharedSecret`],
/// used for exactly one wrap or unwrap, wiped on drop.
pub(crate) struct Kek {
    cipher: SymmetricAlgorithm,
    key: SecretVec,
}

impl Kek {
    /// Derive the KEK: run the one-block KDF over the shared secret and
    /// parameter string, then keep the first `key_len` digest octets.
    /// The shared secret is consumed; the digest tail never leaves its
    /// zeroizing buffer.
    pub fn derive(
        hash: HashAlgorithm,
        cipher: SymmetricAlgorithm,
        secret: SharedSecret,
        kdf_params: &[u8],
    ) -> Result<Self> {
        let digest = kdf::concat_kdf(hash, &secret, kdf_params)?;
        let key_len = cipher.key_len();
        if digest.len() < key_len {
            return Err(Error::Crypto {
                context: "KDF digest shorter than the cipher key",
            });
        }
        let mut key = SecretVec::zeroed(key_len)?;
        key.as_mut_slice()
            .copy_from_slice(&digest.as_slice()[..key_len]);
        Ok(Self { cipher, key })
    }

    #[cfg(test)]
    pub fn from_raw(cipher: SymmetricAlgorithm, key: &[u8]) -> Result<Self> {
        Ok(Self {
            cipher,
            key: SecretVec::from_slice(key)?,
        })
    }

    /// Wrap a padded session key; the output carries its own length
    /// octet and is 8 octets longer than the input
    pub fn wrap(&self, session_key: &PaddedSessionKey) -> Result<WrappedSessionKey> {
        let mut out = Vec::new();
        out.try_reserve_exact(session_key.len() + WRAP_OVERHEAD)
            .map_err(|_| Error::OutOfMemory)?;
        out.resize(session_key.len() + WRAP_OVERHEAD, 0);
        self.keywrap(session_key.as_bytes(), &mut out, true)?;
        Ok(WrappedSessionKey::from_wrap(&out))
    }

    /// Unwrap a wrapped field back to the still-padded session key.
    /// Integrity failure reports [`Error::BadKey`] without revealing
    /// which stage failed.
    pub fn unwrap(&self, wrapped: &WrappedSessionKey) -> Result<PaddedSessionKey> {
        let body = &wrapped.octets()[1..];
        let mut out = SecretVec::zeroed(body.len() - WRAP_OVERHEAD)?;
        self.keywrap(body, out.as_mut_slice(), false)?;
        Ok(PaddedSessionKey::from_secret(out))
    }

    fn keywrap(&self, input: &[u8], out: &mut [u8], encrypt: bool) -> Result<()> {
        match self.cipher {
            SymmetricAlgorithm::Aes128 => {
                let mut raw = [0u8; 16];
                raw.copy_from_slice(self.key.as_slice());
                let kek = aes_kw::Kek::<Aes128>::from(raw);
                raw.zeroize();
                run_keywrap(&kek, input, out, encrypt)
            }
            SymmetricAlgorithm::Aes192 => {
                let mut raw = [0u8; 24];
                raw.copy_from_slice(self.key.as_slice());
                let kek = aes_kw::Kek::<Aes192>::from(raw);
                raw.zeroize();
                run_keywrap(&kek, input, out, encrypt)
            }
            SymmetricAlgorithm::Aes256 => {
                let mut raw = [0u8; 32];
                raw.copy_from_slice(self.key.as_slice());
                let kek = aes_kw::Kek::<Aes256>::from(raw);
                raw.zeroize();
                run_keywrap(&kek, input, out, encrypt)
            }
        }
    }
}

impl fmt::Debug for Kek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kek")
            .field("cipher", &self.cipher)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

fn run_keywrap<C>(kek: &aes_kw::Kek<C>, input: &[u8], out: &mut [u8], encrypt: bool) -> Result<()>
where
    C: aes::cipher::KeyInit
        + aes::cipher::BlockCipher
        + aes::cipher::BlockSizeUser<BlockSize = aes::cipher::consts::U16>
        + aes::cipher::BlockEncrypt
        + aes::cipher::BlockDecrypt,
{
    if encrypt {
        kek.wrap(input, out).map_err(|_| Error::Crypto {
            context: "AES key wrap",
        })
    } else {
        // Wrong KEK, tampering, and malformed wraps are deliberately
        // indistinguishable here
        kek.unwrap(input, out).map_err(|_| Error::BadKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rfc3394_kek() -> Kek {
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        Kek::from_raw(SymmetricAlgorithm::Aes128, &key).unwrap()
    }

    #[test]
    fn aes128_wrap_matches_rfc3394_vector() {
        // RFC 3394 §4.1: 128-bit key data under a 128-bit KEK
        let data = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        let session_key = PaddedSessionKey::from_bytes(&data).unwrap();
        let wrapped = rfc3394_kek().wrap(&session_key).unwrap();
        assert_eq!(
            hex::encode(&wrapped.octets()[1..]),
            "1fa68b0a8112b447aef34bd8fb5a7b829d3e862371d2cfe5"
        );
        assert_eq!(wrapped.octets()[0], 24);
    }

    #[test]
    fn aes128_unwrap_matches_rfc3394_vector() {
        let mut field = vec![24u8];
        field.extend_from_slice(
            &hex::decode("1fa68b0a8112b447aef34bd8fb5a7b829d3e862371d2cfe5").unwrap(),
        );
        let wrapped = WrappedSessionKey::from_octets(&field).unwrap();
        let unwrapped = rfc3394_kek().unwrap(&wrapped).unwrap();
        assert_eq!(
            hex::encode(unwrapped.as_bytes()),
            "00112233445566778899aabbccddeeff"
        );
    }

    #[test]
    fn wrap_adds_eight_octets_and_frames_them() {
        for len in [16usize, 24, 32, 40] {
            let session_key = PaddedSessionKey::from_bytes(&vec![0x42; len]).unwrap();
            let kek = Kek::from_raw(SymmetricAlgorithm::Aes256, &[0x10; 32]).unwrap();
            let wrapped = kek.wrap(&session_key).unwrap();
            assert_eq!(wrapped.wrap_len(), len + 8);
            assert_eq!(wrapped.octets()[0] as usize, len + 8);
            assert_eq!(wrapped.bits() as usize, 8 * (len + 9));
        }
    }

    #[test]
    fn unwrap_round_trip_for_every_cipher() {
        let keys: [(&[u8], SymmetricAlgorithm); 3] = [
            (&[0xA1; 16], SymmetricAlgorithm::Aes128),
            (&[0xB2; 24], SymmetricAlgorithm::Aes192),
            (&[0xC3; 32], SymmetricAlgorithm::Aes256),
        ];
        let session_key = PaddedSessionKey::from_bytes(&[0x77; 24]).unwrap();
        for (raw, cipher) in keys {
            let kek = Kek::from_raw(cipher, raw).unwrap();
            let wrapped = kek.wrap(&session_key).unwrap();
            let recovered = kek.unwrap(&wrapped).unwrap();
            assert_eq!(
                recovered.as_bytes(),
                session_key.as_bytes(),
                "round trip mismatch for {:?}",
                cipher
            );
        }
    }

    #[test]
    fn tampering_with_any_octet_is_detected() {
        let kek = Kek::from_raw(SymmetricAlgorithm::Aes128, &[0x55; 16]).unwrap();
        let session_key = PaddedSessionKey::from_bytes(&[0x24; 24]).unwrap();
        let wrapped = kek.wrap(&session_key).unwrap();

        for index in 1..wrapped.octets().len() {
            let mut mangled = wrapped.octets().to_vec();
            mangled[index] ^= 0x01;
            let mangled = WrappedSessionKey::from_octets(&mangled).unwrap();
            assert_eq!(
                kek.unwrap(&mangled).unwrap_err(),
                Error::BadKey,
                "flip at octet {} went undetected",
                index
            );
        }
    }

    #[test]
    fn wrong_kek_is_bad_key() {
        let kek = Kek::from_raw(SymmetricAlgorithm::Aes128, &[0x55; 16]).unwrap();
        let other = Kek::from_raw(SymmetricAlgorithm::Aes128, &[0x56; 16]).unwrap();
        let session_key = PaddedSessionKey::from_bytes(&[0x24; 24]).unwrap();
        let wrapped = kek.wrap(&session_key).unwrap();
        assert_eq!(other.unwrap(&wrapped).unwrap_err(), Error::BadKey);
    }

    #[test]
    fn session_key_length_laws() {
        assert!(PaddedSessionKey::from_bytes(&[0u8; 24]).is_ok());
        // Not a multiple of 8
        assert!(PaddedSessionKey::from_bytes(&[0u8; 21]).is_err());
        // Below the wrap minimum
        assert!(PaddedSessionKey::from_bytes(&[0u8; 8]).is_err());
        // Too long for the one-octet framing
        assert!(PaddedSessionKey::from_bytes(&[0u8; 248]).is_err());
    }

    #[test]
    fn wrapped_field_self_description_law() {
        // Length octet says 0x10 but 0x12 octets of payload follow
        let mut field = vec![0x10u8];
        field.extend_from_slice(&[0u8; 0x12]);
        assert_eq!(
            WrappedSessionKey::from_octets(&field).unwrap_err(),
            Error::BadMpi {
                context: "wrapped field length octet disagrees with its payload",
            }
        );

        assert!(WrappedSessionKey::from_octets(&[]).is_err());

        // Consistent but not a multiple of 8
        let mut field = vec![25u8];
        field.extend_from_slice(&[0u8; 25]);
        assert!(WrappedSessionKey::from_octets(&field).is_err());

        // Consistent but below the minimum wrap length
        let mut field = vec![16u8];
        field.extend_from_slice(&[0u8; 16]);
        assert!(WrappedSessionKey::from_octets(&field).is_err());
    }

    #[test]
    fn kek_debug_output_is_redacted() {
        let kek = Kek::from_raw(SymmetricAlgorithm::Aes128, &[0x55; 16]).unwrap();
        let rendered = format!("{:?}", kek);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("55"));
    }
}
