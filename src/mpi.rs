//! Multi-precision integers in unsigned big-endian form
//!
//! The packet layer traffics in MPIs: a two-octet bit count followed
//! by the value's big-endian octets with no leading zero. Inside the
//! KDF parameter string the same values appear in "size-body" form
//! instead, a single length octet followed by the value.

use byteorder::{BigEndian, ByteOrder};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::{validate, Error, Result};

/// An unsigned big-endian multi-precision integer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mpi {
    value: Vec<u8>,
}

impl Mpi {
    /// Import a value from big-endian octets, normalizing away any
    /// leading zero octets
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self {
            value: bytes[start..].to_vec(),
        }
    }

    /// The value's octets, most significant first; empty for zero
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Natural byte length of the value
    pub fn byte_len(&self) -> usize {
        self.value.len()
    }

    /// Exact bit length of the value
    pub fn bits(&self) -> u16 {
        match self.value.first() {
            Some(&msb) => (8 * self.value.len()) as u16 - msb.leading_zeros() as u16,
            None => 0,
        }
    }

    /// Parse one MPI from the front of `buf`; returns the value and
    /// the number of octets consumed
    pub fn from_wire(buf: &[u8]) -> Result<(Self, usize)> {
        validate::mpi(buf.len() >= 2, "truncated MPI header")?;
        let bits = BigEndian::read_u16(buf) as usize;
        let nbytes = (bits + 7) / 8;
        validate::mpi(buf.len() >= 2 + nbytes, "MPI shorter than its bit count")?;
        let value = Self::from_be_bytes(&buf[2..2 + nbytes]);
        validate::mpi(
            value.bits() as usize == bits,
            "MPI bit count does not match its leading octet",
        )?;
        Ok((value, 2 + nbytes))
    }

    /// Serialize as a wire MPI: two-octet bit count, then the value
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.value.len());
        let mut header = [0u8; 2];
        BigEndian::write_u16(&mut header, self.bits());
        out.extend_from_slice(&header);
        out.extend_from_slice(&self.value);
        out
    }

    /// Append the size-body form (one length octet, then the value) to
    /// `out`. Values longer than 255 octets cannot be framed this way.
    pub(crate) fn write_size_body(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.value.len() > u8::MAX as usize {
            return Err(Error::BadPublicKey {
                reason: "value too long for size-body framing",
            });
        }
        out.push(self.value.len() as u8);
        out.extend_from_slice(&self.value);
        Ok(())
    }
}
