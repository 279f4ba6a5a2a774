//! Secret data types with guaranteed zeroization

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Variable-size secret buffer that guarantees zeroization on drop.
///
/// Allocation is fallible: a refused reservation surfaces as
/// [`Error::OutOfMemory`] instead of aborting, so callers can unwind
/// with their other secrets intact.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretVec {
    data: Vec<u8>,
}

impl SecretVec {
    /// Create a zero-filled secret buffer of the given length
    pub fn zeroed(len: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
        data.resize(len, 0);
        Ok(Self { data })
    }

    /// Create a secret buffer holding a copy of `slice`
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let mut buf = Self::zeroed(slice.len())?;
        buf.data.copy_from_slice(slice);
        Ok(buf)
    }

    /// Get the length of the buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to the inner data
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the inner data
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for SecretVec {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for SecretVec {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for SecretVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretVec({})([REDACTED])", self.data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_has_requested_length() {
        let buf = SecretVec::zeroed(48).unwrap();
        assert_eq!(buf.len(), 48);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn from_slice_copies_contents() {
        let buf = SecretVec::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
        assert!(!buf.is_empty());
    }

    #[test]
    fn debug_output_is_redacted() {
        let buf = SecretVec::from_slice(&[0xAA; 16]).unwrap();
        let rendered = format!("{:?}", buf);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("AA"));
    }
}
