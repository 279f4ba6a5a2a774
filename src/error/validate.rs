//! Validation utilities for wrap and unwrap parameters

use super::{Error, Result};

/// Validate a property of the recipient's public key material
pub fn public_key(condition: bool, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::BadPublicKey { reason });
    }
    Ok(())
}

/// Validate a self-described MPI or length-prefixed field
pub fn mpi(condition: bool, context: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::BadMpi { context });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_condition_is_ok() {
        assert!(public_key(true, "unused").is_ok());
        assert!(mpi(true, "unused").is_ok());
    }

    #[test]
    fn failing_condition_maps_to_error_kind() {
        assert_eq!(
            public_key(false, "point too short"),
            Err(Error::BadPublicKey {
                reason: "point too short"
            })
        );
        assert_eq!(
            mpi(false, "size octet"),
            Err(Error::BadMpi {
                context: "size octet"
            })
        );
    }
}
