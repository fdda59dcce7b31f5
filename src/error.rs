//! Error type shared by all schemes in this crate.

use core::fmt;

/// Errors that can occur in key generation, encryption and decryption.
///
/// Decryption failures deliberately do not reveal which internal check
/// failed: Cramer–Shoup consistency, proof verification and component checks
/// all surface as [`Error::InvalidCiphertext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The randomness source did not yield a full 56-byte block.
    EntropyExhausted,
    /// A supplied public key contains an invalid or identity component.
    InvalidPublicKey,
    /// The ciphertext (or its attached proof) failed verification.
    InvalidCiphertext,
    /// A serialized public key could not be decoded: wrong length, wrong
    /// type tag, or a component that is not a canonical group element.
    InvalidEncoding,
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::EntropyExhausted => "cannot source enough entropy",
            Self::InvalidPublicKey => "not a valid public key",
            Self::InvalidCiphertext => "cannot decrypt the message",
            Self::InvalidEncoding => "malformed public key encoding",
        })
    }
}

impl std::error::Error for Error {}
