//! ElGamal encryption over a prime-order group.
//!
//! This is the textbook scheme: it is only IND-CPA secure and ciphertexts
//! are malleable. Decryption performs no validation whatsoever, so exposing
//! it as an oracle to an adaptive attacker breaks the cryptosystem (see
//! Bleichenbacher, CRYPTO '98). Use [`crate::cramer_shoup`] where
//! chosen-ciphertext security is needed; this module shares its key
//! derivation and encoding conventions.

use rand_core::{CryptoRng, RngCore};

use core::fmt;

use crate::{
    group::{Ed448Goldilocks, Group},
    Error,
};

/// Secret key: a thin wrapper around a long-term [`Group`] scalar.
pub struct SecretKey<G: Group = Ed448Goldilocks>(pub(crate) G::Scalar);

impl<G: Group> fmt::Debug for SecretKey<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SecretKey")
            .field("public", &PublicKey::from(self))
            .finish()
    }
}

impl<G: Group> Clone for SecretKey<G> {
    fn clone(&self) -> Self {
        SecretKey(self.0)
    }
}

impl<G: Group> SecretKey<G> {
    /// Generates a random secret key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropyExhausted`] if `rng` cannot produce a full
    /// block of randomness.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, Error> {
        G::generate_long_term_scalar(rng).map(SecretKey)
    }

    /// Decrypts the provided ciphertext, returning the canonical encoding of
    /// the recovered plaintext point.
    ///
    /// No validation is performed; any well-formed pair of group elements
    /// "decrypts" to something.
    pub fn decrypt(&self, ciphertext: &Ciphertext<G>) -> Vec<u8> {
        let plaintext = ciphertext.blinded_element - ciphertext.random_element * &self.0;
        let mut bytes = vec![0_u8; G::ELEMENT_SIZE];
        G::serialize_element(&plaintext, &mut bytes);
        bytes
    }
}

/// Public key: the group element `Y = [x]G1`.
pub struct PublicKey<G: Group = Ed448Goldilocks> {
    pub(crate) element: G::Element,
}

impl<G: Group> Clone for PublicKey<G> {
    fn clone(&self) -> Self {
        PublicKey {
            element: self.element,
        }
    }
}

impl<G: Group> fmt::Debug for PublicKey<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("PublicKey")
            .field(&hex::encode(self.to_bytes()))
            .finish()
    }
}

impl<G: Group> PartialEq for PublicKey<G> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(subtle::ConstantTimeEq::ct_eq(&self.element, &other.element))
    }
}

impl<G: Group> PublicKey<G> {
    /// Deserializes a public key from its canonical encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if `bytes` does not decode to a
    /// group element, or decodes to the identity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let element = G::deserialize_element(bytes).ok_or(Error::InvalidEncoding)?;
        if G::is_identity(&element) {
            return Err(Error::InvalidEncoding);
        }
        Ok(PublicKey { element })
    }

    /// Returns the canonical encoding of this key.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0_u8; G::ELEMENT_SIZE];
        G::serialize_element(&self.element, &mut bytes);
        bytes
    }

    /// Returns the group element equivalent to this key.
    pub fn as_element(&self) -> G::Element {
        self.element
    }

    /// Encrypts a message under this key. `message` should be the canonical
    /// encoding of a group element; if it does not decode, encryption
    /// proceeds with the identity element. Callers requiring rejection of
    /// invalid encodings must perform their own check.
    ///
    /// The encryption randomness is derived the same way as a long-term
    /// secret scalar. A raw ephemeral scalar would do for one-shot
    /// randomness; the extractor step is kept so that ciphertexts produced
    /// from a fixed RNG stream stay reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropyExhausted`] on a short RNG read.
    pub fn encrypt<R: CryptoRng + RngCore>(
        &self,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Ciphertext<G>, Error> {
        let plaintext = G::deserialize_element(message).unwrap_or_else(G::identity);
        let k = G::generate_long_term_scalar(rng)?;

        let random_element = G::mul_generator(&k);
        let shared = self.element * &k;
        Ok(Ciphertext {
            random_element,
            blinded_element: shared + plaintext,
        })
    }
}

impl<G: Group> From<&SecretKey<G>> for PublicKey<G> {
    fn from(secret_key: &SecretKey<G>) -> Self {
        PublicKey {
            element: G::mul_generator(&secret_key.0),
        }
    }
}

/// Keypair consisting of a [`SecretKey`] and the matching [`PublicKey`].
pub struct Keypair<G: Group = Ed448Goldilocks> {
    secret: SecretKey<G>,
    public: PublicKey<G>,
}

impl<G: Group> fmt::Debug for Keypair<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Keypair")
            .field("public", &self.public)
            .finish()
    }
}

impl<G: Group> Clone for Keypair<G> {
    fn clone(&self) -> Self {
        Keypair {
            secret: self.secret.clone(),
            public: self.public.clone(),
        }
    }
}

impl<G: Group> Keypair<G> {
    /// Generates a random keypair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropyExhausted`] on a short RNG read; no partial
    /// key is returned.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, Error> {
        let secret = SecretKey::generate(rng)?;
        Ok(Keypair {
            public: PublicKey::from(&secret),
            secret,
        })
    }

    /// Returns the public part of this keypair.
    pub fn public(&self) -> &PublicKey<G> {
        &self.public
    }

    /// Returns the secret part of this keypair.
    pub fn secret(&self) -> &SecretKey<G> {
        &self.secret
    }

    /// Returns public and secret keys comprising this keypair.
    pub fn into_tuple(self) -> (PublicKey<G>, SecretKey<G>) {
        (self.public, self.secret)
    }
}

impl<G: Group> From<SecretKey<G>> for Keypair<G> {
    fn from(secret: SecretKey<G>) -> Self {
        Keypair {
            public: PublicKey::from(&secret),
            secret,
        }
    }
}

/// Ciphertext: the pair `(C1, C2) = ([k]G1, [k]Y + M)`.
#[derive(Clone, Copy)]
pub struct Ciphertext<G: Group = Ed448Goldilocks> {
    pub(crate) random_element: G::Element,
    pub(crate) blinded_element: G::Element,
}

impl<G: Group> fmt::Debug for Ciphertext<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Ciphertext")
            .field("random_element", &self.random_element)
            .field("blinded_element", &self.blinded_element)
            .finish()
    }
}
