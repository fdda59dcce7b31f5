//! Cramer–Shoup encryption over a prime-order group with two generators.
//!
//! The scheme is IND-CCA2 secure under the decisional Diffie–Hellman
//! assumption: decryption recomputes the ciphertext's check component from
//! the hash of its prefix and rejects anything that was not produced by an
//! honest encryption. The second generator `G2` is a fixed group constant
//! whose discrete logarithm with respect to the base point is unknown (see
//! [`ElementOps::second_generator()`](crate::group::ElementOps)).

use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;

use core::fmt;

use crate::{
    group::{Ed448Goldilocks, Group},
    transcript::{self, Input},
    Error,
};

/// Two-byte type tag identifying a serialized Cramer–Shoup public key.
const PUBLIC_KEY_TAG: [u8; 2] = [0x00, 0x10];

/// Secret key: five long-term scalars `(x1, x2, y1, y2, z)`.
pub struct SecretKey<G: Group = Ed448Goldilocks> {
    pub(crate) x1: G::Scalar,
    pub(crate) x2: G::Scalar,
    pub(crate) y1: G::Scalar,
    pub(crate) y2: G::Scalar,
    pub(crate) z: G::Scalar,
}

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
        SecretKey {
            x1: self.x1,
            x2: self.x2,
            y1: self.y1,
            y2: self.y2,
            z: self.z,
        }
    }
}

impl<G: Group> SecretKey<G> {
    /// Generates a random secret key. The five scalars are derived from five
    /// consecutive blocks of RNG output, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropyExhausted`] if any draw comes up short; no
    /// partial key is returned.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, Error> {
        Ok(SecretKey {
            x1: G::generate_long_term_scalar(rng)?,
            x2: G::generate_long_term_scalar(rng)?,
            y1: G::generate_long_term_scalar(rng)?,
            y2: G::generate_long_term_scalar(rng)?,
            z: G::generate_long_term_scalar(rng)?,
        })
    }

    /// Decrypts the provided ciphertext, returning the canonical encoding of
    /// the recovered plaintext point.
    ///
    /// The recovered point is not checked against the identity; callers that
    /// need to reject it must do so themselves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCiphertext`] if the ciphertext fails the
    /// consistency check.
    pub fn decrypt(&self, ciphertext: &Ciphertext<G>) -> Result<Vec<u8>, Error> {
        let alpha = ciphertext.challenge_scalar();
        if !self.holds_for(
            ciphertext.u1,
            ciphertext.u2,
            ciphertext.v,
            &alpha,
        ) {
            return Err(Error::InvalidCiphertext);
        }

        let plaintext = ciphertext.e - ciphertext.u1 * &self.z;
        let mut bytes = vec![0_u8; G::ELEMENT_SIZE];
        G::serialize_element(&plaintext, &mut bytes);
        Ok(bytes)
    }

    /// Checks `[x1]U1 + [x2]U2 + α([y1]U1 + [y2]U2) = V` for this key.
    pub(crate) fn holds_for(
        &self,
        u1: G::Element,
        u2: G::Element,
        v: G::Element,
        alpha: &G::Scalar,
    ) -> bool {
        let fixed = G::double_mul(u1, &self.x1, u2, &self.x2);
        let hashed = G::double_mul(u1, &self.y1, u2, &self.y2);
        let check = fixed + hashed * alpha;
        bool::from(check.ct_eq(&v))
    }
}

/// Public key: the triple `(C, D, H)` with `C = [x1]G1 + [x2]G2`,
/// `D = [y1]G1 + [y2]G2` and `H = [z]G1`.
pub struct PublicKey<G: Group = Ed448Goldilocks> {
    pub(crate) c: G::Element,
    pub(crate) d: G::Element,
    pub(crate) h: G::Element,
}

impl<G: Group> Clone for PublicKey<G> {
    fn clone(&self) -> Self {
        PublicKey {
            c: self.c,
            d: self.d,
            h: self.h,
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
        bool::from(
            self.c.ct_eq(&other.c) & self.d.ct_eq(&other.d) & self.h.ct_eq(&other.h),
        )
    }
}

impl<G: Group> From<&SecretKey<G>> for PublicKey<G> {
    fn from(secret_key: &SecretKey<G>) -> Self {
        PublicKey {
            c: G::double_mul(
                G::generator(),
                &secret_key.x1,
                G::second_generator(),
                &secret_key.x2,
            ),
            d: G::double_mul(
                G::generator(),
                &secret_key.y1,
                G::second_generator(),
                &secret_key.y2,
            ),
            h: G::mul_generator(&secret_key.z),
        }
    }
}

impl<G: Group> PublicKey<G> {
    /// Encrypts a message under this key. `message` should be the canonical
    /// encoding of a group element; if it does not decode, encryption
    /// proceeds with the identity element. Callers requiring rejection of
    /// invalid encodings must perform their own check.
    ///
    /// The encryption randomness `r` is an ephemeral scalar (raw RNG output
    /// reduced modulo the group order), unlike the long-term derivation used
    /// for secret keys.
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
        let r = G::generate_scalar(rng)?;
        Ok(self.encrypt_element(plaintext, &r))
    }

    /// Encrypts an already-decoded plaintext element with the provided
    /// randomness. Shared with the dual-receiver scheme, which decodes the
    /// message once and reuses the element for both halves.
    pub(crate) fn encrypt_element(&self, plaintext: G::Element, r: &G::Scalar) -> Ciphertext<G> {
        let u1 = G::mul_generator(r);
        let u2 = G::mul_second_generator(r);
        let e = self.h * r + plaintext;

        let alpha = transcript::hash_to_scalar::<G>(&[
            Input::Element(&u1),
            Input::Element(&u2),
            Input::Element(&e),
        ]);

        // v = [r]C + α([r]D); the composition order is fixed by the scheme's
        // cross-implementation test vectors.
        let v = self.c * r + (self.d * r) * &alpha;

        Ciphertext { u1, u2, e, v }
    }

    /// Serializes this key into its 170-byte wire form: a two-byte type tag
    /// `0x00 0x10` followed by the canonical encodings of `C`, `D` and `H`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 + 3 * G::ELEMENT_SIZE);
        bytes.extend_from_slice(&PUBLIC_KEY_TAG);
        for element in [&self.c, &self.d, &self.h] {
            let start = bytes.len();
            bytes.resize(start + G::ELEMENT_SIZE, 0);
            G::serialize_element(element, &mut bytes[start..]);
        }
        bytes
    }

    /// Deserializes a key from its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the buffer is too short, carries
    /// the wrong type tag, or any component fails to decode canonically or
    /// decodes to the identity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < 2 + G::ELEMENT_SIZE {
            return Err(Error::InvalidEncoding);
        }
        if bytes[..2] != PUBLIC_KEY_TAG {
            return Err(Error::InvalidEncoding);
        }

        let mut cursor = 2;
        let c = Self::extract_element(bytes, &mut cursor)?;
        let d = Self::extract_element(bytes, &mut cursor)?;
        let h = Self::extract_element(bytes, &mut cursor)?;
        Ok(PublicKey { c, d, h })
    }

    fn extract_element(bytes: &[u8], cursor: &mut usize) -> Result<G::Element, Error> {
        let chunk = bytes
            .get(*cursor..*cursor + G::ELEMENT_SIZE)
            .ok_or(Error::InvalidEncoding)?;
        let element = G::deserialize_element(chunk).ok_or(Error::InvalidEncoding)?;
        if G::is_identity(&element) {
            return Err(Error::InvalidEncoding);
        }
        *cursor += G::ELEMENT_SIZE;
        Ok(element)
    }

    /// Checks that all key components are valid non-identity group members.
    pub(crate) fn is_valid(&self) -> bool {
        [&self.c, &self.d, &self.h]
            .into_iter()
            .all(|element| G::is_valid_element(element) && !G::is_identity(element))
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

/// Ciphertext: the four points `(U1, U2, E, V)`.
#[derive(Clone, Copy)]
pub struct Ciphertext<G: Group = Ed448Goldilocks> {
    pub(crate) u1: G::Element,
    pub(crate) u2: G::Element,
    pub(crate) e: G::Element,
    pub(crate) v: G::Element,
}

impl<G: Group> fmt::Debug for Ciphertext<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Ciphertext")
            .field("u1", &self.u1)
            .field("u2", &self.u2)
            .field("e", &self.e)
            .field("v", &self.v)
            .finish()
    }
}

impl<G: Group> Ciphertext<G> {
    /// Recomputes `α = H(U1 ∥ U2 ∥ E)`.
    pub(crate) fn challenge_scalar(&self) -> G::Scalar {
        transcript::hash_to_scalar::<G>(&[
            Input::Element(&self.u1),
            Input::Element(&self.u2),
            Input::Element(&self.e),
        ])
    }
}
