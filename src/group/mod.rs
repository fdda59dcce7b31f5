//! Group framework used by the encryption schemes.
//!
//! The schemes in this crate are generic over a [`Group`] capability set:
//! two independent generators, the prime group order, element and scalar
//! arithmetic with canonical encodings, randomness-to-scalar derivation and
//! a hash-to-scalar function. [`Ed448Goldilocks`] is the single provided
//! implementation.

use rand_core::{CryptoRng, RngCore};
use subtle::{ConditionallySelectable, ConstantTimeEq};

use core::{fmt, ops};

use crate::Error;

mod ed448;
pub use self::ed448::Ed448Goldilocks;

/// Helper trait for [`Group`] that describes operations on group scalars.
pub trait ScalarOps {
    /// Scalar type. Arithmetic operations must be constant-time.
    type Scalar: Copy
        + PartialEq
        + ops::Neg<Output = Self::Scalar>
        + ops::Add<Output = Self::Scalar>
        + ops::Sub<Output = Self::Scalar>
        + ops::Mul<Output = Self::Scalar>
        + ConditionallySelectable
        + ConstantTimeEq
        + fmt::Debug;

    /// Byte size of a serialized [`Self::Scalar`].
    const SCALAR_SIZE: usize;

    /// Generates an ephemeral scalar: one block of [`Self::SCALAR_SIZE`] bytes
    /// read from `rng` and reduced modulo the group order. Used as one-shot
    /// encryption randomness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropyExhausted`] if `rng` cannot produce a full block.
    fn generate_scalar<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::Scalar, Error>;

    /// Generates a long-term scalar: one block of RNG output passed through an
    /// extractor (XOF with a fixed domain-separation string) before reduction.
    /// Used for all secret keys, so that moderately non-uniform RNG output
    /// still yields a uniform key. Not interchangeable with
    /// [`Self::generate_scalar()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropyExhausted`] if `rng` cannot produce a full block.
    fn generate_long_term_scalar<R: CryptoRng + RngCore>(rng: &mut R)
        -> Result<Self::Scalar, Error>;

    /// Hashes an arbitrary byte string to a scalar.
    fn hash_to_scalar(input: &[u8]) -> Self::Scalar;

    /// Serializes the scalar into its canonical form. `output` must have
    /// length [`Self::SCALAR_SIZE`].
    fn serialize_scalar(scalar: &Self::Scalar, output: &mut [u8]);

    /// Deserializes a scalar from its canonical form. Returns `None` if the
    /// buffer has the wrong length or encodes a non-canonical value.
    fn deserialize_scalar(bytes: &[u8]) -> Option<Self::Scalar>;
}

/// Helper trait for [`Group`] that describes operations on group elements.
pub trait ElementOps: ScalarOps {
    /// Element of the group. Arithmetic operations must be constant-time.
    type Element: Copy
        + ops::Add<Output = Self::Element>
        + ops::Sub<Output = Self::Element>
        + for<'a> ops::Mul<&'a Self::Scalar, Output = Self::Element>
        + ConditionallySelectable
        + ConstantTimeEq
        + fmt::Debug;

    /// Byte size of a serialized [`Self::Element`].
    const ELEMENT_SIZE: usize;

    /// Returns the identity element (the point at infinity).
    fn identity() -> Self::Element;

    /// Checks if the specified element is the identity.
    fn is_identity(element: &Self::Element) -> bool;

    /// Returns the agreed-upon generator of the group, `G1`.
    fn generator() -> Self::Element;

    /// Returns the second fixed generator, `G2`. Its discrete logarithm with
    /// respect to [`Self::generator()`] must not be known to anyone.
    fn second_generator() -> Self::Element;

    /// Returns the canonical [`Self::SCALAR_SIZE`]-byte encoding of the prime
    /// group order `q`. Exposed as raw bytes since `q` itself is not a valid
    /// reduced scalar.
    fn order_bytes() -> &'static [u8];

    /// Checks that a held element is a valid group member (on the curve and
    /// in the prime-order subgroup). For encodings this is already enforced
    /// by [`Self::deserialize_element()`].
    fn is_valid_element(element: &Self::Element) -> bool;

    /// Serializes an element into its canonical form. `output` must have
    /// length [`Self::ELEMENT_SIZE`].
    fn serialize_element(element: &Self::Element, output: &mut [u8]);

    /// Deserializes an element from its canonical form. Returns `None` if the
    /// buffer has the wrong length or is not a canonical encoding of a group
    /// member.
    fn deserialize_element(bytes: &[u8]) -> Option<Self::Element>;
}

/// Prime-order group suitable for ElGamal, Cramer–Shoup and dual-receiver
/// encryption.
pub trait Group: Copy + ScalarOps + ElementOps + 'static {
    /// Multiplies the provided scalar by [`ElementOps::generator()`].
    /// Implementations may use precomputed tables for the base point.
    fn mul_generator(k: &Self::Scalar) -> Self::Element {
        Self::generator() * k
    }

    /// Multiplies the provided scalar by [`ElementOps::second_generator()`].
    fn mul_second_generator(k: &Self::Scalar) -> Self::Element {
        Self::second_generator() * k
    }

    /// Calculates `p1 * s1 + p2 * s2` in a single operation. Decryption
    /// consistency checks and proof verification are built on this shape, so
    /// backends with a combined double-scalar multiplication should override
    /// the default.
    fn double_mul(
        p1: Self::Element,
        s1: &Self::Scalar,
        p2: Self::Element,
        s2: &Self::Scalar,
    ) -> Self::Element {
        p1 * s1 + p2 * s2
    }
}
