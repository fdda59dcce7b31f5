//! Dual-receiver encryption: one ciphertext, two independent decryption
//! paths, with a proof that both paths yield the same plaintext.
//!
//! A [`DualCiphertext`] carries one Cramer–Shoup ciphertext half per
//! receiver plus an [`EqualityProof`], a Fiat–Shamir proof of knowledge of
//! the two encryption scalars `(k1, k2)` showing that both halves are
//! well-formed and encrypt the same plaintext element. Either receiver can
//! decrypt with its own secret key; verification of the proof and of the
//! selected half's consistency check happens before any plaintext is
//! released.
//!
//! # Construction
//!
//! The interactive protocol is a standard sigma protocol for the statement
//! "there exist `k1`, `k2` such that `U1i = [ki]G1`, `U2i = [ki]G2`,
//! `Vi = [ki](Ci + αi Di)` for both receivers, and
//! `E1 - [k1]H1 = E2 - [k2]H2`":
//!
//! 1. **Commitment:** the prover draws random `t1`, `t2` and sends the
//!    corresponding powers `T1i`, `T2i`, `T3i` for both receivers along with
//!    `T4 = [t1]H1 - [t2]H2`.
//! 2. **Challenge:** the verifier sends a random scalar `l`.
//! 3. **Response:** the prover sends `ni = ti - l * ki`.
//!
//! The verifier reconstructs each commitment from the responses (e.g.
//! `T1i = [ni]G1 + [l]U1i`) and accepts iff they match. The Fiat–Shamir
//! transform derives `l` by hashing the group description, both public keys,
//! both ciphertext halves and all commitments, in a fixed canonical order.

use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;

use core::fmt;

use crate::{
    cramer_shoup::{Ciphertext, PublicKey, SecretKey},
    group::{Ed448Goldilocks, Group},
    transcript::{self, Input},
    Error,
};

/// Selects which receiver's secret key is used for decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverIndex {
    /// The holder of the first public key passed to encryption.
    First,
    /// The holder of the second public key passed to encryption.
    Second,
}

/// Zero-knowledge proof that the two halves of a [`DualCiphertext`] are
/// well-formed and encrypt the same plaintext.
///
/// Serialized as three scalars: the challenge `l` and the responses
/// `(n1, n2)`. Proof generation is constant-time; verification is not.
pub struct EqualityProof<G: Group = Ed448Goldilocks> {
    challenge: G::Scalar,
    responses: [G::Scalar; 2],
}

impl<G: Group> fmt::Debug for EqualityProof<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("EqualityProof")
            .field("challenge", &self.challenge)
            .field("responses", &self.responses)
            .finish()
    }
}

impl<G: Group> Clone for EqualityProof<G> {
    fn clone(&self) -> Self {
        EqualityProof {
            challenge: self.challenge,
            responses: self.responses,
        }
    }
}

impl<G: Group> EqualityProof<G> {
    fn new<R: CryptoRng + RngCore>(
        halves: (&Ciphertext<G>, &Ciphertext<G>),
        receivers: (&PublicKey<G>, &PublicKey<G>),
        alphas: (&G::Scalar, &G::Scalar),
        secrets: (&G::Scalar, &G::Scalar),
        rng: &mut R,
    ) -> Result<Self, Error> {
        let t1 = G::generate_scalar(rng)?;
        let t2 = G::generate_scalar(rng)?;

        let commitments = [
            G::mul_generator(&t1),
            G::mul_second_generator(&t1),
            (receivers.0.c + receivers.0.d * alphas.0) * &t1,
            G::mul_generator(&t2),
            G::mul_second_generator(&t2),
            (receivers.1.c + receivers.1.d * alphas.1) * &t2,
            receivers.0.h * &t1 - receivers.1.h * &t2,
        ];
        let challenge = Self::derive_challenge(halves, receivers, alphas, &commitments);

        // ni = ti - l * ki (mod q)
        Ok(EqualityProof {
            challenge,
            responses: [t1 - challenge * *secrets.0, t2 - challenge * *secrets.1],
        })
    }

    fn verify(
        &self,
        halves: (&Ciphertext<G>, &Ciphertext<G>),
        receivers: (&PublicKey<G>, &PublicKey<G>),
        alphas: (&G::Scalar, &G::Scalar),
    ) -> bool {
        let [n1, n2] = &self.responses;
        let l = &self.challenge;

        let commitments = [
            G::double_mul(G::generator(), n1, halves.0.u1, l),
            G::double_mul(G::second_generator(), n1, halves.0.u2, l),
            G::double_mul(receivers.0.c + receivers.0.d * alphas.0, n1, halves.0.v, l),
            G::double_mul(G::generator(), n2, halves.1.u1, l),
            G::double_mul(G::second_generator(), n2, halves.1.u2, l),
            G::double_mul(receivers.1.c + receivers.1.d * alphas.1, n2, halves.1.v, l),
            (receivers.0.h * n1 - receivers.1.h * n2) + (halves.0.e - halves.1.e) * l,
        ];
        let expected = Self::derive_challenge(halves, receivers, alphas, &commitments);
        bool::from(expected.ct_eq(&self.challenge))
    }

    /// Hashes the four canonical transcript segments to the challenge
    /// scalar. Segment contents and ordering must match between prover and
    /// verifier byte for byte.
    fn derive_challenge(
        halves: (&Ciphertext<G>, &Ciphertext<G>),
        receivers: (&PublicKey<G>, &PublicKey<G>),
        alphas: (&G::Scalar, &G::Scalar),
        commitments: &[G::Element; 7],
    ) -> G::Scalar {
        let generator_bytes = transcript::concat::<G>(&[
            Input::Element(&G::generator()),
            Input::Element(&G::second_generator()),
            Input::Bytes(G::order_bytes()),
        ]);
        let key_bytes = transcript::concat::<G>(&[
            Input::Element(&receivers.0.c),
            Input::Element(&receivers.0.d),
            Input::Element(&receivers.0.h),
            Input::Element(&receivers.1.c),
            Input::Element(&receivers.1.d),
            Input::Element(&receivers.1.h),
        ]);
        let cipher_bytes = transcript::concat::<G>(&[
            Input::Element(&halves.0.u1),
            Input::Element(&halves.0.u2),
            Input::Element(&halves.0.e),
            Input::Element(&halves.0.v),
            Input::Scalar(alphas.0),
            Input::Element(&halves.1.u1),
            Input::Element(&halves.1.u2),
            Input::Element(&halves.1.e),
            Input::Element(&halves.1.v),
            Input::Scalar(alphas.1),
        ]);
        let commitment_bytes = transcript::concat::<G>(&[
            Input::Element(&commitments[0]),
            Input::Element(&commitments[1]),
            Input::Element(&commitments[2]),
            Input::Element(&commitments[3]),
            Input::Element(&commitments[4]),
            Input::Element(&commitments[5]),
            Input::Element(&commitments[6]),
        ]);

        transcript::hash_to_scalar::<G>(&[
            Input::Bytes(&generator_bytes),
            Input::Bytes(&key_bytes),
            Input::Bytes(&cipher_bytes),
            Input::Bytes(&commitment_bytes),
        ])
    }
}

/// Ciphertext decryptable by either of two Cramer–Shoup keypairs, with an
/// attached [`EqualityProof`].
pub struct DualCiphertext<G: Group = Ed448Goldilocks> {
    pub(crate) first: Ciphertext<G>,
    pub(crate) second: Ciphertext<G>,
    pub(crate) proof: EqualityProof<G>,
}

impl<G: Group> fmt::Debug for DualCiphertext<G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DualCiphertext")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("proof", &self.proof)
            .finish()
    }
}

impl<G: Group> Clone for DualCiphertext<G> {
    fn clone(&self) -> Self {
        DualCiphertext {
            first: self.first,
            second: self.second,
            proof: self.proof.clone(),
        }
    }
}

impl<G: Group> DualCiphertext<G> {
    /// Encrypts a message to two receivers. `message` should be the
    /// canonical encoding of a group element; if it does not decode,
    /// encryption proceeds with the identity element (callers requiring
    /// rejection of invalid encodings must perform their own check). The
    /// message is decoded once and the resulting element is fed to both
    /// halves, so the equality claimed by the proof holds by construction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] if either receiver key contains
    /// an invalid or identity component, and [`Error::EntropyExhausted`] on
    /// a short RNG read.
    pub fn new<R: CryptoRng + RngCore>(
        message: &[u8],
        receiver1: &PublicKey<G>,
        receiver2: &PublicKey<G>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        validate_keys(receiver1, receiver2)?;
        let plaintext = G::deserialize_element(message).unwrap_or_else(G::identity);

        let k1 = G::generate_scalar(rng)?;
        let k2 = G::generate_scalar(rng)?;
        let first = receiver1.encrypt_element(plaintext, &k1);
        let second = receiver2.encrypt_element(plaintext, &k2);

        let alpha1 = first.challenge_scalar();
        let alpha2 = second.challenge_scalar();
        let proof = EqualityProof::new(
            (&first, &second),
            (receiver1, receiver2),
            (&alpha1, &alpha2),
            (&k1, &k2),
            rng,
        )?;

        Ok(DualCiphertext {
            first,
            second,
            proof,
        })
    }

    /// Decrypts this ciphertext with one receiver's secret key.
    ///
    /// Both public keys must be passed in the same order as at encryption
    /// time; `index` selects which half `secret_key` corresponds to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] if either receiver key contains
    /// an invalid or identity component. All verification failures (the
    /// equality proof as well as the selected half's consistency check)
    /// surface as [`Error::InvalidCiphertext`] without distinguishing which
    /// check failed.
    pub fn decrypt(
        &self,
        receiver1: &PublicKey<G>,
        receiver2: &PublicKey<G>,
        secret_key: &SecretKey<G>,
        index: ReceiverIndex,
    ) -> Result<Vec<u8>, Error> {
        validate_keys(receiver1, receiver2)?;

        let alpha1 = self.first.challenge_scalar();
        let alpha2 = self.second.challenge_scalar();
        if !self.proof.verify(
            (&self.first, &self.second),
            (receiver1, receiver2),
            (&alpha1, &alpha2),
        ) {
            return Err(Error::InvalidCiphertext);
        }

        let (half, alpha) = match index {
            ReceiverIndex::First => (&self.first, &alpha1),
            ReceiverIndex::Second => (&self.second, &alpha2),
        };
        if !secret_key.holds_for(half.u1, half.u2, half.v, alpha) {
            return Err(Error::InvalidCiphertext);
        }

        let plaintext = half.e - half.u1 * &secret_key.z;
        let mut bytes = vec![0_u8; G::ELEMENT_SIZE];
        G::serialize_element(&plaintext, &mut bytes);
        Ok(bytes)
    }
}

fn validate_keys<G: Group>(
    receiver1: &PublicKey<G>,
    receiver2: &PublicKey<G>,
) -> Result<(), Error> {
    if receiver1.is_valid() && receiver2.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidPublicKey)
    }
}
