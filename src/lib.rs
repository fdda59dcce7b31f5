//! Public-key encryption primitives over the prime-order group of
//! Ed448-Goldilocks.
//!
//! # ⚠ Warnings
//!
//! While the logic in this crate relies on standard cryptographic assumptions
//! (complexity of discrete log and decisional Diffie–Hellman problems in the
//! Ed448-Goldilocks prime-order group), it has not been independently audited
//! for correctness or absence of side-channel attack vectors. **Use at your
//! own risk.**
//!
//! # Overview
//!
//! Three related schemes share the same group, key derivation and encoding
//! conventions:
//!
//! - [`elgamal`] provides textbook ElGamal. IND-CPA only; ciphertexts are
//!   malleable and decryption performs no validation.
//! - [`cramer_shoup`] provides the Cramer–Shoup cryptosystem, IND-CCA2 under
//!   DDH, instantiated with a second fixed generator. Also defines the only
//!   wire format in this crate: a 170-byte tagged public-key encoding.
//! - [`dre`] provides dual-receiver encryption: a single ciphertext
//!   decryptable by either of two independent Cramer–Shoup keypairs, carrying
//!   a Fiat–Shamir proof that both decryption paths yield the same plaintext.
//!
//! Plaintexts are canonical 56-byte encodings of group elements; mapping
//! application data onto group elements (and any padding or hybrid
//! construction) is the caller's responsibility.
//!
//! The [`group`] module exposes the capability set the schemes are generic
//! over, with [`Ed448Goldilocks`](group::Ed448Goldilocks) as the provided
//! implementation. Randomness is drawn from a caller-supplied
//! [`rand_core`] RNG in 56-byte blocks; a short read fails the operation
//! with [`Error::EntropyExhausted`] instead of producing a weak key.
//!
//! # Examples
//!
//! ```
//! use dre448::{cramer_shoup::Keypair, dre::{DualCiphertext, ReceiverIndex}};
//! use dre448::group::{ElementOps, Group, ScalarOps, Ed448Goldilocks as G};
//! # use rand::thread_rng;
//! # fn main() -> Result<(), dre448::Error> {
//! let mut rng = thread_rng();
//! let alice = Keypair::<G>::generate(&mut rng)?;
//! let bob = Keypair::<G>::generate(&mut rng)?;
//!
//! // Messages are canonical encodings of group elements.
//! let scalar = G::generate_scalar(&mut rng)?;
//! let mut message = vec![0_u8; G::ELEMENT_SIZE];
//! G::serialize_element(&G::mul_generator(&scalar), &mut message);
//!
//! let encrypted = DualCiphertext::new(&message, alice.public(), bob.public(), &mut rng)?;
//! let decrypted = encrypted.decrypt(
//!     alice.public(),
//!     bob.public(),
//!     bob.secret(),
//!     ReceiverIndex::Second,
//! )?;
//! assert_eq!(decrypted, message);
//! # Ok(())
//! # }
//! ```

// Linter settings.
#![warn(missing_debug_implementations, missing_docs, bare_trait_objects)]
#![warn(clippy::all)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

pub mod cramer_shoup;
pub mod dre;
pub mod elgamal;
mod error;
pub mod group;
mod transcript;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::error::Error;
