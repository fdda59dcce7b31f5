//! Canonical serialization of hash inputs for Fiat–Shamir challenges.
//!
//! All challenge and check scalars in this crate are derived from the plain
//! concatenation of canonical encodings: elements and scalars contribute
//! their fixed-size form, raw byte strings are copied verbatim, and no
//! length prefixes or labels are inserted. The argument order of every call
//! is part of the interoperability contract.

use crate::group::Group;

/// A single input to a transcript hash.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Input<'a, G: Group> {
    /// A group element, contributing its canonical encoding.
    Element(&'a G::Element),
    /// A scalar, contributing its canonical encoding.
    Scalar(&'a G::Scalar),
    /// A raw byte string, copied verbatim.
    Bytes(&'a [u8]),
}

/// Concatenates the canonical encodings of `items` in order.
///
/// # Panics
///
/// Panics if fewer than two items are passed; a single-input hash is always
/// a bug in the calling code.
pub(crate) fn concat<G: Group>(items: &[Input<'_, G>]) -> Vec<u8> {
    assert!(
        items.len() >= 2,
        "programmer error: missing transcript arguments"
    );

    let mut bytes = Vec::with_capacity(items.len() * G::ELEMENT_SIZE);
    for item in items {
        match item {
            Input::Element(element) => {
                let start = bytes.len();
                bytes.resize(start + G::ELEMENT_SIZE, 0);
                G::serialize_element(element, &mut bytes[start..]);
            }
            Input::Scalar(scalar) => {
                let start = bytes.len();
                bytes.resize(start + G::SCALAR_SIZE, 0);
                G::serialize_scalar(scalar, &mut bytes[start..]);
            }
            Input::Bytes(slice) => bytes.extend_from_slice(slice),
        }
    }
    bytes
}

/// Hashes the canonical concatenation of `items` to a scalar.
pub(crate) fn hash_to_scalar<G: Group>(items: &[Input<'_, G>]) -> G::Scalar {
    G::hash_to_scalar(&concat::<G>(items))
}
