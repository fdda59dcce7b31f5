use ed448_goldilocks_plus::{CompressedDecaf, DecafPoint, Scalar, ScalarBytes, WideScalarBytes};
use lazy_static::lazy_static;
use rand_core::{CryptoRng, RngCore};
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};
use zeroize::Zeroizing;

use crate::{
    group::{ElementOps, Group, ScalarOps},
    Error,
};

/// Number of bytes in a canonical scalar or element encoding, and in a single
/// block read from the randomness source.
const BLOCK_SIZE: usize = 56;

/// Domain separator mixed into the derivation of every long-term secret
/// scalar, in all schemes. Part of the interoperability contract; changing it
/// changes every derived key.
const SECRET_SCALAR_DOMAIN: &[u8] = b"cramershoup_secret";

/// Canonical little-endian encoding of the prime order of the group,
/// `q = 2^446 - 13818066809895115352007386748515426880336692474882178609894547503885`.
const ORDER_BYTES: [u8; BLOCK_SIZE] = [
    0xf3, 0x44, 0x58, 0xab, 0x92, 0xc2, 0x78, 0x23, 0x55, 0x8f, 0xc5, 0x8d, 0x72, 0xc2, 0x6c,
    0x21, 0x90, 0x36, 0xd6, 0xae, 0x49, 0xdb, 0x4e, 0xc4, 0xe9, 0x23, 0xca, 0x7c, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x3f,
];

lazy_static! {
    /// Second generator of the group. Derived once via hash-to-group so that
    /// its discrete logarithm with respect to the base point is unknown.
    static ref SECOND_GENERATOR: DecafPoint = {
        let mut xof = Shake256::default();
        xof.update(b"dre448_second_generator");
        let mut uniform = [0_u8; 112];
        xof.finalize_xof().read(&mut uniform);
        DecafPoint::from_uniform_bytes(&uniform)
    };
}

/// Prime-order group of Ed448-Goldilocks in the decaf448 encoding.
///
/// Elements and scalars both have canonical 56-byte encodings; every
/// decodable element lies in the prime-order group, so there is no cofactor
/// to account for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ed448Goldilocks {}

fn read_block<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Zeroizing<[u8; BLOCK_SIZE]>, Error> {
    let mut block = Zeroizing::new([0_u8; BLOCK_SIZE]);
    rng.try_fill_bytes(&mut block[..])
        .map_err(|_| Error::EntropyExhausted)?;
    Ok(block)
}

pub(crate) fn scalar_from_block(block: &[u8; BLOCK_SIZE]) -> Scalar {
    let mut wide = WideScalarBytes::default();
    wide[..BLOCK_SIZE].copy_from_slice(block);
    Scalar::from_bytes_mod_order_wide(&wide)
}

impl ScalarOps for Ed448Goldilocks {
    type Scalar = Scalar;

    const SCALAR_SIZE: usize = BLOCK_SIZE;

    fn generate_scalar<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Scalar, Error> {
        let block = read_block(rng)?;
        Ok(scalar_from_block(&block))
    }

    fn generate_long_term_scalar<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Scalar, Error> {
        let block = read_block(rng)?;
        let mut xof = Shake256::default();
        xof.update(&block[..]);
        xof.update(SECRET_SCALAR_DOMAIN);
        let mut out = Zeroizing::new([0_u8; BLOCK_SIZE]);
        xof.finalize_xof().read(&mut out[..]);
        Ok(scalar_from_block(&out))
    }

    fn hash_to_scalar(input: &[u8]) -> Scalar {
        let mut xof = Shake256::default();
        xof.update(input);
        let mut out = [0_u8; BLOCK_SIZE];
        xof.finalize_xof().read(&mut out);
        scalar_from_block(&out)
    }

    fn serialize_scalar(scalar: &Scalar, output: &mut [u8]) {
        // A reduced scalar fits in 446 bits, so the last byte of the 57-byte
        // RFC 8032 form is always zero.
        output.copy_from_slice(&scalar.to_bytes_rfc_8032()[..BLOCK_SIZE]);
    }

    fn deserialize_scalar(bytes: &[u8]) -> Option<Scalar> {
        if bytes.len() != BLOCK_SIZE {
            return None;
        }
        let mut repr = ScalarBytes::default();
        repr[..BLOCK_SIZE].copy_from_slice(bytes);
        Scalar::from_canonical_bytes(&repr).into()
    }
}

impl ElementOps for Ed448Goldilocks {
    type Element = DecafPoint;

    const ELEMENT_SIZE: usize = BLOCK_SIZE;

    fn identity() -> DecafPoint {
        DecafPoint::IDENTITY
    }

    fn is_identity(element: &DecafPoint) -> bool {
        *element == DecafPoint::IDENTITY
    }

    fn generator() -> DecafPoint {
        DecafPoint::GENERATOR
    }

    fn second_generator() -> DecafPoint {
        *SECOND_GENERATOR
    }

    fn order_bytes() -> &'static [u8] {
        &ORDER_BYTES
    }

    fn is_valid_element(_element: &DecafPoint) -> bool {
        // decaf448 elements exist only as decodings of canonical encodings;
        // membership in the prime-order group is guaranteed by construction.
        true
    }

    fn serialize_element(element: &DecafPoint, output: &mut [u8]) {
        output.copy_from_slice(&element.compress().0);
    }

    fn deserialize_element(bytes: &[u8]) -> Option<DecafPoint> {
        let bytes: [u8; BLOCK_SIZE] = bytes.try_into().ok()?;
        CompressedDecaf(bytes).decompress().into()
    }
}

impl Group for Ed448Goldilocks {}
