//! Basic tests: round trips and wire-format interop across the public API.

use rand::thread_rng;
use rand_core::{CryptoRng, RngCore};

use dre448::{
    cramer_shoup,
    dre::{DualCiphertext, ReceiverIndex},
    elgamal,
    group::Group,
    Error,
};

use crate::FixedRng;

fn random_message<G: Group, R: CryptoRng + RngCore>(rng: &mut R) -> Vec<u8> {
    let scalar = G::generate_scalar(rng).unwrap();
    let element = G::mul_generator(&scalar);
    let mut bytes = vec![0_u8; G::ELEMENT_SIZE];
    G::serialize_element(&element, &mut bytes);
    bytes
}

fn test_elgamal_roundtrip<G: Group>() {
    let mut rng = thread_rng();
    let keypair = elgamal::Keypair::<G>::generate(&mut rng).unwrap();
    for _ in 0..5 {
        let message = random_message::<G, _>(&mut rng);
        let ciphertext = keypair.public().encrypt(&message, &mut rng).unwrap();
        assert_eq!(keypair.secret().decrypt(&ciphertext), message);
    }
}

fn test_cramer_shoup_roundtrip<G: Group>() {
    let mut rng = thread_rng();
    let keypair = cramer_shoup::Keypair::<G>::generate(&mut rng).unwrap();
    for _ in 0..5 {
        let message = random_message::<G, _>(&mut rng);
        let ciphertext = keypair.public().encrypt(&message, &mut rng).unwrap();
        assert_eq!(keypair.secret().decrypt(&ciphertext).unwrap(), message);
    }
}

fn test_cramer_shoup_rejects_foreign_ciphertext<G: Group>() {
    let mut rng = thread_rng();
    let keypair = cramer_shoup::Keypair::<G>::generate(&mut rng).unwrap();
    let other = cramer_shoup::Keypair::<G>::generate(&mut rng).unwrap();
    let message = random_message::<G, _>(&mut rng);
    let ciphertext = keypair.public().encrypt(&message, &mut rng).unwrap();
    assert_eq!(
        other.secret().decrypt(&ciphertext).unwrap_err(),
        Error::InvalidCiphertext
    );
}

fn test_public_key_wire_roundtrip<G: Group>() {
    let mut rng = thread_rng();
    for _ in 0..5 {
        let keypair = cramer_shoup::Keypair::<G>::generate(&mut rng).unwrap();
        let bytes = keypair.public().to_bytes();
        assert_eq!(bytes.len(), 2 + 3 * G::ELEMENT_SIZE);
        assert_eq!(&bytes[..2], &[0x00, 0x10]);
        let restored = cramer_shoup::PublicKey::<G>::from_bytes(&bytes).unwrap();
        assert_eq!(&restored, keypair.public());
    }
}

fn test_dre_roundtrip_via_serialized_keys<G: Group>() {
    let mut rng = thread_rng();
    let alice = cramer_shoup::Keypair::<G>::generate(&mut rng).unwrap();
    let bob = cramer_shoup::Keypair::<G>::generate(&mut rng).unwrap();
    let message = random_message::<G, _>(&mut rng);

    // Ship both public keys through the wire format, as a sender would
    // receive them.
    let alice_pk = cramer_shoup::PublicKey::<G>::from_bytes(&alice.public().to_bytes()).unwrap();
    let bob_pk = cramer_shoup::PublicKey::<G>::from_bytes(&bob.public().to_bytes()).unwrap();

    let encrypted = DualCiphertext::new(&message, &alice_pk, &bob_pk, &mut rng).unwrap();
    let for_alice = encrypted
        .decrypt(&alice_pk, &bob_pk, alice.secret(), ReceiverIndex::First)
        .unwrap();
    let for_bob = encrypted
        .decrypt(&alice_pk, &bob_pk, bob.secret(), ReceiverIndex::Second)
        .unwrap();
    assert_eq!(for_alice, message);
    assert_eq!(for_bob, message);
}

fn test_schemes_share_key_derivation<G: Group>() {
    // Both schemes derive long-term scalars the same way, block by block.
    // A Cramer–Shoup key generated from a fixed five-block stream therefore
    // has H = [z]G1 equal to the ElGamal public key generated from the fifth
    // block alone. Compared via wire encodings only.
    let stream: Vec<u8> = (1..=5_u8).flat_map(|block| [block * 31; 56]).collect();
    let cs_keypair = cramer_shoup::Keypair::<G>::generate(&mut FixedRng::new(&stream)).unwrap();
    let eg_keypair =
        elgamal::Keypair::<G>::generate(&mut FixedRng::new(&stream[4 * 56..])).unwrap();

    let cs_bytes = cs_keypair.public().to_bytes();
    let h_bytes = &cs_bytes[2 + 2 * G::ELEMENT_SIZE..];
    assert_eq!(h_bytes, eg_keypair.public().to_bytes());
}

mod ed448_goldilocks {
    use dre448::group::Ed448Goldilocks;

    use super::*;

    #[test]
    fn elgamal_roundtrip() {
        test_elgamal_roundtrip::<Ed448Goldilocks>();
    }

    #[test]
    fn cramer_shoup_roundtrip() {
        test_cramer_shoup_roundtrip::<Ed448Goldilocks>();
    }

    #[test]
    fn cramer_shoup_rejects_foreign_ciphertext() {
        test_cramer_shoup_rejects_foreign_ciphertext::<Ed448Goldilocks>();
    }

    #[test]
    fn public_key_wire_roundtrip() {
        test_public_key_wire_roundtrip::<Ed448Goldilocks>();
    }

    #[test]
    fn dre_roundtrip_via_serialized_keys() {
        test_dre_roundtrip_via_serialized_keys::<Ed448Goldilocks>();
    }

    #[test]
    fn schemes_share_key_derivation() {
        test_schemes_share_key_derivation::<Ed448Goldilocks>();
    }
}
