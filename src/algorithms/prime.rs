//! Generation of random primes with a bounded number of candidates.

use alloc::vec::Vec;
use num_bigint::{prime::probably_prime, BigUint};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Miller-Rabin rounds applied to each candidate.
const PRIMALITY_ROUNDS: usize = 20;

/// Number of candidates drawn for a `bit_size`-bit prime before giving up.
///
/// About one odd `k`-bit integer in `0.35 k` is prime, so missing every one of
/// these draws has probability below `e^-180` for a working random source.
pub(crate) fn max_prime_candidates(bit_size: usize) -> usize {
    64 * bit_size + 1024
}

/// Draw a random prime of exactly `bit_size` bits with its top two bits set.
///
/// Returns `None` once [`max_prime_candidates`] candidates have been tried,
/// which only happens when `rng` is not producing random output.
pub(crate) fn gen_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
) -> Option<BigUint> {
    assert!(bit_size >= 2, "prime size must be at least 2-bit");

    let mut b = bit_size % 8;
    if b == 0 {
        b = 8;
    }

    let bytes_len = (bit_size + 7) / 8;
    let mut bytes: Vec<u8> = vec![0u8; bytes_len];

    for _ in 0..max_prime_candidates(bit_size) {
        rng.fill_bytes(&mut bytes);
        // Clear the bits above bit_size in the first byte.
        bytes[0] &= ((1u32 << b) - 1) as u8;

        // Set the top two bits so that a product of two such primes is never
        // one bit short.
        if b >= 2 {
            bytes[0] |= 3u8 << (b - 2);
        } else {
            bytes[0] |= 1;
            if bytes_len > 1 {
                bytes[1] |= 0x80;
            }
        }

        // Odd.
        bytes[bytes_len - 1] |= 1;

        let p = BigUint::from_bytes_be(&bytes);
        if probably_prime(&p, PRIMALITY_ROUNDS) {
            bytes.zeroize();
            return Some(p);
        }
    }

    bytes.zeroize();
    None
}
