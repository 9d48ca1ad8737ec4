//! Generate prime components for the RSA Private Key

use alloc::vec::Vec;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::{
    algorithms::{
        prime::{gen_prime, max_prime_candidates},
        rsa::{compute_modulus, compute_private_exponent_euler_totient},
    },
    errors::{Error, Result},
    key::{MAX_GENERATION_ATTEMPTS, MIN_KEY_BITS},
};

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub primes: Vec<BigUint>,
}

/// Generates a two-prime RSA keypair of the given bit size and public
/// exponent, using the given random source.
///
/// The primes are drawn with their top two bits set, so the product of a
/// `⌊bit_size/2⌋`-bit prime and a `⌈bit_size/2⌉`-bit prime always has exactly
/// `bit_size` bits. A candidate pair is discarded when the primes collide or
/// when `exp` is not invertible modulo φ(n).
///
/// # Panics
///
/// Panics when no usable pair is found within [`MAX_GENERATION_ATTEMPTS`]
/// draws, or when a single prime search exhausts its candidate budget. For
/// any working random source that happens with negligible probability, so it
/// is treated as a broken RNG rather than an error.
pub(crate) fn generate_key_with_exp<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
) -> Result<RsaPrivateKeyComponents> {
    if bit_size < MIN_KEY_BITS {
        return Err(Error::ModulusTooSmall);
    }

    let mut primes = vec![BigUint::default(); 2];

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let mut todo = bit_size;
        for (i, prime) in primes.iter_mut().enumerate() {
            let bits = todo / (2 - i);
            *prime = match gen_prime(rng, bits) {
                Some(p) => p,
                None => panic!(
                    "no {}-bit prime found in {} candidates; the random source is broken",
                    bits,
                    max_prime_candidates(bits)
                ),
            };
            todo -= prime.bits();
        }

        // p = q would make n a perfect square.
        if primes[0] == primes[1] {
            tracing::trace!(attempt, "rejected equal primes");
            continue;
        }

        let n = compute_modulus(&primes);

        if n.bits() != bit_size {
            // This should never happen because gen_prime sets the top two bits
            // in each prime.
            tracing::trace!(attempt, bits = n.bits(), "rejected modulus of wrong size");
            continue;
        }

        match compute_private_exponent_euler_totient(&primes, exp) {
            Ok(d) => {
                tracing::debug!(bits = bit_size, attempts = attempt, "generated RSA key");
                return Ok(RsaPrivateKeyComponents {
                    n,
                    e: exp.clone(),
                    d,
                    primes,
                });
            }
            Err(_) => {
                tracing::trace!(attempt, "rejected primes: exponent not invertible mod phi(n)");
            }
        }
    }

    panic!(
        "RSA key generation did not converge after {} attempts; the random source is broken",
        MAX_GENERATION_ATTEMPTS
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::rsa::compute_euler_totient;
    use crate::const_rng::ConstRng;
    use crate::key::DEFAULT_EXPONENT;
    use num_bigint::prime::probably_prime;
    use num_traits::One;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn exp() -> BigUint {
        BigUint::from(DEFAULT_EXPONENT)
    }

    #[test]
    fn test_impossible_keys() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for i in 0..MIN_KEY_BITS {
            assert!(matches!(
                generate_key_with_exp(&mut rng, i, &exp()),
                Err(Error::ModulusTooSmall)
            ));
        }
    }

    macro_rules! key_generation {
        ($name:ident, $size:expr) => {
            #[test]
            fn $name() {
                let mut rng = ChaCha8Rng::from_seed([42; 32]);
                let exp = exp();
                for _ in 0..10 {
                    let components = generate_key_with_exp(&mut rng, $size, &exp).unwrap();
                    assert_eq!(components.n.bits(), $size);
                    assert_eq!(components.primes.len(), 2);

                    let (p, q) = (&components.primes[0], &components.primes[1]);
                    assert_ne!(p, q);
                    assert!(probably_prime(p, 20));
                    assert!(probably_prime(q, 20));
                    assert_eq!(&(p * q), &components.n);

                    let phi = compute_euler_totient(&components.primes);
                    assert!(((&components.d * &components.e) % &phi).is_one());
                    assert!(components.d > BigUint::one() && components.d < components.n);
                    assert!(components.e < components.n);
                }
            }
        };
    }

    key_generation!(key_generation_32, 32);
    key_generation!(key_generation_33, 33);
    key_generation!(key_generation_128, 128);
    key_generation!(key_generation_512, 512);
    key_generation!(key_generation_1024, 1024);

    #[test]
    fn test_small_exponent() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        let exp = BigUint::from(3u32);
        for _ in 0..10 {
            let components = generate_key_with_exp(&mut rng, 256, &exp).unwrap();
            let phi = compute_euler_totient(&components.primes);
            assert!(((&components.d * &exp) % &phi).is_one());
        }
    }

    #[test]
    #[should_panic(expected = "no 16-bit prime found")]
    fn test_constant_rng_no_prime() {
        // Every candidate is 0xffff, which is composite.
        let mut rng = ConstRng(0xff);
        let _ = generate_key_with_exp(&mut rng, 32, &exp());
    }

    #[test]
    #[should_panic(expected = "did not converge")]
    fn test_constant_rng_equal_primes() {
        // Every candidate is 0xc101 = 49409, a prime, so the two primes of
        // every pair collide.
        let mut rng = ConstRng(0x01);
        let _ = generate_key_with_exp(&mut rng, 32, &exp());
    }
}
