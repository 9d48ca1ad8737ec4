//! Generic RSA implementation

use num_bigint::{BigUint, ModInverse, ToBigUint};
use num_integer::Integer;
use num_traits::One;

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Raw RSA encryption of m with the public key. No padding is performed.
///
/// Returns `m^e mod n`. Messages that are not strictly smaller than the
/// modulus could not be recovered by [`rsa_decrypt`], so they are rejected
/// with [`Error::MessageTooLong`] instead of being reduced mod n.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if m >= key.n() {
        return Err(Error::MessageTooLong);
    }

    Ok(m.modpow(key.e(), key.n()))
}

/// Raw RSA decryption of c with the private key. No padding is removed.
///
/// Returns `c^d mod n`. Ciphertexts outside `[0, n)` were never produced by
/// [`rsa_encrypt`] for this key and are rejected with [`Error::Decryption`].
#[inline]
pub fn rsa_decrypt(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    if c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    Ok(c.modpow(priv_key.d(), priv_key.n()))
}

/// Compute the modulus of a key from its primes.
pub(crate) fn compute_modulus(primes: &[BigUint]) -> BigUint {
    let mut n = BigUint::one();
    for prime in primes {
        n *= prime;
    }
    n
}

/// Compute Euler's totient φ(n) = ∏(pᵢ - 1) of a key from its primes.
pub(crate) fn compute_euler_totient(primes: &[BigUint]) -> BigUint {
    let mut totient = BigUint::one();
    for prime in primes {
        totient *= prime - BigUint::one();
    }
    totient
}

/// Compute the private exponent from its primes (p and q) and public exponent.
///
/// Uses Euler's totient function. Fails with [`Error::InvalidPrime`] when the
/// exponent shares a factor with φ(n) and therefore has no inverse.
pub(crate) fn compute_private_exponent_euler_totient(
    primes: &[BigUint],
    exp: &BigUint,
) -> Result<BigUint> {
    if primes.len() < 2 {
        return Err(Error::InvalidPrime);
    }

    let totient = compute_euler_totient(primes);

    if !exp.gcd(&totient).is_one() {
        return Err(Error::InvalidPrime);
    }

    exp.clone()
        .mod_inverse(&totient)
        .and_then(|d| d.to_biguint())
        .ok_or(Error::InvalidPrime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RsaPrivateKey, RsaPublicKey};

    // n = 61 * 53, the classic worked example.
    fn toy_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(
            BigUint::from(3233u32),
            BigUint::from(17u32),
            BigUint::from(2753u32),
        )
        .unwrap()
    }

    #[test]
    fn test_known_answer() {
        let key = toy_key();
        let m = BigUint::from(65u32);

        let c = rsa_encrypt(&key, &m).unwrap();
        assert_eq!(c, BigUint::from(2790u32));

        let m2 = rsa_decrypt(&key, &c).unwrap();
        assert_eq!(m2, m);
    }

    #[test]
    fn test_encrypt_with_public_part() {
        let key = toy_key();
        let public_key = RsaPublicKey::from(&key);
        let m = BigUint::from(1234u32);

        let c = rsa_encrypt(&public_key, &m).unwrap();
        assert_eq!(rsa_decrypt(&key, &c).unwrap(), m);
    }

    #[test]
    fn test_all_residues_roundtrip() {
        let key = toy_key();
        for m in 0u32..3233 {
            let m = BigUint::from(m);
            let c = rsa_encrypt(&key, &m).unwrap();
            assert_eq!(rsa_decrypt(&key, &c).unwrap(), m);
        }
    }

    #[test]
    fn test_message_too_long() {
        let key = toy_key();
        assert!(matches!(
            rsa_encrypt(&key, &BigUint::from(3233u32)),
            Err(Error::MessageTooLong)
        ));
        assert!(matches!(
            rsa_encrypt(&key, &BigUint::from(100_000u32)),
            Err(Error::MessageTooLong)
        ));
    }

    #[test]
    fn test_ciphertext_out_of_range() {
        let key = toy_key();
        assert!(matches!(
            rsa_decrypt(&key, &BigUint::from(3233u32)),
            Err(Error::Decryption)
        ));
    }

    #[test]
    fn test_private_exponent() {
        let primes = [BigUint::from(61u32), BigUint::from(53u32)];
        assert_eq!(compute_modulus(&primes), BigUint::from(3233u32));
        assert_eq!(compute_euler_totient(&primes), BigUint::from(3120u32));

        let d = compute_private_exponent_euler_totient(&primes, &BigUint::from(17u32)).unwrap();
        assert_eq!(d, BigUint::from(2753u32));
    }

    #[test]
    fn test_private_exponent_not_invertible() {
        // φ = 60 * 52 = 3120 is divisible by 3 and 5.
        let primes = [BigUint::from(61u32), BigUint::from(53u32)];
        assert!(matches!(
            compute_private_exponent_euler_totient(&primes, &BigUint::from(3u32)),
            Err(Error::InvalidPrime)
        ));
        assert!(matches!(
            compute_private_exponent_euler_totient(&primes, &BigUint::from(5u32)),
            Err(Error::InvalidPrime)
        ));
        assert!(matches!(
            compute_private_exponent_euler_totient(&primes[..1], &BigUint::from(17u32)),
            Err(Error::InvalidPrime)
        ));
    }
}
