use alloc::vec::Vec;
use core::hash::{Hash, Hasher};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::{generate_key_with_exp, RsaPrivateKeyComponents};
use crate::algorithms::rsa::{rsa_decrypt, rsa_encrypt};
use crate::codec::{decode_message, encode_message};
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Public exponent used by [`RsaPrivateKey::new`].
pub const DEFAULT_EXPONENT: u64 = 65537;

/// Smallest modulus size, in bits, accepted by the key generator.
///
/// Anything smaller leaves too few primes of the required shape for the
/// distinctness check, and a modulus below 2¹⁷ could not even hold
/// [`DEFAULT_EXPONENT`].
pub const MIN_KEY_BITS: usize = 32;

/// Upper bound on prime-pair draws made by the key generator.
pub const MAX_GENERATION_ATTEMPTS: usize = 10_000;

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: BigUint,
}

impl Eq for RsaPrivateKey {}
impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components && self.d == other.d
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separator for RSA private keys
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.pubkey_components, state);
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
    }
}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        let n = private_key.n().clone();
        let e = private_key.e().clone();
        RsaPublicKey { n, e }
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    ///
    /// Requires `n > 1` and `1 < e < n`.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let k = Self { n, e };
        check_public(&k)?;
        Ok(k)
    }

    /// Encrypt the message integer `m`, returning `m^e mod n`.
    ///
    /// `m` must be smaller than the modulus.
    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint> {
        rsa_encrypt(self, m)
    }

    /// Encode `msg` as a big-endian integer and encrypt it.
    pub fn encrypt_bytes(&self, msg: &[u8]) -> Result<BigUint> {
        rsa_encrypt(self, &encode_message(msg))
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair of the given bit size using the passed in
    /// `rng` and the public exponent [`DEFAULT_EXPONENT`].
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<RsaPrivateKey> {
        Self::new_with_exp(rng, bit_size, &BigUint::from(DEFAULT_EXPONENT))
    }

    /// Generate a new RSA key pair of the given bit size and the public
    /// exponent using the passed in `rng`.
    ///
    /// The exponent must be odd, at least 3, and shorter than the modulus.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        exp: &BigUint,
    ) -> Result<RsaPrivateKey> {
        if exp <= &BigUint::one() {
            return Err(Error::PublicExponentTooSmall);
        }
        if exp.bits() >= bit_size.max(MIN_KEY_BITS) {
            return Err(Error::PublicExponentTooLarge);
        }
        // φ(n) is always even, so an even exponent is never invertible.
        if exp.is_even() {
            return Err(Error::InvalidExponent);
        }

        let components = generate_key_with_exp(rng, bit_size, exp)?;
        Ok(RsaPrivateKey::from_generated(components))
    }

    /// Constructs an RSA key pair from its components, e.g. as read back from
    /// a key record.
    ///
    /// Requires `n > 1`, `1 < e < n` and `1 < d < n`. The relation between
    /// `d` and `e` cannot be checked without the prime factors.
    pub fn from_components(n: BigUint, e: BigUint, d: BigUint) -> Result<RsaPrivateKey> {
        let k = RsaPrivateKey {
            pubkey_components: RsaPublicKey { n, e },
            d,
        };
        k.validate()?;
        Ok(k)
    }

    fn from_generated(components: RsaPrivateKeyComponents) -> RsaPrivateKey {
        let RsaPrivateKeyComponents {
            n,
            e,
            d,
            mut primes,
        } = components;
        primes.zeroize();

        RsaPrivateKey {
            pubkey_components: RsaPublicKey { n, e },
            d,
        }
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Generally this is not needed since `RsaPrivateKey` implements the
    /// `PublicKeyParts` trait, but it can occasionally be useful to discard
    /// the private information entirely.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        if self.d <= BigUint::one() || &self.d >= self.n() {
            return Err(Error::InvalidExponent);
        }

        Ok(())
    }

    /// Encrypt the message integer `m` with the public half of this key.
    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint> {
        rsa_encrypt(self, m)
    }

    /// Decrypt the ciphertext integer `c`, returning `c^d mod n`.
    pub fn decrypt(&self, c: &BigUint) -> Result<BigUint> {
        rsa_decrypt(self, c)
    }

    /// Decrypt `c` and decode the result as a minimal big-endian byte string.
    pub fn decrypt_bytes(&self, c: &BigUint) -> Result<Vec<u8>> {
        let m = zeroize::Zeroizing::new(rsa_decrypt(self, c)?);
        Ok(decode_message(&m))
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }
}

/// Check that the public key is well formed.
#[inline]
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    if public_key.n() <= &BigUint::one() {
        return Err(Error::InvalidModulus);
    }

    if public_key.e() <= &BigUint::one() {
        return Err(Error::PublicExponentTooSmall);
    }

    if public_key.e() >= public_key.n() {
        return Err(Error::PublicExponentTooLarge);
    }

    Ok(())
}
