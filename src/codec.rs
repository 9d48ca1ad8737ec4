//! Conversion between byte strings and the integers RSA operates on.
//!
//! Messages are read as unsigned big-endian integers with no padding. A
//! message that starts with `0x00` loses those leading bytes: the integer has
//! no way to remember them, so [`decode_message`] only inverts
//! [`encode_message`] for inputs whose first byte is non-zero.

use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::{Error, Result};

/// Interpret `msg` as a big-endian unsigned integer.
///
/// The empty string encodes to zero.
pub fn encode_message(msg: &[u8]) -> BigUint {
    BigUint::from_bytes_be(msg)
}

/// Minimal big-endian byte representation of `m`.
///
/// Zero decodes to the empty string.
pub fn decode_message(m: &BigUint) -> Vec<u8> {
    if m.is_zero() {
        return Vec::new();
    }

    m.to_bytes_be()
}

/// Parse an unsigned decimal integer, such as a ciphertext given on the
/// command line.
///
/// Surrounding whitespace is ignored. Anything other than ASCII digits,
/// including signs and digit separators, is rejected.
pub fn parse_integer(s: &str) -> Result<BigUint> {
    let digits = s.trim();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInteger);
    }

    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(Error::InvalidInteger)
}
