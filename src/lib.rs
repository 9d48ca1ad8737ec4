#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Building blocks
//!
//! - [`RsaPrivateKey::new`] generates a two-prime key with the public
//!   exponent [`DEFAULT_EXPONENT`].
//! - [`rsa_encrypt`] / [`rsa_decrypt`] apply the raw RSA permutation
//!   `m^e mod n` and `c^d mod n` to integers.
//! - [`encode_message`] / [`decode_message`] move between byte strings and
//!   integers (big-endian, no padding).
//! - [`EncodeKeyRecord`] / [`DecodeKeyRecord`] read and write keys as plain
//!   text key records.
//!
//! # ☢️️ WARNING ☢️
//!
//! This is textbook RSA. No padding is applied, so encryption is
//! deterministic and malleable, and the arithmetic is not constant-time. It
//! is meant for teaching and experimentation, not for protecting data.
//!
//! ## Key records
//!
//! ```
//! # fn main() -> Result<(), textbook_rsa::Error> {
//! use textbook_rsa::{DecodeKeyRecord, EncodeKeyRecord, RsaPrivateKey, RsaPublicKey};
//!
//! let record = "n 3233\ne 17\nd 2753\n";
//! let private_key = RsaPrivateKey::from_key_record(record)?;
//! assert_eq!(private_key.to_key_record().as_str(), record);
//!
//! // A private record is also a valid public record.
//! let public_key = RsaPublicKey::from_key_record(record)?;
//! assert_eq!(public_key.to_key_record().as_str(), "n 3233\ne 17\n");
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod codec;
pub mod encoding;
pub mod errors;
pub mod traits;

mod key;

#[cfg(test)]
mod const_rng;

pub use crate::{
    algorithms::rsa::{rsa_decrypt, rsa_encrypt},
    codec::{decode_message, encode_message, parse_integer},
    encoding::{DecodeKeyRecord, EncodeKeyRecord},
    errors::{Error, Result},
    key::{
        RsaPrivateKey, RsaPublicKey, DEFAULT_EXPONENT, MAX_GENERATION_ATTEMPTS, MIN_KEY_BITS,
    },
    traits::{PrivateKeyParts, PublicKeyParts},
};
