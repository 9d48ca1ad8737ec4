//! Key record encoding support.
//!
//! A key record is a small text document listing the key's integers in
//! decimal, one `label value` pair per line, in a fixed order:
//!
//! ```text
//! n 3233
//! e 17
//! d 2753
//! ```
//!
//! Public keys carry `n` and `e`; private keys add `d`. Blank lines are
//! ignored, everything else must match this layout exactly.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::{
    errors::{Error, Result},
    traits::{PrivateKeyParts, PublicKeyParts},
    RsaPrivateKey, RsaPublicKey,
};

#[cfg(feature = "std")]
use std::{fs, io, path::Path};

/// Label of the modulus line.
pub const MODULUS_LABEL: &str = "n";
/// Label of the public exponent line.
pub const PUBLIC_EXPONENT_LABEL: &str = "e";
/// Label of the private exponent line.
pub const PRIVATE_EXPONENT_LABEL: &str = "d";

const FIELD_ORDER: [&str; 3] = [MODULUS_LABEL, PUBLIC_EXPONENT_LABEL, PRIVATE_EXPONENT_LABEL];

/// The integers found in a key record, before any RSA-level validation.
struct KeyRecord {
    n: BigUint,
    e: BigUint,
    d: Option<Zeroizing<BigUint>>,
}

impl KeyRecord {
    fn parse(s: &str) -> Result<Self> {
        let mut values: Vec<BigUint> = Vec::with_capacity(FIELD_ORDER.len());

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let (label, value) = match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(label), Some(value), None) => (label, value),
                _ => {
                    return Err(Error::key_format(format!(
                        "line {line_no}: expected `<label> <decimal value>`"
                    )))
                }
            };

            let expected = match FIELD_ORDER.get(values.len()) {
                Some(expected) => *expected,
                None => {
                    return Err(Error::key_format(format!(
                        "line {line_no}: unexpected field `{label}` after `{PRIVATE_EXPONENT_LABEL}`"
                    )))
                }
            };
            if label != expected {
                return Err(Error::key_format(format!(
                    "line {line_no}: expected field `{expected}`, found `{label}`"
                )));
            }

            let value = crate::codec::parse_integer(value).map_err(|_| {
                Error::key_format(format!(
                    "line {line_no}: field `{label}` is not an unsigned decimal integer"
                ))
            })?;
            values.push(value);
        }

        let mut values = values.into_iter();
        let n = values
            .next()
            .ok_or_else(|| Error::key_format("missing modulus (`n`)"))?;
        let e = values
            .next()
            .ok_or_else(|| Error::key_format("missing public exponent (`e`)"))?;
        let d = values.next().map(Zeroizing::new);

        Ok(KeyRecord { n, e, d })
    }
}

/// Buffer size for reading a record of unknown length; fits a 4096-bit
/// private key.
#[cfg(feature = "std")]
const READ_CAPACITY: usize = 4096;

/// Upper bound on the length of a record holding `fields`.
///
/// A `k`-bit integer has at most `⌊k·log₁₀2⌋ + 1` decimal digits.
fn record_capacity(fields: &[(&str, &BigUint)]) -> usize {
    fields
        .iter()
        .map(|(label, value)| label.len() + 2 + value.bits() * 31 / 100 + 1)
        .sum()
}

/// Format `fields` into a buffer sized up front, so no partial copy of a
/// secret value is left behind by a reallocation.
fn write_record(fields: &[(&str, &BigUint)]) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::with_capacity(record_capacity(fields)));
    for (label, value) in fields {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{label} {value}");
    }
    out
}

/// Read `reader` to the end. When the buffer has to grow, the contents move
/// to a fresh allocation and the old one is wiped.
#[cfg(feature = "std")]
fn read_secret<R: io::Read + ?Sized>(
    reader: &mut R,
    size_hint: usize,
) -> io::Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(Vec::with_capacity(size_hint.max(READ_CAPACITY)));
    let mut chunk = Zeroizing::new([0u8; 512]);

    loop {
        let len = match reader.read(&mut chunk[..]) {
            Ok(0) => break,
            Ok(len) => len,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };

        if buf.len() + len > buf.capacity() {
            let mut grown = Zeroizing::new(Vec::with_capacity(2 * (buf.len() + len)));
            grown.extend_from_slice(&buf);
            buf = grown;
        }
        buf.extend_from_slice(&chunk[..len]);
    }

    Ok(buf)
}

#[cfg(feature = "std")]
fn decode_utf8<T: DecodeKeyRecord>(buf: &[u8]) -> Result<T> {
    let s = core::str::from_utf8(buf)
        .map_err(|_| Error::key_format("key record is not valid UTF-8"))?;
    T::from_key_record(s)
}

/// Encode a key as a key record.
pub trait EncodeKeyRecord {
    /// Serialize this key as a key record.
    ///
    /// The text may contain secret key material and is wiped when dropped.
    fn to_key_record(&self) -> Zeroizing<String>;

    /// Write the key record to `writer`.
    #[cfg(feature = "std")]
    fn write_key_record<W: io::Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let record = self.to_key_record();
        writer.write_all(record.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write the key record to the file at `path`, replacing its contents.
    #[cfg(feature = "std")]
    fn write_key_record_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = fs::File::create(path)?;
        self.write_key_record(&mut file)?;
        file.sync_all()?;
        Ok(())
    }
}

/// Decode a key from a key record.
pub trait DecodeKeyRecord: Sized {
    /// Parse a key from the text of a key record.
    fn from_key_record(s: &str) -> Result<Self>;

    /// Read a whole key record from `reader` and parse it.
    #[cfg(feature = "std")]
    fn read_key_record<R: io::Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let buf = read_secret(reader, 0)?;
        decode_utf8(&buf)
    }

    /// Load a key record from the file at `path`.
    #[cfg(feature = "std")]
    fn read_key_record_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = fs::File::open(path)?;
        let size_hint = file
            .metadata()
            .ok()
            .and_then(|meta| usize::try_from(meta.len()).ok())
            .unwrap_or(0);
        let buf = read_secret(&mut file, size_hint)?;
        decode_utf8(&buf)
    }
}

impl EncodeKeyRecord for RsaPublicKey {
    fn to_key_record(&self) -> Zeroizing<String> {
        write_record(&[
            (MODULUS_LABEL, self.n()),
            (PUBLIC_EXPONENT_LABEL, self.e()),
        ])
    }
}

impl EncodeKeyRecord for RsaPrivateKey {
    fn to_key_record(&self) -> Zeroizing<String> {
        write_record(&[
            (MODULUS_LABEL, self.n()),
            (PUBLIC_EXPONENT_LABEL, self.e()),
            (PRIVATE_EXPONENT_LABEL, self.d()),
        ])
    }
}

/// Accepts both public and private records; a private exponent is checked
/// for syntax and then dropped.
impl DecodeKeyRecord for RsaPublicKey {
    fn from_key_record(s: &str) -> Result<Self> {
        let record = KeyRecord::parse(s)?;
        let key = RsaPublicKey::new(record.n, record.e)?;
        tracing::debug!(bits = key.bits(), "loaded RSA public key");
        Ok(key)
    }
}

impl DecodeKeyRecord for RsaPrivateKey {
    fn from_key_record(s: &str) -> Result<Self> {
        let record = KeyRecord::parse(s)?;
        let d = record
            .d
            .ok_or_else(|| Error::key_format("missing private exponent (`d`)"))?;
        let key = RsaPrivateKey::from_components(record.n, record.e, (*d).clone())?;
        tracing::debug!(bits = key.bits(), "loaded RSA private key");
        Ok(key)
    }
}

impl core::str::FromStr for RsaPublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key_record(s)
    }
}

impl core::str::FromStr for RsaPrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key_record(s)
    }
}

impl core::fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_key_record())
    }
}
