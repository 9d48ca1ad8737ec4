//! Error types.

use alloc::string::String;

/// Alias for [`core::result::Result`] with the `textbook-rsa` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Requested modulus size is below [`MIN_KEY_BITS`](crate::MIN_KEY_BITS).
    ModulusTooSmall,

    /// Modulus is not a usable RSA modulus.
    InvalidModulus,

    /// Public exponent too small.
    PublicExponentTooSmall,

    /// Public exponent too large.
    PublicExponentTooLarge,

    /// Invalid exponent.
    InvalidExponent,

    /// Invalid prime value.
    InvalidPrime,

    /// Message integer is not smaller than the modulus.
    MessageTooLong,

    /// Decryption error.
    Decryption,

    /// Text is not an unsigned decimal integer.
    InvalidInteger,

    /// Key record is malformed.
    KeyFormat {
        /// What is wrong with the record.
        reason: String,
    },

    /// Reading or writing a key record failed.
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn key_format(reason: impl Into<String>) -> Self {
        Error::KeyFormat {
            reason: reason.into(),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            #[cfg(feature = "std")]
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ModulusTooSmall => write!(
                f,
                "modulus too small: at least {} bits are required",
                crate::MIN_KEY_BITS
            ),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::PublicExponentTooSmall => write!(f, "public exponent too small"),
            Error::PublicExponentTooLarge => write!(f, "public exponent too large"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::MessageTooLong => write!(f, "message too long for this key"),
            Error::Decryption => write!(f, "decryption error"),
            Error::InvalidInteger => write!(f, "not an unsigned decimal integer"),
            Error::KeyFormat { reason } => write!(f, "malformed key record: {reason}"),
            #[cfg(feature = "std")]
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
