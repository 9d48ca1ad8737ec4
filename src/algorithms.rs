//! Useful algorithms related to RSA.

pub(crate) mod generate;
pub(crate) mod prime;
pub(crate) mod rsa;
