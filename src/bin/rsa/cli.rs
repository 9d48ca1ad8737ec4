use clap::{Parser, Subcommand};
use std::{ffi::OsString, path::PathBuf};

#[derive(Parser)]
#[command(
    name = "rsa",
    about = "Textbook RSA: generate keys, encrypt and decrypt short messages",
    long_about = "Textbook RSA: generate keys, encrypt and decrypt short messages

Keys are plain text records with one `label value` line per field (n, e and,
for private keys, d). Messages are encrypted without padding, so this tool is
only suitable for experiments.

EXAMPLE:
  rsa genkey 512 > key.txt
  rsa encrypt key.txt hi            # prints the ciphertext in decimal
  rsa decrypt key.txt <ciphertext>  # writes the raw plaintext bytes",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print debug diagnostics to stderr (overridden by RSA_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a message with the public key in <KEYFILE>
    #[command(aliases = &["enc"])]
    Encrypt {
        keyfile: PathBuf,
        #[arg(allow_hyphen_values = true)]
        message: OsString,
    },

    /// Decrypt a decimal ciphertext with the private key in <KEYFILE>
    #[command(aliases = &["dec"])]
    Decrypt {
        keyfile: PathBuf,
        #[arg(allow_hyphen_values = true)]
        ciphertext: String,
    },

    /// Generate a private key whose modulus has <NUMBITS> bits
    Genkey { numbits: usize },

    /// Print the public part of the key in <KEYFILE>
    Pubkey { keyfile: PathBuf },
}
