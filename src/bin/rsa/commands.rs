use std::{
    ffi::OsString,
    io::{self, Write},
    path::Path,
};

use textbook_rsa::{
    parse_integer, rand_core::OsRng, DecodeKeyRecord, EncodeKeyRecord, RsaPrivateKey,
    RsaPublicKey,
};

use crate::{
    cli::Commands,
    error::{CliError, Result},
};

pub fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Encrypt { keyfile, message } => encrypt(&keyfile, message),
        Commands::Decrypt {
            keyfile,
            ciphertext,
        } => decrypt(&keyfile, &ciphertext),
        Commands::Genkey { numbits } => genkey(numbits),
        Commands::Pubkey { keyfile } => pubkey(&keyfile),
    }
}

fn encrypt(keyfile: &Path, message: OsString) -> Result<()> {
    let key = RsaPublicKey::read_key_record_file(keyfile).map_err(CliError::key_file(keyfile))?;
    let c = key.encrypt_bytes(&message.into_encoded_bytes())?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{c}")
        .and_then(|()| stdout.flush())
        .map_err(CliError::output("ciphertext"))
}

fn decrypt(keyfile: &Path, ciphertext: &str) -> Result<()> {
    // Reject a malformed ciphertext before touching the key file.
    let c = parse_integer(ciphertext).map_err(CliError::Ciphertext)?;
    let key =
        RsaPrivateKey::read_key_record_file(keyfile).map_err(CliError::key_file(keyfile))?;
    let plaintext = key.decrypt_bytes(&c)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&plaintext)
        .and_then(|()| stdout.flush())
        .map_err(CliError::output("plaintext"))
}

fn genkey(numbits: usize) -> Result<()> {
    tracing::info!(bits = numbits, "generating key");
    let key = RsaPrivateKey::new(&mut OsRng, numbits)?;
    write_record(&key)
}

fn pubkey(keyfile: &Path) -> Result<()> {
    let key = RsaPublicKey::read_key_record_file(keyfile).map_err(CliError::key_file(keyfile))?;
    write_record(&key)
}

fn write_record(key: &impl EncodeKeyRecord) -> Result<()> {
    let record = key.to_key_record();
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(record.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(CliError::output("key"))
}
