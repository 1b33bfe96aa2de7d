//! Minimal example: enabling encryption and reopening a journal.
//!
//! Run with: `RUST_LOG=inkseal=debug cargo run --example journal_session`
//!
//! - Setup derives a key and stores only salt + key hash
//! - A later session re-derives the key from the password and stored salt
//! - Entries travel to the store as envelopes plus content hashes

use inkseal::{initialize_encryption, EnclaveConfig, MemoryStore, RecordStore, Session};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. Configuration (defaults to KDF version 1)
    let config = EnclaveConfig::default();
    let kdf = config.kdf()?;

    // 2. First-time setup
    let mut store = MemoryStore::new();
    let password = "correct horse battery staple";
    let setup = inkseal::initialize_encryption_with(&kdf, password)?;
    store.put_account("demo-user", setup.account_record())?;
    println!("Enabled encryption, salt = {}", setup.salt);

    // 3. Write an entry during the setup session
    let session = setup.into_session();
    let entry = session.seal_entry("First entry. Nobody else can read this.")?;
    store.put_entry("demo-user", "day-1", entry)?;
    drop(session);

    // 4. Later: log back in and read it
    let account = store.account("demo-user")?;
    let mut session = Session::new();
    if session.unlock("correct horse battery stapel", &account).is_err() {
        println!("Typo rejected");
    }
    session.unlock(password, &account)?;

    let entry = store.entry("demo-user", "day-1")?;
    println!("Stored envelope: {}", entry.envelope);
    println!("Decrypted: {}", session.open_entry(&entry)?);

    session.lock();

    // A second setup for the same password would draw a new salt.
    let other = initialize_encryption(password)?;
    assert_ne!(other.salt, account.salt);

    Ok(())
}
