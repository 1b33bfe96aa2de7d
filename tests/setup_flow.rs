use inkseal::{
    derive_key, hash_key, initialize_encryption, verify_key, InksealError, MemoryStore,
    RecordStore, Session,
};

#[test]
fn test_password_reentry_reproduces_key() {
    // Setup with a fresh salt, then come back later with the stored salt.

    let password = "correct horse battery staple";

    // 1. First-time setup. The store keeps salt + key hash.
    let setup = initialize_encryption(password).unwrap();
    let recorded_hash = hash_key(&setup.key);
    assert_eq!(recorded_hash, setup.key_hash);

    // 2. Same password, same stored salt: same key, same hash.
    let again = derive_key(password, &setup.salt);
    assert_eq!(again.to_hex(), setup.key.to_hex());
    assert_eq!(hash_key(&again), recorded_hash);

    // 3. A typo produces a different key whose hash does not match.
    let typo = derive_key("correct horse battery stapel", &setup.salt);
    assert_ne!(typo.to_hex(), setup.key.to_hex());
    assert!(!verify_key(&typo, &recorded_hash));
}

#[test]
fn test_login_through_store() {
    let mut store = MemoryStore::new();

    // 1. Enable encryption and persist only the non-secret record.
    let setup = initialize_encryption("journal-pass").unwrap();
    store.put_account("user-1", setup.account_record()).unwrap();

    let session = setup.into_session();
    let entry = session.seal_entry("Dear diary, the key never leaves me.").unwrap();
    store.put_entry("user-1", "2026-10-19", entry).unwrap();
    drop(session);

    // 2. New session: typo first, then the right password.
    let account = store.account("user-1").unwrap();
    let mut session = Session::new();
    assert_eq!(
        session.unlock("journal-pas", &account),
        Err(InksealError::KeyMismatch)
    );
    session.unlock("journal-pass", &account).unwrap();

    // 3. Stored entry opens and verifies.
    let stored = store.entry("user-1", "2026-10-19").unwrap();
    assert_eq!(
        session.open_entry(&stored).unwrap(),
        "Dear diary, the key never leaves me."
    );
}

#[test]
fn test_stored_records_carry_no_key_material() {
    let setup = initialize_encryption("pw").unwrap();
    let key_hex = setup.key.to_hex().to_string();

    let account_json = serde_json::to_string(&setup.account_record()).unwrap();
    let session = setup.into_session();
    let entry = session.seal_entry("secret thoughts").unwrap();
    let entry_json = serde_json::to_string(&entry).unwrap();

    for json in [&account_json, &entry_json] {
        assert!(!json.contains(&key_hex));
        assert!(!json.contains("secret thoughts"));
        assert!(!json.contains("\"pw\""));
    }
}
