use inkseal::{
    decrypt, derive_key, encrypt, hash_content, hash_key, DerivedKey, InksealError, Salt,
};
use proptest::prelude::*;

fn key_from(bytes: [u8; 32]) -> DerivedKey {
    DerivedKey::from_hex(&hex::encode(bytes)).unwrap()
}

proptest! {
    #[test]
    fn roundtrip_any_text(
        text in any::<String>(),
        key_bytes in proptest::array::uniform32(any::<u8>()),
    ) {
        let key = key_from(key_bytes);
        let envelope = encrypt(&text, &key).unwrap().to_string();
        prop_assert_eq!(decrypt(&envelope, &key).unwrap(), text);
    }

    #[test]
    fn fresh_nonce_every_call(text in "\\PC{0,64}") {
        let key = key_from([11u8; 32]);
        let a = encrypt(&text, &key).unwrap();
        let b = encrypt(&text, &key).unwrap();
        prop_assert_ne!(a.to_string(), b.to_string());
        prop_assert_eq!(a.open(&key).unwrap(), b.open(&key).unwrap());
    }

    #[test]
    fn wrong_key_never_opens(
        k1 in proptest::array::uniform32(any::<u8>()),
        k2 in proptest::array::uniform32(any::<u8>()),
    ) {
        prop_assume!(k1 != k2);
        let envelope = encrypt("entry", &key_from(k1)).unwrap().to_string();
        prop_assert_eq!(
            decrypt(&envelope, &key_from(k2)),
            Err(InksealError::Authentication)
        );
    }

    #[test]
    fn content_hash_changes_with_one_char(text in "\\PC{0,64}", extra in any::<char>()) {
        let mut changed = text.clone();
        changed.push(extra);
        prop_assert_eq!(hash_content(&text), hash_content(&text));
        prop_assert_ne!(hash_content(&text), hash_content(&changed));
    }

    #[test]
    fn key_hash_changes_with_key(
        k1 in proptest::array::uniform32(any::<u8>()),
        k2 in proptest::array::uniform32(any::<u8>()),
    ) {
        prop_assume!(k1 != k2);
        prop_assert_eq!(hash_key(&key_from(k1)), hash_key(&key_from(k1)));
        prop_assert_ne!(hash_key(&key_from(k1)), hash_key(&key_from(k2)));
    }
}

// Derivation runs 100k PBKDF2 rounds per call; keep the case count small.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn derivation_is_deterministic_and_salt_sensitive(
        password in "[a-zA-Z0-9 ]{1,24}",
        s1 in proptest::array::uniform16(any::<u8>()),
        s2 in proptest::array::uniform16(any::<u8>()),
    ) {
        prop_assume!(s1 != s2);
        let (s1, s2) = (Salt::from_bytes(s1), Salt::from_bytes(s2));
        let k1 = derive_key(&password, &s1);
        prop_assert_eq!(k1.to_hex(), derive_key(&password, &s1).to_hex());
        prop_assert_ne!(k1.to_hex(), derive_key(&password, &s2).to_hex());
    }
}
