//! Property-based tests.

use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use textbook_rsa::{
    decode_message, encode_message, BigUint, DecodeKeyRecord, EncodeKeyRecord, PublicKeyParts,
    RsaPrivateKey, RsaPublicKey,
};

prop_compose! {
    // WARNING: do *NOT* copy and paste this code. It's insecure and optimized for test speed.
    fn private_key()(seed in any::<[u8; 32]>()) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed(seed);
        RsaPrivateKey::new(&mut rng, 512).unwrap()
    }
}

prop_compose! {
    // Byte strings the codec can reproduce exactly: no leading zero byte, and
    // short enough to stay below any 512-bit modulus.
    fn message()(mut msg in prop::collection::vec(any::<u8>(), 0..64)) -> Vec<u8> {
        let zeros = msg.iter().take_while(|&&b| b == 0).count();
        msg.drain(..zeros);
        msg
    }
}

proptest! {
    #[test]
    fn codec_roundtrip(msg in message()) {
        prop_assert_eq!(decode_message(&encode_message(&msg)), msg);
    }

    #[test]
    fn codec_drops_leading_zeros(zeros in 0usize..8, msg in message()) {
        let mut padded = vec![0u8; zeros];
        padded.extend_from_slice(&msg);
        prop_assert_eq!(decode_message(&encode_message(&padded)), msg);
    }

    #[test]
    fn integer_roundtrip(bytes in any::<Vec<u8>>()) {
        // Any leading zeros in `bytes` are absorbed by the integer.
        let x = BigUint::from_bytes_be(&bytes);
        prop_assert_eq!(encode_message(&decode_message(&x)), x);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn encrypt_decrypt_roundtrip(private_key in private_key(), m in any::<Vec<u8>>()) {
        let public_key = RsaPublicKey::from(&private_key);
        let m = BigUint::from_bytes_be(&m) % public_key.n();

        let c = public_key.encrypt(&m).unwrap();
        prop_assert!(&c < public_key.n());
        prop_assert_eq!(private_key.decrypt(&c).unwrap(), m);
    }

    #[test]
    fn message_roundtrip(private_key in private_key(), msg in message()) {
        let c = private_key.to_public_key().encrypt_bytes(&msg).unwrap();
        prop_assert_eq!(private_key.decrypt_bytes(&c).unwrap(), msg);
    }

    #[test]
    fn key_record_roundtrip(private_key in private_key()) {
        let record = private_key.to_key_record();

        let loaded = RsaPrivateKey::from_key_record(&record).unwrap();
        prop_assert_eq!(&loaded, &private_key);

        let public_key = RsaPublicKey::from_key_record(&record).unwrap();
        prop_assert_eq!(public_key, private_key.to_public_key());
    }
}
