//! Property checks for the array-literal codec: lossless round trip over
//! arbitrary strings and panic-free decoding of arbitrary bytes.

use fieldwork_pgarray::codec::{decode, decode_bytes, encode, is_canonical};
use proptest::prelude::*;

/// Strings biased towards the characters the format reserves.
fn tricky_string() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[,{}\"\\\\ a]{0,8}",
        Just(String::new()),
    ]
}

proptest! {
    #[test]
    fn round_trip_is_lossless(values in prop::collection::vec(tricky_string(), 0..12)) {
        let encoded = encode(&values);
        prop_assert_eq!(decode(encoded.as_str()), values);
    }

    #[test]
    fn encoded_text_is_canonical(values in prop::collection::vec(tricky_string(), 0..12)) {
        let encoded = encode(&values);
        prop_assert!(
            encoded.starts_with('{') && encoded.ends_with('}'),
            "encoded text must be brace-wrapped: {}",
            encoded
        );
        prop_assert!(is_canonical(&encoded));
    }

    #[test]
    fn order_is_preserved(values in prop::collection::vec("[a-z]{1,3}", 0..20)) {
        let decoded = decode(encode(&values).as_str());
        prop_assert_eq!(decoded.len(), values.len());
        for (got, want) in decoded.iter().zip(values.iter()) {
            prop_assert_eq!(got, want);
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_bytes(&bytes);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "[,{}\"\\\\a-c ]{0,64}") {
        let values = decode(text.as_str());
        // whatever came out must itself survive a round trip
        prop_assert_eq!(decode(encode(&values).as_str()), values);
    }
}
