//! End-to-end fixtures for the key-compat decoder.
//!
//! The encoded strings are literal tokens produced by the two real
//! client libraries; they pin the decoder's output to the exact legacy
//! shapes the application layer was built against.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use keycompat::{
    Error, FlatKey, IdType, KeyDecoder, NoLegacyDecoder, PartitionId, PathElement, PbKey,
};
use proptest::prelude::*;
use prost::Message;

const GATE_PROJECT: &str = "glibrary";

fn decoder() -> KeyDecoder<NoLegacyDecoder> {
    KeyDecoder::new(NoLegacyDecoder, GATE_PROJECT)
}

fn flat(kind: &str, int_id: i64, string_id: &str, parent: Option<FlatKey>) -> FlatKey {
    FlatKey {
        kind: kind.to_string(),
        int_id,
        string_id: string_id.to_string(),
        app_id: GATE_PROJECT.to_string(),
        parent: parent.map(Box::new),
    }
}

#[test]
fn modern_token_with_int_id() {
    let key = decoder().decode("Eg4KCVdvcmRJbmRleBCJCA").unwrap();
    assert_eq!(key, flat("WordIndex", 1033, "", None));
}

#[test]
fn modern_token_with_string_id() {
    let key = decoder().decode("EhQKCVdvcmRJbmRleBoHSUFtQW5JRA").unwrap();
    assert_eq!(key, flat("WordIndex", 0, "IAmAnID", None));
}

#[test]
fn modern_token_with_string_id_and_parent() {
    let key = decoder()
        .decode("EhsKC0xldHRlckluZGV4GgxJQW1Bbm90aGVySUQSFAoJV29yZEluZGV4GgdJQW1BbklE")
        .unwrap();
    let parent = flat("LetterIndex", 0, "IAmAnotherID", None);
    assert_eq!(key, flat("WordIndex", 0, "IAmAnID", Some(parent)));
}

#[test]
fn truncated_fixture_tokens_never_decode_to_the_original() {
    let tokens = [
        "Eg4KCVdvcmRJbmRleBCJCA",
        "EhQKCVdvcmRJbmRleBoHSUFtQW5JRA",
        "EhsKC0xldHRlckluZGV4GgxJQW1Bbm90aGVySUQSFAoJV29yZEluZGV4GgdJQW1BbklE",
    ];
    for token in tokens {
        let original = decoder().decode(token).unwrap();
        let truncated = &token[..token.len() - 1];
        match decoder().decode(truncated) {
            Ok(key) => assert_ne!(key, original, "truncating {token} still decoded equal"),
            Err(_) => {}
        }
    }
}

#[test]
fn truncation_breaking_base64_alignment_fails_outright() {
    // 22 chars -> 21; length 1 mod 4 cannot be repaired by padding.
    let result = decoder().decode(&"Eg4KCVdvcmRJbmRleBCJCA"[..21]);
    assert_eq!(result, Err(Error::UnsupportedFormat));
}

// === Generated-key properties ===

fn arb_id_type() -> impl Strategy<Value = IdType> {
    prop_oneof![
        (1i64..1_000_000_000).prop_map(IdType::Id),
        "[A-Za-z0-9:_-]{1,16}".prop_map(IdType::Name),
    ]
}

fn arb_pb_key() -> impl Strategy<Value = PbKey> {
    let element = ("[A-Za-z]{1,12}", arb_id_type()).prop_map(|(kind, id_type)| PathElement {
        kind,
        id_type: Some(id_type),
    });
    ("[a-z0-9-]{0,10}", prop::collection::vec(element, 1..5)).prop_map(|(namespace_id, path)| {
        PbKey {
            partition_id: Some(PartitionId {
                project_id: String::new(),
                namespace_id,
            }),
            path,
        }
    })
}

fn encode_token(pb: &PbKey) -> String {
    URL_SAFE_NO_PAD.encode(pb.encode_to_vec())
}

proptest! {
    #[test]
    fn decoding_any_valid_token_is_deterministic(pb in arb_pb_key()) {
        let token = encode_token(&pb);
        let first = decoder().decode(&token).unwrap();
        let second = decoder().decode(&token).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_node_has_exactly_one_identifier(pb in arb_pb_key()) {
        let token = encode_token(&pb);
        let key = decoder().decode(&token).unwrap();
        let mut node = Some(&key);
        while let Some(k) = node {
            prop_assert!((k.int_id != 0) ^ (!k.string_id.is_empty()));
            prop_assert_eq!(k.app_id.as_str(), GATE_PROJECT);
            node = k.parent.as_deref();
        }
    }

    #[test]
    fn single_partition_keys_always_pass_validation(pb in arb_pb_key()) {
        let key = keycompat::build(&pb);
        prop_assert!(keycompat::validate(key.as_ref()));
    }

    #[test]
    fn one_char_truncation_never_yields_an_equal_key(pb in arb_pb_key()) {
        let token = encode_token(&pb);
        let original = decoder().decode(&token).unwrap();
        let truncated = &token[..token.len() - 1];
        if let Ok(key) = decoder().decode(truncated) {
            prop_assert_ne!(key, original);
        }
    }
}
