// Hash signing and webhook verification
//
// Covers the canonical digest rules:
// - fields concatenated in ascending name order, values lowercased
// - secret appended as-is (never lowercased)
// - SHA-512, lowercase hex, compared case-insensitively
// - verification fails closed on missing hash or unset secret

use proptest::prelude::*;
use sha2::{Digest, Sha512};
use std::collections::BTreeMap;
use yardpay::modules::gateway::{hash, OzowClient};

#[path = "../helpers/mod.rs"]
mod helpers;

fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn sha512_hex(input: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[test]
fn test_digest_concatenates_sorted_lowercased_values_then_secret() {
    let fields = fields(&[
        ("TransactionReference", "REF-001"),
        ("Amount", "7450.00"),
        ("SiteCode", "TST-001"),
    ]);

    // Ascending by name: Amount, SiteCode, TransactionReference
    let expected = sha512_hex("7450.00tst-001ref-001secret");
    assert_eq!(hash::sign_fields(&fields, "secret"), expected);
}

#[test]
fn test_insertion_order_is_irrelevant() {
    let forward = fields(&[("A", "1"), ("B", "2"), ("C", "3")]);
    let mut reversed = BTreeMap::new();
    reversed.insert("C".to_string(), "3".to_string());
    reversed.insert("B".to_string(), "2".to_string());
    reversed.insert("A".to_string(), "1".to_string());

    assert_eq!(
        hash::sign_fields(&forward, "k"),
        hash::sign_fields(&reversed, "k")
    );
}

#[test]
fn test_values_are_lowercased_but_secret_is_not() {
    let upper = fields(&[("Name", "THABO")]);
    let lower = fields(&[("Name", "thabo")]);
    assert_eq!(
        hash::sign_fields(&upper, "secret"),
        hash::sign_fields(&lower, "secret")
    );

    assert_ne!(
        hash::sign_fields(&upper, "SECRET"),
        hash::sign_fields(&upper, "secret")
    );
}

#[test]
fn test_digest_comparison_ignores_case() {
    let digest = hash::sign_fields(&fields(&[("A", "1")]), "k");
    assert!(hash::hashes_match(&digest, &digest.to_uppercase()));
    assert!(hash::hashes_match(&digest.to_uppercase(), &digest));
    assert!(!hash::hashes_match(&digest, "deadbeef"));
}

#[test]
fn test_json_values_render_like_the_gateway_sends_them() {
    assert_eq!(hash::field_value(&serde_json::json!(null)), "");
    assert_eq!(hash::field_value(&serde_json::json!("text")), "text");
    assert_eq!(hash::field_value(&serde_json::json!(7450)), "7450");
    assert_eq!(hash::field_value(&serde_json::json!(true)), "true");
}

#[test]
fn test_signed_webhook_verifies() {
    let gateway = OzowClient::new(
        helpers::test_ozow_config(),
        helpers::TEST_BASE_URL.to_string(),
    )
    .unwrap();

    let payload = helpers::webhook_payload("ref-123", "Complete");
    assert!(gateway.verify_notification(&payload));
}

#[test]
fn test_uppercased_received_hash_verifies() {
    let gateway = OzowClient::new(
        helpers::test_ozow_config(),
        helpers::TEST_BASE_URL.to_string(),
    )
    .unwrap();

    let mut payload = helpers::webhook_payload("ref-123", "Complete");
    let digest = payload["Hash"].as_str().unwrap().to_uppercase();
    payload["Hash"] = serde_json::Value::String(digest);
    assert!(gateway.verify_notification(&payload));
}

#[test]
fn test_any_tampered_field_is_rejected() {
    let gateway = OzowClient::new(
        helpers::test_ozow_config(),
        helpers::TEST_BASE_URL.to_string(),
    )
    .unwrap();

    let payload = helpers::webhook_payload("ref-123", "Complete");
    let field_names: Vec<String> = payload
        .as_object()
        .unwrap()
        .keys()
        .filter(|k| !k.eq_ignore_ascii_case("hash"))
        .cloned()
        .collect();

    for name in field_names {
        let mut tampered = payload.clone();
        tampered[&name] = serde_json::Value::String("tampered-value".to_string());
        assert!(
            !gateway.verify_notification(&tampered),
            "tampering with {} should invalidate the hash",
            name
        );
    }
}

#[test]
fn test_missing_hash_fails_closed() {
    let gateway = OzowClient::new(
        helpers::test_ozow_config(),
        helpers::TEST_BASE_URL.to_string(),
    )
    .unwrap();

    let mut payload = helpers::webhook_payload("ref-123", "Complete");
    payload.as_object_mut().unwrap().remove("Hash");
    assert!(!gateway.verify_notification(&payload));

    payload
        .as_object_mut()
        .unwrap()
        .insert("Hash".to_string(), serde_json::Value::String(String::new()));
    assert!(!gateway.verify_notification(&payload));
}

#[test]
fn test_unset_secret_fails_closed() {
    let mut config = helpers::test_ozow_config();
    config.private_key = String::new();
    let gateway = OzowClient::new(config, helpers::TEST_BASE_URL.to_string()).unwrap();

    // Even a payload signed with the empty secret must be rejected.
    let payload = helpers::sign_payload(
        serde_json::json!({
            "TransactionReference": "ref-123",
            "Status": "Complete",
        }),
        "",
    );
    assert!(!gateway.verify_notification(&payload));
}

#[test]
fn test_hash_accepted_under_hashcheck_key() {
    let gateway = OzowClient::new(
        helpers::test_ozow_config(),
        helpers::TEST_BASE_URL.to_string(),
    )
    .unwrap();

    let mut payload = helpers::webhook_payload("ref-123", "Complete");
    let digest = payload.as_object_mut().unwrap().remove("Hash").unwrap();
    payload
        .as_object_mut()
        .unwrap()
        .insert("HashCheck".to_string(), digest);

    assert!(gateway.verify_notification(&payload));
}

#[test]
fn test_non_object_payload_is_rejected() {
    let gateway = OzowClient::new(
        helpers::test_ozow_config(),
        helpers::TEST_BASE_URL.to_string(),
    )
    .unwrap();

    assert!(!gateway.verify_notification(&serde_json::json!("not an object")));
    assert!(!gateway.verify_notification(&serde_json::json!(["a", "b"])));
    assert!(!gateway.verify_notification(&serde_json::json!(null)));
}

proptest! {
    #[test]
    fn test_signing_is_deterministic(
        fields in prop::collection::btree_map(
            "[A-Za-z][A-Za-z0-9]{0,11}",
            "[ -~]{0,16}",
            1..8
        ),
        secret in "[!-~]{1,24}"
    ) {
        let first = hash::sign_fields(&fields, &secret);
        let second = hash::sign_fields(&fields, &secret);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 128);
        prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_changing_any_value_changes_the_digest(
        mut fields in prop::collection::btree_map(
            "[A-Za-z][A-Za-z0-9]{0,11}",
            "[ -~]{0,16}",
            1..8
        ),
        secret in "[!-~]{1,24}"
    ) {
        let original = hash::sign_fields(&fields, &secret);

        let key = fields.keys().next().unwrap().clone();
        fields.get_mut(&key).unwrap().push('x');
        let mutated = hash::sign_fields(&fields, &secret);

        prop_assert_ne!(original, mutated);
    }
}
