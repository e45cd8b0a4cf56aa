use sha2::{Digest, Sha512};
use std::collections::BTreeMap;
use subtle::ConstantTimeEq;

/// Canonical hash over a payment payload.
///
/// The gateway computes the same function independently, so the input
/// construction is load-bearing: values are taken in ascending order of
/// their field names, each value lower-cased, concatenated with no
/// separator, and the shared secret appended as-is. The digest is SHA-512
/// rendered as lowercase hex.
///
/// The BTreeMap key order supplies the lexicographic sort. An empty secret
/// still produces a deterministic digest; refusing to run without a
/// configured secret is the config layer's job.
pub fn sign_fields(fields: &BTreeMap<String, String>, secret: &str) -> String {
    let mut input = String::new();
    for value in fields.values() {
        input.push_str(&value.to_lowercase());
    }
    input.push_str(secret);

    let mut hasher = Sha512::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares two hex digests case-insensitively in constant time.
pub fn hashes_match(expected: &str, received: &str) -> bool {
    let expected = expected.to_lowercase();
    let received = received.to_lowercase();
    expected
        .as_bytes()
        .ct_eq(received.as_bytes())
        .unwrap_u8()
        == 1
}

/// Renders a JSON value the way it participates in hashing: strings as-is,
/// numbers and booleans via their display form, null as the empty string.
/// Nested values never arrive from the gateway but are kept deterministic
/// as compact JSON.
pub fn field_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
