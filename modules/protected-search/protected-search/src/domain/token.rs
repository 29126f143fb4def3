//! Caller token hashing and the `od-protected-tokens` header format.
//!
//! The header carries one `(path,hash),` group per restricted subtree the
//! caller claims access to, concatenated without separators. Paths and hashes
//! must not contain `(`, `)` or `,`; the format has no escaping.

use protected_search_sdk::TokenEntry;
use sha2::{Digest, Sha256};

/// Header carrying the serialized caller tokens.
pub const TOKEN_HEADER: &str = "od-protected-tokens";

/// SHA-256 of `raw`, as lowercase hex.
#[must_use]
pub fn hash_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

#[must_use]
pub fn serialize_tokens(entries: &[TokenEntry]) -> String {
    entries.iter().fold(String::new(), |mut line, entry| {
        line.push('(');
        line.push_str(&entry.path);
        line.push(',');
        line.push_str(&entry.token);
        line.push_str("),");
        line
    })
}

/// Parse a token header. Missing, empty or malformed input degrades to fewer
/// (possibly zero) entries; fragments without a `,` are dropped.
#[must_use]
pub fn deserialize_tokens(line: Option<&str>) -> Vec<TokenEntry> {
    let Some(line) = line else {
        return Vec::new();
    };

    line.split("),")
        .filter(|fragment| !fragment.is_empty())
        .filter_map(|fragment| {
            let fragment = fragment.strip_prefix('(').unwrap_or(fragment);
            fragment
                .split_once(',')
                .map(|(path, token)| TokenEntry::new(path, token))
        })
        .collect()
}

/// Compare a caller's hashed token with a stored plaintext secret.
///
/// The stored secret is trimmed before hashing.
#[must_use]
pub fn compare_hashed_token(hashed_token: &str, stored_secret: &str) -> bool {
    hash_token(stored_secret.trim()) == hashed_token
}
