//! Shared data model for reverse-record lookups.

use serde::Deserialize;
use serde::Serialize;

use crate::labels;

/// The all-zero address. Submitting it as the name argument of a
/// `setName` transaction clears the reverse record.
pub const EMPTY_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// The reverse record currently set for an address, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseRecord {
    pub name: String,
}

/// One forward-record result from the subgraph: a domain that resolves to
/// the queried address. `name` may still contain bracketed label hashes;
/// `label_name`/`label_hash` carry the leaf label when the subgraph knows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
    pub label_name: Option<String>,
    pub label_hash: Option<String>,
}

/// A reverse record counts as set only when it is present, non-empty, and
/// fully human-readable.
pub fn has_valid_reverse_record(record: Option<&ReverseRecord>) -> bool {
    match record {
        Some(r) => !r.name.is_empty() && r.name != EMPTY_ADDRESS && labels::is_decrypted(&r.name),
        None => false,
    }
}

/// Whether the viewer's connected account controls the viewed address.
/// Ethereum addresses compare case-insensitively (checksum casing varies).
pub fn accounts_match(account: &str, current_address: &str) -> bool {
    !account.is_empty()
        && !current_address.is_empty()
        && account.eq_ignore_ascii_case(current_address)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ReverseRecord {
        ReverseRecord {
            name: name.to_string(),
        }
    }

    #[test]
    fn absent_record_is_not_valid() {
        assert!(!has_valid_reverse_record(None));
    }

    #[test]
    fn empty_name_is_not_valid() {
        assert!(!has_valid_reverse_record(Some(&record(""))));
    }

    #[test]
    fn undecrypted_name_is_not_valid() {
        let hashed = format!("[{}].eth", "ab".repeat(32));
        assert!(!has_valid_reverse_record(Some(&record(&hashed))));
    }

    #[test]
    fn plain_name_is_valid() {
        assert!(has_valid_reverse_record(Some(&record("alice.eth"))));
    }

    #[test]
    fn accounts_match_ignores_case() {
        let a = "0xAbCd00000000000000000000000000000000Ef12";
        let b = "0xabcd00000000000000000000000000000000ef12";
        assert!(accounts_match(a, b));
        assert!(!accounts_match(a, EMPTY_ADDRESS));
    }

    #[test]
    fn empty_account_never_matches() {
        assert!(!accounts_match("", ""));
        assert!(!accounts_match("", EMPTY_ADDRESS));
    }
}
