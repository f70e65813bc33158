//! Label obfuscation scheme for domain names.
//!
//! The subgraph returns a domain name with every label it cannot resolve
//! replaced by its bracketed keccak hash, e.g. `[8a9e…f1].eth`. A name is
//! "decrypted" once no such bracketed label remains. Decryption is a lookup
//! against labels learned from the same query results.

use std::collections::HashMap;

use alloy_primitives::keccak256;

use crate::record::NameRecord;

/// Is this single label still in `[64-hex-digit]` hashed form?
fn is_encrypted_label(label: &str) -> bool {
    let Some(inner) = label.strip_prefix('[').and_then(|l| l.strip_suffix(']')) else {
        return false;
    };
    inner.len() == 64 && inner.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A name is decrypted when every dot-separated label is plain.
pub fn is_decrypted(name: &str) -> bool {
    !name.split('.').any(is_encrypted_label)
}

/// Plain labels indexed by their keccak hash (lowercase hex, no prefix).
#[derive(Clone, Debug, Default)]
pub struct LabelMap {
    labels: HashMap<String, String>,
}

impl LabelMap {
    /// Collect every label the subgraph results reveal: explicit
    /// label-name/label-hash pairs, plus the labels of any name that is
    /// already fully plain.
    pub fn from_records(records: &[NameRecord]) -> Self {
        let mut map = Self::default();
        for record in records {
            if let (Some(label), Some(hash)) = (&record.label_name, &record.label_hash) {
                map.insert(hash, label);
            }
            if is_decrypted(&record.name) {
                map.learn_name(&record.name);
            }
        }
        map
    }

    fn insert(&mut self, hash: &str, label: &str) {
        let key = hash.strip_prefix("0x").unwrap_or(hash).to_lowercase();
        self.labels.insert(key, label.to_string());
    }

    /// Index each label of a plain name by its hash, so it can decrypt the
    /// same label appearing hashed elsewhere.
    pub fn learn_name(&mut self, name: &str) {
        for label in name.split('.').filter(|l| !l.is_empty()) {
            let hash = hex::encode(keccak256(label.as_bytes()));
            self.labels.insert(hash, label.to_string());
        }
    }

    fn lookup(&self, hashed_label: &str) -> Option<&str> {
        let inner = hashed_label
            .strip_prefix('[')?
            .strip_suffix(']')?
            .to_lowercase();
        self.labels.get(&inner).map(String::as_str)
    }

    /// Replace every known hashed label with its plain form. Unknown hashes
    /// are left bracketed, so the result still fails [`is_decrypted`] and
    /// the caller can discard it.
    pub fn decrypt_name(&self, name: &str) -> String {
        name.split('.')
            .map(|label| {
                if is_encrypted_label(label) {
                    self.lookup(label).unwrap_or(label).to_string()
                } else {
                    label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashed(label: &str) -> String {
        format!("[{}]", hex::encode(keccak256(label.as_bytes())))
    }

    #[test]
    fn plain_names_are_decrypted() {
        assert!(is_decrypted("alice.eth"));
        assert!(is_decrypted("sub.alice.eth"));
        // Brackets without a 64-hex body are an odd but plain label.
        assert!(is_decrypted("[not-a-hash].eth"));
    }

    #[test]
    fn hashed_labels_are_not_decrypted() {
        assert!(!is_decrypted(&format!("{}.eth", hashed("alice"))));
        assert!(!is_decrypted(&format!("sub.{}.eth", hashed("alice"))));
    }

    #[test]
    fn decrypts_known_label() {
        let mut map = LabelMap::default();
        map.learn_name("alice.eth");
        let name = format!("{}.eth", hashed("alice"));
        assert_eq!(map.decrypt_name(&name), "alice.eth");
    }

    #[test]
    fn unknown_label_stays_bracketed() {
        let map = LabelMap::default();
        let name = format!("{}.eth", hashed("nobody"));
        let decrypted = map.decrypt_name(&name);
        assert_eq!(decrypted, name);
        assert!(!is_decrypted(&decrypted));
    }

    #[test]
    fn from_records_uses_explicit_label_pairs() {
        let records = vec![NameRecord {
            name: format!("{}.eth", hashed("carol")),
            label_name: Some("carol".to_string()),
            label_hash: Some(format!("0x{}", hex::encode(keccak256(b"carol")))),
        }];
        let map = LabelMap::from_records(&records);
        assert_eq!(map.decrypt_name(&records[0].name), "carol.eth");
    }

    #[test]
    fn from_records_learns_from_plain_siblings() {
        let records = vec![
            NameRecord {
                name: "bob.eth".to_string(),
                label_name: None,
                label_hash: None,
            },
            NameRecord {
                name: format!("{}.eth", hashed("bob")),
                label_name: None,
                label_hash: None,
            },
        ];
        let map = LabelMap::from_records(&records);
        assert_eq!(map.decrypt_name(&records[1].name), "bob.eth");
    }
}
