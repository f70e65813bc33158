//! Turns raw forward-record results into the editor's selectable options.

use api::labels;
use api::labels::LabelMap;
use api::record::NameRecord;
use itertools::Itertools;

/// A selectable candidate name. `value` is submitted, `label` displayed;
/// they coincide for plain names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameOption {
    pub value: String,
    pub label: String,
}

/// Resolve forward-record results into options: decrypt what the label map
/// can, drop what stays hashed, then deduplicate and sort ascending.
pub fn resolve_options(records: &[NameRecord]) -> Vec<NameOption> {
    let label_map = LabelMap::from_records(records);
    records
        .iter()
        .filter_map(|record| {
            if labels::is_decrypted(&record.name) {
                return Some(record.name.clone());
            }
            let decrypted = label_map.decrypt_name(&record.name);
            // A label the map doesn't know stays bracketed; not an error.
            labels::is_decrypted(&decrypted).then_some(decrypted)
        })
        .sorted()
        .dedup()
        .map(|name| NameOption {
            value: name.clone(),
            label: name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    fn plain(name: &str) -> NameRecord {
        NameRecord {
            name: name.to_string(),
            label_name: None,
            label_hash: None,
        }
    }

    fn hashed_label(label: &str) -> String {
        format!("[{}]", hex::encode(keccak256(label.as_bytes())))
    }

    #[test]
    fn options_are_deduplicated_and_sorted() {
        let records = vec![plain("b.eth"), plain("a.eth"), plain("a.eth")];
        let options = resolve_options(&records);
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["a.eth", "b.eth"]);
    }

    #[test]
    fn labels_match_values() {
        let options = resolve_options(&[plain("a.eth")]);
        assert_eq!(options[0].label, options[0].value);
    }

    #[test]
    fn undecryptable_entries_are_dropped() {
        let records = vec![plain("a.eth"), plain(&format!("{}.eth", hashed_label("secret")))];
        let options = resolve_options(&records);
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["a.eth"]);
    }

    #[test]
    fn decryptable_entries_are_recovered() {
        let records = vec![NameRecord {
            name: format!("{}.eth", hashed_label("carol")),
            label_name: Some("carol".to_string()),
            label_hash: Some(format!("0x{}", hex::encode(keccak256(b"carol")))),
        }];
        let options = resolve_options(&records);
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["carol.eth"]);
    }

    #[test]
    fn empty_input_yields_no_options() {
        assert!(resolve_options(&[]).is_empty());
    }
}
