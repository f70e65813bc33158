//! Display-string lookup keyed by message identifier.
//!
//! A single English catalog for now; the identifiers are stable so other
//! catalogs can be added without touching call sites.

/// Resolve a message identifier to its display text. Unknown identifiers
/// fall through unchanged, which makes a missing entry visible in the UI
/// instead of panicking.
pub fn t(key: &str) -> &str {
    match key {
        "record.loading" => "Loading reverse record...",
        "record.set_to" => "Reverse record: set to ",
        "record.not_set" => "Reverse record: not set",
        "record.select_placeholder" => "Select a name",
        "record.no_forward_records" => {
            "No name points at this address yet, so there is nothing to select."
        }
        "record.names_loading" => "Loading your names...",
        "record.removal_title" => "Clear reverse record",
        "record.removal_confirm" => {
            "This clears the name other applications display for this address. Continue?"
        }
        "record.selection_note" => "You can only select names that resolve to this address.",
        "record.save" => "Save",
        "record.cancel" => "Cancel",
        "record.delete" => "Delete",
        "record.pending" => "Tx pending",
        "record.error_title" => "Error",
        _ => key,
    }
}

/// The editor's explanation paragraph, with the viewer's own values filled
/// in.
pub fn explanation(example_name: &str, account: &str) -> String {
    format!(
        "Reverse resolution translates an address into a name. It lets \
         applications show '{example_name}' in their interfaces rather than \
         the long address '{account}'. To set up the reverse record for a \
         different account, switch accounts in your wallet."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_fall_through() {
        assert_eq!(t("record.nonexistent"), "record.nonexistent");
    }

    #[test]
    fn explanation_interpolates_both_values() {
        let text = explanation("alice.eth", "0xabc");
        assert!(text.contains("alice.eth"));
        assert!(text.contains("0xabc"));
    }
}
