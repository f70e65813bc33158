use dioxus::prelude::*;

/// Transient state of one reverse-record edit session. Owned by a single
/// component instance and dropped with it; nothing here is persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditableState {
    pub editing: bool,
    pub tx_hash: Option<String>,
    pub pending: bool,
    pub confirmed: bool,
}

impl EditableState {
    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    /// A mutation was submitted; remember its hash and enter the pending
    /// phase. A new submission supersedes the confirmation of an old one.
    pub fn start_pending(&mut self, tx_hash: String) {
        self.pending = true;
        self.confirmed = false;
        self.tx_hash = Some(tx_hash);
    }

    /// The pending transaction was observed mined. The caller is expected
    /// to refetch the reverse record afterwards.
    pub fn set_confirmed(&mut self) {
        self.confirmed = true;
    }

    /// The summary row shows the pending indicator, displacing the caret,
    /// only while a submitted transaction is still unconfirmed.
    pub fn show_pending(&self) -> bool {
        self.pending && !self.confirmed && self.tx_hash.is_some()
    }
}

/// Copyable handle over the edit-session signal, for passing into event
/// handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct Editable {
    state: Signal<EditableState>,
}

impl Editable {
    pub fn editing(&self) -> bool {
        self.state.read().editing
    }

    pub fn show_pending(&self) -> bool {
        self.state.read().show_pending()
    }

    pub fn tx_hash(&self) -> Option<String> {
        self.state.read().tx_hash.clone()
    }

    pub fn start_editing(&mut self) {
        self.state.with_mut(EditableState::start_editing);
    }

    pub fn stop_editing(&mut self) {
        self.state.with_mut(EditableState::stop_editing);
    }

    pub fn start_pending(&mut self, tx_hash: String) {
        self.state.with_mut(|s| s.start_pending(tx_hash));
    }

    pub fn set_confirmed(&mut self) {
        self.state.with_mut(EditableState::set_confirmed);
    }
}

pub fn use_editable() -> Editable {
    Editable {
        state: use_signal(EditableState::default),
    }
}

/// Should the editor open itself? Only for a viewer who owns the address,
/// only once the record read has settled and found nothing, never on top of
/// an already-open editor, and at most once per (account, address) pair —
/// the caller keeps `already_fired` per pair.
pub fn should_auto_open(
    owns_address: bool,
    record_loaded: bool,
    has_record: bool,
    editing: bool,
    already_fired: bool,
) -> bool {
    owns_address && record_loaded && !has_record && !editing && !already_fired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_inert() {
        let state = EditableState::default();
        assert!(!state.editing);
        assert!(!state.pending);
        assert!(!state.confirmed);
        assert_eq!(state.tx_hash, None);
        assert!(!state.show_pending());
    }

    #[test]
    fn edit_toggle_round_trip() {
        let mut state = EditableState::default();
        state.start_editing();
        assert!(state.editing);
        state.stop_editing();
        assert!(!state.editing);
    }

    #[test]
    fn pending_until_confirmed() {
        let mut state = EditableState::default();
        state.start_pending("0xabc".to_string());
        assert!(state.show_pending());
        assert_eq!(state.tx_hash.as_deref(), Some("0xabc"));

        state.set_confirmed();
        assert!(state.confirmed);
        assert!(!state.show_pending());
    }

    #[test]
    fn resubmission_supersedes_old_confirmation() {
        let mut state = EditableState::default();
        state.start_pending("0xaaa".to_string());
        state.set_confirmed();

        state.start_pending("0xbbb".to_string());
        assert!(!state.confirmed);
        assert!(state.show_pending());
        assert_eq!(state.tx_hash.as_deref(), Some("0xbbb"));
    }

    #[test]
    fn auto_open_requires_settled_empty_record_and_ownership() {
        // owner, record read settled, nothing found: open
        assert!(should_auto_open(true, true, false, false, false));
        // read-only viewer: never
        assert!(!should_auto_open(false, true, false, false, false));
        // record exists: never
        assert!(!should_auto_open(true, true, true, false, false));
        // still loading: wait
        assert!(!should_auto_open(true, false, false, false, false));
        // already editing: leave alone
        assert!(!should_auto_open(true, true, false, true, false));
        // fired once for this pair already
        assert!(!should_auto_open(true, true, false, false, true));
    }
}
