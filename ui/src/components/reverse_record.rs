//=============================================================================
// File: src/components/reverse_record.rs
//=============================================================================
#![allow(non_snake_case)]

use dioxus::prelude::*;

use api::record::accounts_match;
use api::record::has_valid_reverse_record;
use api::record::EMPTY_ADDRESS;

use crate::components::name_select::NameSelect;
use crate::components::pending_tx::PendingTx;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Modal;
use crate::components::save_cancel::SaveCancel;
use crate::hooks::use_editable::should_auto_open;
use crate::hooks::use_editable::use_editable;
use crate::i18n;
use crate::i18n::t;
use crate::name_options::resolve_options;
use crate::name_options::NameOption;

/// Which of the three presentations the component is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub(crate) enum ViewState {
    Loading,
    ReadOnly,
    Editable,
}

/// Pure view selection: the in-flight record read gates everything;
/// otherwise ownership of the viewed address decides.
pub(crate) fn view_state(
    loading: bool,
    account: Option<&str>,
    current_address: &str,
) -> ViewState {
    if loading {
        ViewState::Loading
    } else if account.is_some_and(|a| accounts_match(a, current_address)) {
        ViewState::Editable
    } else {
        ViewState::ReadOnly
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ReverseRecordCardProps {
    /// The viewer's connected account, if any.
    pub account: Option<String>,
    /// The address whose reverse record is displayed.
    pub current_address: String,
}

/// Displays and, for the owner of the address, edits its reverse record.
///
/// Instances are keyed on (account, address) by the caller: the fetch
/// closures and the one-shot auto-open guard belong to a single pair.
#[component]
pub fn ReverseRecordCard(props: ReverseRecordCardProps) -> Element {
    let mut editable = use_editable();
    let mut selected = use_signal(|| None::<NameOption>);
    let mut delete_modal_open = use_signal(|| false);
    let mut error_modal_open = use_signal(|| false);
    let mut error_message = use_signal(String::new);
    let mut auto_opened = use_signal(|| false);

    let record_address = props.current_address.clone();
    let mut record_resource = use_resource(move || {
        let address = record_address.clone();
        async move { api::reverse_record(address).await }
    });

    let names_address = props.current_address.clone();
    let mut names_resource = use_resource(move || {
        let address = names_address.clone();
        async move { api::names_for_address(address).await }
    });

    let record = use_memo(move || match &*record_resource.read() {
        Some(Ok(record)) => record.clone(),
        _ => None,
    });
    let record_loaded = use_memo(move || matches!(&*record_resource.read(), Some(Ok(_))));
    let record_error = use_memo(move || match &*record_resource.read() {
        Some(Err(e)) => Some(e.to_string()),
        _ => None,
    });

    let options = use_memo(move || match &*names_resource.read() {
        Some(Ok(records)) => resolve_options(records),
        _ => Vec::new(),
    });
    let names_error = use_memo(move || match &*names_resource.read() {
        Some(Err(e)) => Some(e.to_string()),
        _ => None,
    });
    let names_loading = use_memo(move || names_resource.read().is_none());

    let owns_address = props
        .account
        .as_deref()
        .is_some_and(|a| accounts_match(a, &props.current_address));

    // Auto-open the editor for an owner with no record. The guard re-arms
    // once a record appears, so clearing the record later auto-opens again
    // (once per record-less episode). Reads of the guard go through peek to
    // keep this effect from subscribing to its own writes.
    use_effect(move || {
        let loaded = record_loaded();
        let has_record = has_valid_reverse_record(record.read().as_ref());
        if loaded && has_record {
            if *auto_opened.peek() {
                auto_opened.set(false);
            }
        } else if should_auto_open(
            owns_address,
            loaded,
            has_record,
            editable.editing(),
            *auto_opened.peek(),
        ) {
            editable.start_editing();
            auto_opened.set(true);
        }
    });

    let loading = record_resource.read().is_none();
    let view = view_state(loading, props.account.as_deref(), &props.current_address);

    let has_record = has_valid_reverse_record(record.read().as_ref());
    let summary_set_text = if has_record {
        record
            .read()
            .as_ref()
            .map(|r| format!("{}{}", t("record.set_to"), r.name))
    } else {
        None
    };
    let example_name = record
        .read()
        .as_ref()
        .filter(|_| has_record)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| "example.eth".to_string());
    let account_display = props.account.clone().unwrap_or_default();
    let explanation_text = i18n::explanation(&example_name, &account_display);

    // --- Selector State ---
    enum NamesView {
        Loading,
        Error(String),
        Options(Vec<NameOption>),
    }
    let names_view = if names_loading() {
        NamesView::Loading
    } else if let Some(err) = names_error() {
        NamesView::Error(err)
    } else {
        NamesView::Options(options())
    };

    rsx! {
        // --- Modals ---
        Modal {
            is_open: error_modal_open,
            title: t("record.error_title").to_string(),
            p { "{error_message}" }
            footer {
                Button {
                    on_click: move |_| error_modal_open.set(false),
                    "Close"
                }
            }
        }
        Modal {
            is_open: delete_modal_open,
            title: t("record.removal_title").to_string(),
            p { {t("record.removal_confirm")} }
            SaveCancel {
                is_valid: true,
                on_save: move |_| {
                    spawn(async move {
                        match api::set_reverse_name(EMPTY_ADDRESS.to_string()).await {
                            Ok(tx_hash) => editable.start_pending(tx_hash),
                            Err(e) => {
                                error_message.set(e.to_string());
                                error_modal_open.set(true);
                            }
                        }
                    });
                    delete_modal_open.set(false);
                    editable.stop_editing();
                },
                on_cancel: move |_| {
                    delete_modal_open.set(false);
                    editable.stop_editing();
                },
            }
        }

        Card {
            if let Some(err) = record_error() {
                p { style: "color: var(--pico-color-red-500);", "{err}" }
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| record_resource.restart(),
                    "Retry"
                }
            } else {
                match view {
                    ViewState::Loading => rsx! {
                        span {
                            style: "color: var(--pico-muted-color);",
                            {t("record.loading")}
                        }
                        progress {}
                    },
                    ViewState::ReadOnly => rsx! {
                        div {
                            style: "display: flex; align-items: center; font-size: 0.9rem;",
                            if let Some(text) = summary_set_text.clone() {
                                div {
                                    style: "display: flex; align-items: center; gap: 0.5rem;",
                                    span { style: "color: var(--pico-ins-color);", "✓" }
                                    "{text}"
                                }
                            } else {
                                div {
                                    style: "color: var(--pico-muted-color);",
                                    {t("record.not_set")}
                                }
                            }
                        }
                    },
                    ViewState::Editable => rsx! {
                        div {
                            style: "display: flex; align-items: center; justify-content: space-between; cursor: pointer; font-weight: 700; font-size: 0.9rem;",
                            onclick: move |_| {
                                if editable.editing() {
                                    editable.stop_editing();
                                } else {
                                    editable.start_editing();
                                }
                            },
                            if let Some(text) = summary_set_text.clone() {
                                div {
                                    style: "display: flex; align-items: center; gap: 0.5rem;",
                                    span { style: "color: var(--pico-ins-color);", "✓" }
                                    "{text}"
                                }
                            } else {
                                div {
                                    style: "color: var(--pico-primary);",
                                    {t("record.not_set")}
                                }
                            }
                            if editable.show_pending() {
                                PendingTx {
                                    tx_hash: editable.tx_hash().unwrap_or_default(),
                                    on_confirmed: move |_| {
                                        editable.set_confirmed();
                                        record_resource.restart();
                                    },
                                }
                            } else {
                                RotatingCaret { rotated: editable.editing() }
                            }
                        }
                        if editable.editing() {
                            div {
                                style: "margin-top: 1rem; padding: 0.5rem;",
                                p {
                                    style: "font-weight: 300; line-height: 1.6; max-width: 768px;",
                                    "{explanation_text}"
                                }
                                match names_view {
                                    NamesView::Loading => rsx! {
                                        span {
                                            style: "color: var(--pico-muted-color);",
                                            {t("record.names_loading")}
                                        }
                                    },
                                    NamesView::Error(err) => rsx! {
                                        div {
                                            style: "color: var(--pico-color-amber-500);",
                                            "{err}"
                                        }
                                        Button {
                                            button_type: ButtonType::Secondary,
                                            outline: true,
                                            on_click: move |_| names_resource.restart(),
                                            "Retry"
                                        }
                                    },
                                    NamesView::Options(opts) if opts.is_empty() => rsx! {
                                        div {
                                            style: "color: var(--pico-color-amber-500);",
                                            {t("record.no_forward_records")}
                                        }
                                    },
                                    NamesView::Options(opts) => rsx! {
                                        NameSelect {
                                            options: opts,
                                            selected,
                                            placeholder: t("record.select_placeholder").to_string(),
                                        }
                                    },
                                }
                                p {
                                    small { {t("record.selection_note")} }
                                }
                                div {
                                    style: "display: flex; flex-direction: row-reverse; justify-content: space-between; align-items: center; margin-top: 0.5rem;",
                                    SaveCancel {
                                        is_valid: selected.read().is_some(),
                                        on_save: move |_| {
                                            let Some(option) = selected() else { return };
                                            spawn(async move {
                                                match api::set_reverse_name(option.value).await {
                                                    Ok(tx_hash) => editable.start_pending(tx_hash),
                                                    Err(e) => {
                                                        error_message.set(e.to_string());
                                                        error_modal_open.set(true);
                                                    }
                                                }
                                            });
                                        },
                                        on_cancel: move |_| editable.stop_editing(),
                                    }
                                    if has_record {
                                        Button {
                                            button_type: ButtonType::Secondary,
                                            outline: true,
                                            on_click: move |_| delete_modal_open.set(true),
                                            {t("record.delete")}
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

/// The caret at the right edge of the summary row; rotates while the
/// editor below it is open.
#[component]
fn RotatingCaret(rotated: bool) -> Element {
    let transform = if rotated { "rotate(90deg)" } else { "rotate(0deg)" };
    rsx! {
        span {
            style: "display: inline-block; transition: transform 0.2s ease; transform: {transform};",
            "❯"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "0xAbCd00000000000000000000000000000000Ef12";
    const OTHER: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn loading_gates_everything() {
        assert!(view_state(true, Some(OWNER), OWNER).is_loading());
        assert!(view_state(true, None, OWNER).is_loading());
    }

    #[test]
    fn owner_gets_the_editable_view_case_insensitively() {
        assert!(view_state(false, Some(OWNER), &OWNER.to_lowercase()).is_editable());
        assert!(view_state(false, Some(&OWNER.to_lowercase()), OWNER).is_editable());
    }

    #[test]
    fn other_viewers_are_read_only() {
        assert!(view_state(false, Some(OTHER), OWNER).is_read_only());
        assert!(view_state(false, None, OWNER).is_read_only());
        assert!(view_state(false, Some(""), OWNER).is_read_only());
    }
}
