//=============================================================================
// File: src/screens/address.rs
//=============================================================================
use dioxus::prelude::*;

use crate::components::pico::Card;
use crate::components::reverse_record::ReverseRecordCard;
use crate::AppState;

/// The address screen: pick an address, see and (when it is yours) edit
/// its reverse record. Defaults to the connected account.
#[component]
pub fn AddressScreen() -> Element {
    let app_state = use_context::<AppState>();
    let account = app_state.account.clone();

    let initial = app_state.account.clone().unwrap_or_default();
    let mut current_address = use_signal(|| initial.clone());
    let mut address_input = use_signal(|| initial);

    rsx! {
        Card {
            h3 { "Address" }
            form {
                onsubmit: move |evt| {
                    evt.prevent_default();
                    current_address.set(address_input().trim().to_string());
                },
                input {
                    r#type: "text",
                    name: "address",
                    placeholder: "0x…",
                    value: "{address_input}",
                    oninput: move |evt| address_input.set(evt.value()),
                }
            }
            if !current_address().is_empty() {
                p {
                    code { "{current_address}" }
                }
            }
        }
        if !current_address().is_empty() {
            // Remount on account/address change: the record card's fetches
            // and one-shot auto-open guard are per (account, address) pair.
            ReverseRecordCard {
                key: "{account:?}-{current_address}",
                account: account.clone(),
                current_address: current_address(),
            }
        }
    }
}
