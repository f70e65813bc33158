#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::i18n::t;

#[derive(Props, Clone, PartialEq)]
pub struct SaveCancelProps {
    /// Save stays disabled until the surrounding form is submittable.
    pub is_valid: bool,
    pub on_save: EventHandler<()>,
    pub on_cancel: EventHandler<()>,
}

/// The save/cancel button pair used at the foot of every editor.
#[component]
pub fn SaveCancel(props: SaveCancelProps) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: row-reverse; gap: 0.5rem;",
            Button {
                disabled: !props.is_valid,
                on_click: move |_| props.on_save.call(()),
                {t("record.save")}
            }
            Button {
                button_type: ButtonType::Secondary,
                outline: true,
                on_click: move |_| props.on_cancel.call(()),
                {t("record.cancel")}
            }
        }
    }
}
