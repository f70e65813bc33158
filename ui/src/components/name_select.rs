// ui/src/components/name_select.rs
#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::name_options::NameOption;

#[derive(Props, PartialEq, Clone)]
pub struct NameSelectProps {
    /// The resolved candidate names, already deduplicated and sorted.
    pub options: Vec<NameOption>,
    /// The current selection; `None` until the user picks one or after
    /// clearing.
    pub selected: Signal<Option<NameOption>>,
    pub placeholder: String,
}

/// A clearable dropdown selector for candidate names.
pub fn NameSelect(mut props: NameSelectProps) -> Element {
    let mut is_open = use_signal(|| false);

    let display = props.selected.read().as_ref().map(|o| o.label.clone());
    let has_selection = display.is_some();

    rsx! {
        div {
            style: "position: relative;",
            div {
                class: "secondary",
                style: "
                    display: flex;
                    align-items: center;
                    border: 1px solid var(--pico-form-element-border-color);
                    border-radius: var(--pico-border-radius);
                    line-height: 1.2;
                    cursor: pointer;
                    ",
                div {
                    style: "flex-grow: 1; padding: 0.5rem 0.75rem;",
                    onclick: move |_| is_open.toggle(),
                    if let Some(label) = display {
                        "{label}"
                    } else {
                        span {
                            style: "color: var(--pico-muted-color);",
                            "{props.placeholder}"
                        }
                    }
                }
                if has_selection {
                    div {
                        style: "border-left: 1px solid var(--pico-secondary-border); padding: 0.5rem 0.75rem;",
                        title: "Clear selection",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            props.selected.set(None);
                        },
                        "×"
                    }
                }
                div {
                    style: "border-left: 1px solid var(--pico-secondary-border); padding: 0.5rem 0.75rem;",
                    onclick: move |_| is_open.toggle(),
                    "↓"
                }
            }
            if is_open() {
                // Backdrop to catch clicks outside the dropdown
                div {
                    style: "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; z-index: 9; background: transparent;",
                    onclick: move |_| is_open.set(false),
                }
                div {
                    onclick: |e| e.stop_propagation(),
                    style: "
                        position: absolute;
                        min-width: 100%;
                        z-index: 10;
                        background-color: var(--pico-card-background-color);
                        border: 1px solid var(--pico-card-border-color);
                        border-radius: var(--pico-border-radius);
                        padding: 0.25rem;
                        margin-top: 0.25rem;
                    ",
                    ul {
                        role: "listbox",
                        style: "list-style: none; margin: 0; padding: 0; max-height: 250px; overflow-y: auto;",
                        {
                            props.options
                                .iter()
                                .cloned()
                                .map(|option| {
                                    let is_selected =
                                        props.selected.read().as_ref() == Some(&option);
                                    let value = option.value.clone();
                                    let label = option.label.clone();
                                    rsx! {
                                        li {
                                            key: "{value}",
                                            style: "display: flex; align-items: center; cursor: pointer; padding: 0.3rem 0.5rem; white-space: nowrap;",
                                            onclick: move |_| {
                                                props.selected.set(Some(option.clone()));
                                                is_open.set(false);
                                            },
                                            if is_selected {
                                                span { style: "width: 1.5rem;", "✓" }
                                            } else {
                                                span { style: "width: 1.5rem; visibility: hidden;", "✓" }
                                            }
                                            span { "{label}" }
                                        }
                                    }
                                })
                        }
                    }
                }
            }
        }
    }
}
