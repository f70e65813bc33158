// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
pub mod compat;
mod components;
pub mod hooks;
mod i18n;
mod name_options;
mod screens;

use app_state::AppState;
use components::pico::Container;
use screens::address::AddressScreen;

#[allow(non_snake_case)]
pub fn App() -> Element {
    let app_css = r#"
    * { box-sizing: border-box; }

    html, body {
        height: 100%;
        width: 100%;
        margin: 0;
        padding: 0;
        background-color: var(--muted-border-color);
    }

    .app-main-container {
        padding: 10px;
        display: flex;
        flex-direction: column;
        background-color: var(--background-color);
    }

    .app-main-container header {
        flex-shrink: 0;
        padding: 0 1rem;
        margin-bottom: 0;
    }

    .app-main-container .content {
        flex: 1;
        display: flex;
        flex-direction: column;
        padding: 0 1rem;
        margin-top: 0;
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css",
        }
        style {
            "{app_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // this will be processed on server before initial page is delivered.
    let initial_data_future = use_server_future(move || async move {
        // call the server apis concurrently
        let (network_result, account_result) =
            futures::join!(api::network(), api::connected_account());

        let network = match network_result {
            Ok(n) => n,
            Err(e) => return Err(e),
        };
        let account = match account_result {
            Ok(a) => a,
            Err(e) => return Err(e),
        };

        dioxus_logger::tracing::info!("network: {network}, account: {account:?}");

        Ok((network, account))
    })?;

    // Read from the single future to ensure it's polled during SSR.
    let body = match &*initial_data_future.read() {
        Some(Ok((network, account))) => {
            rsx! {
                LoadedApp {
                    app_state: AppState::new(*network, account.clone()),
                }
            }
        }
        Some(Err(e)) => rsx! {
            p {
                "An error occurred: {e}"
            }
        },
        _ => rsx! {
            p {
                "Loading..."
            }
        },
    };
    body
}

/// This component holds the main app logic and only runs when data is ready.
#[component]
fn LoadedApp(app_state: AppState) -> Element {
    // Provide the stable, non-reactive AppState.
    use_context_provider(|| app_state.clone());

    rsx! {
        div {
            class: "app-main-container",
            Container {
                header {
                    nav {
                        ul {
                            li {
                                h1 {
                                    style: "margin: 0; font-size: 1.5rem;",
                                    "Primary Name"
                                }
                            }
                        }
                        ul {
                            li {
                                if let Some(account) = &app_state.account {
                                    code { "{account}" }
                                } else {
                                    span {
                                        style: "color: var(--pico-muted-color);",
                                        "no account connected"
                                    }
                                }
                            }
                        }
                    }
                }
                div {
                    class: "content",
                    AddressScreen {}
                }
            }
        }
    }
}
