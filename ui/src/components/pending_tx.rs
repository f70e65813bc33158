#![allow(non_snake_case)]

use std::time::Duration;

use dioxus::prelude::*;

use crate::compat;
use crate::i18n::t;

const POLL_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Props, Clone, PartialEq)]
pub struct PendingTxProps {
    pub tx_hash: String,
    /// Invoked once, when the transaction is first observed mined.
    pub on_confirmed: EventHandler<()>,
}

/// Inline pending-transaction indicator. Polls the receipt until the
/// transaction lands, then fires `on_confirmed` and stops.
#[component]
pub fn PendingTx(props: PendingTxProps) -> Element {
    let tx_hash = props.tx_hash.clone();
    let on_confirmed = props.on_confirmed;

    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let tx_hash = tx_hash.clone();
        async move {
            loop {
                compat::sleep(POLL_INTERVAL).await;
                match api::transaction_confirmed(tx_hash.clone()).await {
                    Ok(true) => {
                        on_confirmed.call(());
                        break;
                    }
                    Ok(false) => {}
                    // Keep polling; a flaky node read is not a lost tx.
                    Err(e) => {
                        dioxus_logger::tracing::warn!("receipt poll for {tx_hash} failed: {e}")
                    }
                }
            }
        }
    });

    let abbreviated = abbreviate_hash(&props.tx_hash);
    rsx! {
        span {
            "aria-busy": "true",
            title: "{props.tx_hash}",
            style: "color: var(--pico-muted-color); white-space: nowrap;",
            {t("record.pending")}
            " {abbreviated}"
        }
    }
}

fn abbreviate_hash(hash: &str) -> String {
    if hash.len() <= 12 {
        hash.to_string()
    } else {
        format!("{}…{}", &hash[..8], &hash[hash.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hashes_pass_through() {
        assert_eq!(abbreviate_hash("0xabc"), "0xabc");
    }

    #[test]
    fn long_hashes_keep_both_ends() {
        let hash = format!("0x{}", "5".repeat(64));
        let abbreviated = abbreviate_hash(&hash);
        assert!(abbreviated.starts_with("0x555555"));
        assert!(abbreviated.ends_with("5555"));
        assert!(abbreviated.len() < hash.len());
    }
}
