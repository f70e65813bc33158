//! This crate contains all shared fullstack server functions.

#[cfg(not(target_arch = "wasm32"))]
mod eth_rpc;
pub mod labels;
pub mod record;
#[cfg(not(target_arch = "wasm32"))]
mod subgraph;

use dioxus::prelude::*;

use record::NameRecord;
use record::ReverseRecord;

pub type ApiError = anyhow::Error;

/// The account the backing node signs with, if it controls one. This is the
/// viewer's identity for edit-permission checks.
#[post("/api/connected_account")]
pub async fn connected_account() -> Result<Option<String>, ApiError> {
    let accounts = eth_rpc::accounts().await?;
    Ok(accounts.into_iter().next())
}

/// Chain id of the connected node.
#[post("/api/network")]
pub async fn network() -> Result<u64, ApiError> {
    eth_rpc::chain_id().await
}

/// The reverse record currently set for `address`, if any.
#[post("/api/reverse_record")]
pub async fn reverse_record(address: String) -> Result<Option<ReverseRecord>, ApiError> {
    eth_rpc::get_reverse_record(&address).await
}

/// All forward records resolving to `address`, with label data for
/// client-side decryption.
#[post("/api/names_for_address")]
pub async fn names_for_address(address: String) -> Result<Vec<NameRecord>, ApiError> {
    subgraph::names_for_address(&address).await
}

/// Submit a reverse-record update. Pass [`record::EMPTY_ADDRESS`] to clear
/// the record. Returns the transaction hash.
#[post("/api/set_reverse_name")]
pub async fn set_reverse_name(name: String) -> Result<String, ApiError> {
    let tx_hash = eth_rpc::send_set_name(&name).await?;
    dioxus_logger::tracing::info!("setName({name}) submitted: {tx_hash}");
    Ok(tx_hash)
}

/// Whether a submitted transaction has been mined.
#[post("/api/transaction_confirmed")]
pub async fn transaction_confirmed(tx_hash: String) -> Result<bool, ApiError> {
    eth_rpc::transaction_confirmed(&tx_hash).await
}
