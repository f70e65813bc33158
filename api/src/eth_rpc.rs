//! JSON-RPC bridge to the Ethereum node, plus the small amount of ABI
//! plumbing the naming contracts need.
//!
//! Reverse resolution walks the registry: `resolver(node)` on the ENS
//! registry, then `name(node)` on the returned resolver, where `node` is the
//! namehash of `"<address-hex>.addr.reverse"`. Writes go through the reverse
//! registrar's `setName(string)`.

use std::str::FromStr;

use alloy_primitives::keccak256;
use alloy_primitives::Address;
use anyhow::anyhow;
use anyhow::bail;
use anyhow::Context;
use serde_json::json;
use serde_json::Value;

use crate::record::ReverseRecord;
use crate::ApiError;

// Function selectors of the naming contracts.
const SEL_RESOLVER: &str = "0178b8bf"; // resolver(bytes32)
const SEL_NAME: &str = "691f3431"; // name(bytes32)
const SEL_SET_NAME: &str = "c47f0027"; // setName(string)

pub fn eth_rpc_url() -> String {
    const DEFAULT_URL: &str = "http://localhost:8545";
    std::env::var("ETH_RPC_URL").unwrap_or_else(|_| DEFAULT_URL.to_string())
}

pub fn ens_registry_address() -> String {
    const DEFAULT_REGISTRY: &str = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e";
    std::env::var("ENS_REGISTRY_ADDRESS").unwrap_or_else(|_| DEFAULT_REGISTRY.to_string())
}

pub fn reverse_registrar_address() -> String {
    const DEFAULT_REVERSE_REGISTRAR: &str = "0x084b1c3C81545d370f3634392De611CaaBFf8148";
    std::env::var("ENS_REVERSE_REGISTRAR_ADDRESS")
        .unwrap_or_else(|_| DEFAULT_REVERSE_REGISTRAR.to_string())
}

async fn rpc(method: &str, params: Value) -> Result<Value, ApiError> {
    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    let client = reqwest::Client::new();
    let body: Value = client
        .post(eth_rpc_url())
        .json(&payload)
        .send()
        .await?
        .json()
        .await
        .with_context(|| format!("{method}: malformed JSON-RPC response"))?;

    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown JSON-RPC error");
        bail!("{method}: {message}");
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| anyhow!("{method}: response carries neither result nor error"))
}

async fn eth_call(to: &str, data: String) -> Result<String, ApiError> {
    let result = rpc("eth_call", json!([{ "to": to, "data": data }, "latest"])).await?;
    result
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("eth_call returned a non-string result"))
}

/// The ENS namehash: a keccak fold over the labels, leaf first into the
/// zero node.
pub fn namehash(name: &str) -> [u8; 32] {
    let mut node = [0u8; 32];
    for label in name.trim().trim_end_matches('.').rsplit('.') {
        if label.is_empty() {
            continue;
        }
        let label_hash = keccak256(label.as_bytes());
        let mut packed = [0u8; 64];
        packed[..32].copy_from_slice(&node);
        packed[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(packed).into();
    }
    node
}

/// The reverse-lookup node for an address: namehash of
/// `"<lowercase-hex-address>.addr.reverse"`.
pub fn reverse_node(address: &str) -> Result<[u8; 32], ApiError> {
    let address = Address::from_str(address)
        .map_err(|e| anyhow!("invalid address {address:?}: {e}"))?;
    Ok(namehash(&format!(
        "{}.addr.reverse",
        hex::encode(address.as_slice())
    )))
}

fn word_call_data(selector: &str, word: &[u8; 32]) -> String {
    format!("0x{selector}{}", hex::encode(word))
}

/// ABI calldata for `setName(string)`: selector, offset word, length word,
/// then the UTF-8 bytes padded to a 32-byte boundary.
pub fn encode_set_name(name: &str) -> String {
    let bytes = name.as_bytes();
    let padded_len = bytes.len().div_ceil(32) * 32;
    let mut data = format!("0x{SEL_SET_NAME}{:064x}{:064x}", 32, bytes.len());
    data.push_str(&hex::encode(bytes));
    data.push_str(&"0".repeat((padded_len - bytes.len()) * 2));
    data
}

/// Malformed return data from an `eth_call`.
#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    #[error("return data is not hex: {0}")]
    NotHex(#[from] hex::FromHexError),
    #[error("return data too short")]
    TooShort,
    #[error("string offset or length out of bounds")]
    OutOfBounds,
    #[error("string payload is not UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

fn word_as_usize(word: &[u8]) -> Result<usize, AbiError> {
    // The high 24 bytes of a sane offset or length word are zero.
    if word[..24].iter().any(|b| *b != 0) {
        return Err(AbiError::OutOfBounds);
    }
    let tail: [u8; 8] = word[24..32].try_into().map_err(|_| AbiError::OutOfBounds)?;
    usize::try_from(u64::from_be_bytes(tail)).map_err(|_| AbiError::OutOfBounds)
}

/// Decode an ABI-encoded `string` return value.
pub fn decode_string_return(result: &str) -> Result<String, AbiError> {
    let raw = hex::decode(result.strip_prefix("0x").unwrap_or(result))?;
    if raw.len() < 64 {
        return Err(AbiError::TooShort);
    }
    let offset = word_as_usize(&raw[..32])?;
    let len_end = offset
        .checked_add(32)
        .filter(|end| *end <= raw.len())
        .ok_or(AbiError::OutOfBounds)?;
    let len = word_as_usize(&raw[len_end - 32..len_end])?;
    let data = len_end
        .checked_add(len)
        .and_then(|end| raw.get(len_end..end))
        .ok_or(AbiError::OutOfBounds)?;
    Ok(String::from_utf8(data.to_vec())?)
}

fn decode_address_word(result: &str) -> Result<String, AbiError> {
    let clean = result.strip_prefix("0x").unwrap_or(result);
    if clean.len() < 64 {
        return Err(AbiError::TooShort);
    }
    let word = &clean[clean.len() - 64..];
    Ok(format!("0x{}", &word[24..]))
}

/// Resolve the reverse record for an address, or `None` when no resolver is
/// set or the resolver reports an empty name.
pub async fn get_reverse_record(address: &str) -> Result<Option<ReverseRecord>, ApiError> {
    let node = reverse_node(address)?;

    let resolver_raw = eth_call(
        &ens_registry_address(),
        word_call_data(SEL_RESOLVER, &node),
    )
    .await?;
    let resolver = decode_address_word(&resolver_raw)?;
    if resolver.trim_start_matches("0x").chars().all(|c| c == '0') {
        return Ok(None);
    }

    let name_raw = eth_call(&resolver, word_call_data(SEL_NAME, &node)).await?;
    // A resolver that never implemented name(bytes32) returns no data at all.
    if name_raw.trim_start_matches("0x").is_empty() {
        return Ok(None);
    }
    let name = decode_string_return(&name_raw)?;
    if name.is_empty() {
        return Ok(None);
    }
    Ok(Some(ReverseRecord { name }))
}

/// Submit a `setName(string)` transaction from the node's signer account.
/// Returns the transaction hash.
pub async fn send_set_name(name: &str) -> Result<String, ApiError> {
    let from = accounts()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("the node controls no signer account"))?;

    let result = rpc(
        "eth_sendTransaction",
        json!([{
            "from": from,
            "to": reverse_registrar_address(),
            "data": encode_set_name(name),
        }]),
    )
    .await?;
    result
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("eth_sendTransaction returned a non-string result"))
}

/// Has the transaction been mined? A receipt with a block number counts.
pub async fn transaction_confirmed(tx_hash: &str) -> Result<bool, ApiError> {
    let receipt = rpc("eth_getTransactionReceipt", json!([tx_hash])).await?;
    Ok(receipt
        .get("blockNumber")
        .map(|n| !n.is_null())
        .unwrap_or(false))
}

pub async fn accounts() -> Result<Vec<String>, ApiError> {
    let result = rpc("eth_accounts", json!([])).await?;
    let accounts = result
        .as_array()
        .ok_or_else(|| anyhow!("eth_accounts returned a non-array result"))?;
    accounts
        .iter()
        .map(|a| {
            a.as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("eth_accounts returned a non-string entry"))
        })
        .collect()
}

pub async fn chain_id() -> Result<u64, ApiError> {
    let result = rpc("eth_chainId", json!([])).await?;
    let raw = result
        .as_str()
        .ok_or_else(|| anyhow!("eth_chainId returned a non-string result"))?;
    Ok(u64::from_str_radix(raw.trim_start_matches("0x"), 16)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namehash_of_empty_name_is_zero_node() {
        assert_eq!(namehash(""), [0u8; 32]);
    }

    #[test]
    fn namehash_matches_known_vectors() {
        assert_eq!(
            hex::encode(namehash("eth")),
            "93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
        );
        assert_eq!(
            hex::encode(namehash("foo.eth")),
            "de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f"
        );
    }

    #[test]
    fn reverse_node_is_case_insensitive() {
        let checksummed = "0x112234455C3a32FD11230C42E7Bccd4A84e02010";
        let lower = checksummed.to_lowercase();
        assert_eq!(
            reverse_node(checksummed).unwrap(),
            reverse_node(&lower).unwrap()
        );
    }

    #[test]
    fn reverse_node_rejects_garbage() {
        assert!(reverse_node("alice.eth").is_err());
        assert!(reverse_node("0x1234").is_err());
    }

    #[test]
    fn set_name_calldata_layout() {
        let data = encode_set_name("alice.eth");
        let expected = format!(
            "0x{SEL_SET_NAME}{:064x}{:064x}{}{}",
            32,
            9,
            hex::encode(b"alice.eth"),
            "0".repeat((32 - 9) * 2)
        );
        assert_eq!(data, expected);
        // selector + two head words + one padded data word
        assert_eq!(data.len(), 2 + 8 + 64 + 64 + 64);
    }

    #[test]
    fn decodes_string_return() {
        let mut encoded = format!("0x{:064x}{:064x}", 32, 9);
        encoded.push_str(&hex::encode(b"alice.eth"));
        encoded.push_str(&"0".repeat((32 - 9) * 2));
        assert_eq!(decode_string_return(&encoded).unwrap(), "alice.eth");
    }

    #[test]
    fn string_decoding_rejects_truncated_data() {
        assert!(decode_string_return("0x").is_err());
        // Offset points past the end of the buffer.
        let encoded = format!("0x{:064x}{:064x}", 4096, 0);
        assert!(decode_string_return(&encoded).is_err());
        // Length runs past the end of the buffer.
        let encoded = format!("0x{:064x}{:064x}", 32, 4096);
        assert!(decode_string_return(&encoded).is_err());
    }

    #[test]
    fn decodes_address_word() {
        let padded = format!("0x{}{}", "0".repeat(24), "a".repeat(40));
        assert_eq!(
            decode_address_word(&padded).unwrap(),
            format!("0x{}", "a".repeat(40))
        );
    }
}
