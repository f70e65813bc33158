//! Forward-record lookups against the naming subgraph (GraphQL over HTTP).

use serde::Deserialize;
use serde_json::json;

use crate::record::NameRecord;
use crate::ApiError;

pub fn subgraph_url() -> String {
    const DEFAULT_URL: &str = "https://api.thegraph.com/subgraphs/name/ensdomains/ens";
    std::env::var("ENS_SUBGRAPH_URL").unwrap_or_else(|_| DEFAULT_URL.to_string())
}

const NAMES_QUERY: &str = r#"
query namesForAddress($address: String!) {
  resolvers(where: { addr: $address }) {
    domain {
      name
      labelName
      labelhash
    }
  }
}"#;

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct QueryData {
    resolvers: Vec<ResolverEntry>,
}

#[derive(Deserialize)]
struct ResolverEntry {
    domain: Option<Domain>,
}

#[derive(Deserialize)]
struct Domain {
    name: Option<String>,
    #[serde(rename = "labelName")]
    label_name: Option<String>,
    labelhash: Option<String>,
}

/// Every domain whose resolver points at `address`. The subgraph stores
/// addresses lowercased, so the filter value is normalized here.
pub async fn names_for_address(address: &str) -> Result<Vec<NameRecord>, ApiError> {
    let payload = json!({
        "query": NAMES_QUERY,
        "variables": { "address": address.to_lowercase() },
    });

    let client = reqwest::Client::new();
    let response: GraphQlResponse = client
        .post(subgraph_url())
        .json(&payload)
        .send()
        .await?
        .json()
        .await?;

    if let Some(errors) = response.errors {
        let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
        anyhow::bail!("subgraph query failed: {}", messages.join("; "));
    }

    let resolvers = response.data.map(|d| d.resolvers).unwrap_or_default();
    Ok(resolvers
        .into_iter()
        .filter_map(|entry| entry.domain)
        .filter_map(|domain| {
            domain.name.map(|name| NameRecord {
                name,
                label_name: domain.label_name,
                label_hash: domain.labelhash,
            })
        })
        .collect())
}
