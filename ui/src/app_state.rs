use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct AppStateData {
    /// Chain id of the connected node.
    pub network: u64,
    /// The account the node signs with; `None` when it controls no key.
    pub account: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(network: u64, account: Option<String>) -> Self {
        Self(Arc::new(AppStateData { network, account }))
    }
}
