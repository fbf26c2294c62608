//! Client accounts as seen by the lifecycle.

use serde::{Deserialize, Serialize};
use shared_types::ClientId;

/// Default reserved name of the client owning posthoc retests.
pub const INTERNAL_RERUN_CLIENT_NAME: &str = "Internal Rerun";

/// A client that owns samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// Whether the client wants result notifications
    pub notify: bool,
    /// Access credential
    pub api_key: String,
}

impl Client {
    pub fn new(name: impl Into<String>, notify: bool, api_key: String) -> Self {
        Self {
            id: ClientId::new(),
            name: name.into(),
            notify,
            api_key,
        }
    }
}
