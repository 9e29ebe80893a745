//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};

/// Indexer used when none has been configured.
pub const DEFAULT_INDEXER_URL: &str = "http://localhost:18300";

/// The bridge's persisted configuration. Read-modify-written only by the
/// explicit settings operations (`setWallet`, token caching), never by
/// transaction flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSettings {
    pub indexer_url: String,
    pub wallet_daemon_url: Option<String>,
    /// Permissions token from the last successful wallet-daemon handshake.
    #[serde(default)]
    pub wallet_token: Option<String>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            indexer_url: DEFAULT_INDEXER_URL.to_string(),
            wallet_daemon_url: None,
            wallet_token: None,
        }
    }
}
