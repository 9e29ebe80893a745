//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

#[derive(Debug, thiserror::Error)]
pub enum WalletDaemonClientError {
    #[error("Failed to reach the wallet daemon: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Wallet daemon returned an error: code {code}: {message}")]
    RequestFailed { code: i64, message: String },
    #[error("Failed to decode wallet daemon response: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid wallet daemon URL '{url}': {details}")]
    InvalidUrl { url: String, details: String },
}
