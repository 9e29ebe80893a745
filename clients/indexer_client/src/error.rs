//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

#[derive(Debug, thiserror::Error)]
pub enum IndexerClientError {
    #[error("Failed to reach the indexer: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Indexer returned an error: code {code}: {message}")]
    RequestFailed { code: i64, message: String },
    #[error("Failed to decode indexer response: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid indexer URL '{url}': {details}")]
    InvalidUrl { url: String, details: String },
}
