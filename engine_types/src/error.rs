//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

/// Raised when ledger state returned by the indexer does not match any shape
/// this crate declares support for. Decoding is all-or-nothing: an
/// unrecognized container or token id variant aborts the whole decode rather
/// than producing partial data.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Missing expected field '{field}' in {context}")]
    MissingField { context: &'static str, field: String },
    #[error("Unexpected value shape in {context}: {details}")]
    UnexpectedShape { context: &'static str, details: String },
    #[error("Malformed substate JSON: {0}")]
    Json(#[from] serde_json::Error),
}
