//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

mod error;
mod json_rpc_client;
pub mod types;

pub use error::IndexerClientError;
pub use json_rpc_client::IndexerJsonRpcClient;
