//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use tari_bridge_engine_types::{DecodeError, ResourceAddress};
use tari_bridge_indexer_client::IndexerClientError;
use tari_bridge_transaction::TransactionId;
use tari_bridge_wallet_daemon_client::WalletDaemonClientError;

use crate::{host::HostError, keys::KeyDerivationError};

/// Failure taxonomy for every bridge operation. A declined confirmation is
/// deliberately absent: flows report it as an `Ok(None)` no-op result, never
/// as an error.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Indexer error: {0}")]
    IndexerClient(#[from] IndexerClientError),
    #[error("Wallet daemon error: {0}")]
    WalletDaemonClient(#[from] WalletDaemonClientError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Key derivation error: {0}")]
    KeyDerivation(#[from] KeyDerivationError),
    #[error("Host error: {0}")]
    Host(#[from] HostError),
    #[error("Timed out waiting for transaction {transaction_id} to finalize")]
    Timeout { transaction_id: TransactionId },
    #[error("Method '{method}' not found")]
    MethodNotFound { method: String },
    #[error("Method '{method}' is not permitted")]
    MethodDenied { method: String },
    #[error("Invalid parameters for '{method}': {details}")]
    InvalidParams { method: String, details: String },
    #[error("Account holds no vault for resource {resource_address}")]
    VaultNotFound { resource_address: ResourceAddress },
    #[error("Transaction {transaction_id} was rejected by the network")]
    TransactionRejected { transaction_id: TransactionId },
    #[error("Transaction {transaction_id} did not create the expected component")]
    ComponentNotInResult { transaction_id: TransactionId },
}
