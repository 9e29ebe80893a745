//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Network seams. Flows depend on these traits rather than on the concrete
//! HTTP clients so every flow is testable against in-memory fakes.

use async_trait::async_trait;
use log::*;
use serde_json::{json, Value};
use tari_bridge_engine_types::{SubstateId, TemplateAddress};
use tari_bridge_indexer_client::{
    types::{
        IndexerTransactionFinalizedResult,
        InspectSubstateResponse,
        SubmitTransactionRequest,
        SubmitTransactionResponse,
    },
    IndexerClientError,
    IndexerJsonRpcClient,
};
use tari_bridge_transaction::TransactionId;
use tari_bridge_wallet_daemon_client::{
    types::{AuthLoginAcceptResponse, AuthLoginResponse},
    TariPermission,
    WalletDaemonClient,
    WalletDaemonClientError,
    CLIENT_NAME,
};

const LOG_TARGET: &str = "tari::bridge::network";

/// Read and submit access to the chain through an indexer.
#[async_trait]
pub trait IndexerNetwork: Send + Sync {
    async fn inspect_substate(
        &self,
        address: &SubstateId,
        version: Option<u32>,
    ) -> Result<InspectSubstateResponse, IndexerClientError>;

    async fn submit_transaction(
        &self,
        request: SubmitTransactionRequest,
    ) -> Result<SubmitTransactionResponse, IndexerClientError>;

    async fn get_transaction_result(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<IndexerTransactionFinalizedResult, IndexerClientError>;

    async fn get_substate_transactions(
        &self,
        address: &SubstateId,
        version: Option<u32>,
    ) -> Result<Value, IndexerClientError>;

    async fn get_template_definition(
        &self,
        template_address: &TemplateAddress,
    ) -> Result<Value, IndexerClientError>;

    /// Existence checks are best-effort: any failure reads as "does not
    /// exist", never as an error.
    async fn substate_exists(&self, address: &SubstateId) -> bool {
        match self.inspect_substate(address, None).await {
            Ok(response) => response.substate.is_some(),
            Err(e) => {
                debug!(
                    target: LOG_TARGET,
                    "Existence check for {} failed, treating as non-existent: {}", address, e
                );
                false
            },
        }
    }
}

#[async_trait]
impl IndexerNetwork for IndexerJsonRpcClient {
    async fn inspect_substate(
        &self,
        address: &SubstateId,
        version: Option<u32>,
    ) -> Result<InspectSubstateResponse, IndexerClientError> {
        IndexerJsonRpcClient::inspect_substate(self, address, version).await
    }

    async fn submit_transaction(
        &self,
        request: SubmitTransactionRequest,
    ) -> Result<SubmitTransactionResponse, IndexerClientError> {
        IndexerJsonRpcClient::submit_transaction(self, &request).await
    }

    async fn get_transaction_result(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<IndexerTransactionFinalizedResult, IndexerClientError> {
        IndexerJsonRpcClient::get_transaction_result(self, transaction_id).await
    }

    async fn get_substate_transactions(
        &self,
        address: &SubstateId,
        version: Option<u32>,
    ) -> Result<Value, IndexerClientError> {
        IndexerJsonRpcClient::get_substate_transactions(self, address, version).await
    }

    async fn get_template_definition(
        &self,
        template_address: &TemplateAddress,
    ) -> Result<Value, IndexerClientError> {
        IndexerJsonRpcClient::get_template_definition(self, template_address).await
    }
}

/// Access to a wallet daemon. The base URL comes from persisted settings at
/// call time, so the transport is stateless with respect to the daemon.
#[async_trait]
pub trait WalletDaemonNetwork: Send + Sync {
    async fn request(
        &self,
        base_url: &str,
        token: Option<&str>,
        method: &str,
        params: Value,
    ) -> Result<Value, WalletDaemonClientError>;

    /// Runs the two-step auth handshake and returns the permissions token.
    async fn authorize(
        &self,
        base_url: &str,
        permissions: Vec<TariPermission>,
    ) -> Result<String, WalletDaemonClientError> {
        let response = self
            .request(
                base_url,
                None,
                "auth.request",
                json!({ "permissions": permissions, "duration": null }),
            )
            .await?;
        let AuthLoginResponse { auth_token } = serde_json::from_value(response)?;

        let response = self
            .request(
                base_url,
                None,
                "auth.accept",
                json!({ "auth_token": auth_token, "name": CLIENT_NAME }),
            )
            .await?;
        let AuthLoginAcceptResponse { permissions_token } = serde_json::from_value(response)?;
        Ok(permissions_token)
    }
}

/// Production transport: a fresh client per call against whatever URL is
/// currently persisted.
#[derive(Debug, Clone, Default)]
pub struct HttpWalletDaemonNetwork;

#[async_trait]
impl WalletDaemonNetwork for HttpWalletDaemonNetwork {
    async fn request(
        &self,
        base_url: &str,
        token: Option<&str>,
        method: &str,
        params: Value,
    ) -> Result<Value, WalletDaemonClientError> {
        let client = WalletDaemonClient::connect(base_url)?;
        client.call(token, method, params).await
    }
}
