//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use log::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tari_bridge_engine_types::{SubstateId, TemplateAddress};
use tari_bridge_transaction::TransactionId;
use url::Url;

use crate::{
    error::IndexerClientError,
    types::{
        GetTransactionResultResponse,
        IndexerTransactionFinalizedResult,
        InspectSubstateResponse,
        SubmitTransactionRequest,
        SubmitTransactionResponse,
    },
};

const LOG_TARGET: &str = "tari::bridge::indexer_client";

// The bridge issues one request at a time per call, so a fixed envelope id
// is sufficient.
const JSON_RPC_ID: u64 = 1;

/// Stateless JSON-RPC 2.0 transport to the indexer. No retry policy lives
/// here; callers that poll (e.g. the result poller) own their own schedule.
#[derive(Debug, Clone)]
pub struct IndexerJsonRpcClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl IndexerJsonRpcClient {
    pub fn connect<T: AsRef<str>>(endpoint: T) -> Result<Self, IndexerClientError> {
        let endpoint = Url::parse(endpoint.as_ref()).map_err(|e| IndexerClientError::InvalidUrl {
            url: endpoint.as_ref().to_string(),
            details: e.to_string(),
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    /// Issues a raw JSON-RPC call. A non-null `error` member in the response
    /// maps to [`IndexerClientError::RequestFailed`]; a missing `result` is
    /// never silently returned as partial data.
    pub async fn call<T: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: T,
    ) -> Result<R, IndexerClientError> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": JSON_RPC_ID,
        });
        debug!(target: LOG_TARGET, "Sending '{}' request to {}", method, self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;
        let response: JsonRpcResponse = response.json().await?;

        if let Some(error) = response.error {
            warn!(
                target: LOG_TARGET,
                "Request '{}' failed: code {}: {}", method, error.code, error.message
            );
            return Err(IndexerClientError::RequestFailed {
                code: error.code,
                message: error.message,
            });
        }

        let result = response.result.unwrap_or(Value::Null);
        Ok(serde_json::from_value(result)?)
    }

    pub async fn inspect_substate(
        &self,
        address: &SubstateId,
        version: Option<u32>,
    ) -> Result<InspectSubstateResponse, IndexerClientError> {
        self.call("inspect_substate", json!({ "address": address, "version": version }))
            .await
    }

    pub async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<SubmitTransactionResponse, IndexerClientError> {
        self.call("submit_transaction", request).await
    }

    pub async fn get_transaction_result(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<IndexerTransactionFinalizedResult, IndexerClientError> {
        let response: GetTransactionResultResponse = self
            .call("get_transaction_result", json!({ "transaction_id": transaction_id }))
            .await?;
        Ok(response.result)
    }

    pub async fn get_substate_transactions(
        &self,
        address: &SubstateId,
        version: Option<u32>,
    ) -> Result<Value, IndexerClientError> {
        self.call(
            "get_substate_transactions",
            json!({ "address": address, "version": version }),
        )
        .await
    }

    pub async fn get_template_definition(
        &self,
        template_address: &TemplateAddress,
    ) -> Result<Value, IndexerClientError> {
        self.call(
            "get_template_definition",
            json!({ "template_address": template_address.to_string() }),
        )
        .await
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
