//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use log::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::{
    error::WalletDaemonClientError,
    permissions::TariPermission,
    types::{AuthLoginAcceptRequest, AuthLoginAcceptResponse, AuthLoginRequest, AuthLoginResponse},
    CLIENT_NAME,
};

const LOG_TARGET: &str = "tari::bridge::wallet_daemon_client";

const JSON_RPC_ID: u64 = 1;

/// JSON-RPC client for a wallet daemon. Requests are posted to
/// `<base>/json_rpc`; when a permissions token is supplied it is sent as a
/// bearer Authorization header.
#[derive(Debug, Clone)]
pub struct WalletDaemonClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl WalletDaemonClient {
    pub fn connect<T: AsRef<str>>(base_url: T) -> Result<Self, WalletDaemonClientError> {
        let base = Url::parse(base_url.as_ref()).map_err(|e| WalletDaemonClientError::InvalidUrl {
            url: base_url.as_ref().to_string(),
            details: e.to_string(),
        })?;
        let endpoint = base
            .join("json_rpc")
            .map_err(|e| WalletDaemonClientError::InvalidUrl {
                url: base_url.as_ref().to_string(),
                details: e.to_string(),
            })?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub async fn call<T: Serialize, R: DeserializeOwned>(
        &self,
        token: Option<&str>,
        method: &str,
        params: T,
    ) -> Result<R, WalletDaemonClientError> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": JSON_RPC_ID,
        });
        debug!(target: LOG_TARGET, "Sending '{}' request to {}", method, self.endpoint);

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        let response: JsonRpcResponse = builder.json(&request).send().await?.json().await?;

        if let Some(error) = response.error {
            warn!(
                target: LOG_TARGET,
                "Request '{}' failed: code {}: {}", method, error.code, error.message
            );
            return Err(WalletDaemonClientError::RequestFailed {
                code: error.code,
                message: error.message,
            });
        }

        let result = response.result.unwrap_or(Value::Null);
        Ok(serde_json::from_value(result)?)
    }

    /// Step one of the auth handshake: request a scoped auth token.
    pub async fn auth_request(
        &self,
        permissions: Vec<TariPermission>,
        duration: Option<u64>,
    ) -> Result<AuthLoginResponse, WalletDaemonClientError> {
        self.call(None, "auth.request", AuthLoginRequest { permissions, duration })
            .await
    }

    /// Step two: accept the auth token, yielding the long-lived permissions
    /// token used for subsequent requests.
    pub async fn auth_accept(&self, auth_token: String) -> Result<AuthLoginAcceptResponse, WalletDaemonClientError> {
        self.call(
            None,
            "auth.accept",
            AuthLoginAcceptRequest {
                auth_token,
                name: CLIENT_NAME.to_string(),
            },
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

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;
    use crate::permissions::default_session_permissions;

    #[tokio::test]
    async fn handshake_posts_to_json_rpc_path() {
        let server = MockServer::start();
        let request_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/json_rpc")
                .json_body_partial(r#"{ "method": "auth.request" }"#);
            then.status(200).json_body(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "auth_token": "auth-123" },
            }));
        });

        let client = WalletDaemonClient::connect(format!("{}/", server.base_url())).unwrap();
        let response = client
            .auth_request(default_session_permissions(), None)
            .await
            .unwrap();
        request_mock.assert();
        assert_eq!(response.auth_token, "auth-123");
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/json_rpc")
                .header("authorization", "Bearer permissions-token");
            then.status(200).json_body(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "accounts": [] },
            }));
        });

        let client = WalletDaemonClient::connect(format!("{}/", server.base_url())).unwrap();
        let _result: Value = client
            .call(Some("permissions-token"), "accounts.get_balances", json!({}))
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn daemon_error_maps_to_request_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/json_rpc");
            then.status(200).json_body(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": 401, "message": "token expired" },
            }));
        });

        let client = WalletDaemonClient::connect(format!("{}/", server.base_url())).unwrap();
        let err = client.auth_accept("auth-123".to_string()).await.unwrap_err();
        assert!(matches!(err, WalletDaemonClientError::RequestFailed { code: 401, .. }));
    }
}
