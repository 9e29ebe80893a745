//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! The alternate wallet-daemon backend. Session progression:
//! `Unconfigured -> AwaitingAuth -> Authorized`. The daemon URL and the
//! permissions token from the last successful handshake are the only
//! persisted pieces of session state.

use log::*;
use serde_json::Value;
use tari_bridge_wallet_daemon_client::permissions::default_session_permissions;

use crate::{
    dispatcher::{wallet_method_policy, MethodPolicy},
    error::BridgeError,
    host::{DialogContent, SeedSource, SettingsStore, UserInteraction},
    network::{IndexerNetwork, WalletDaemonNetwork},
    types::{GetWalletTokenRequest, SendWalletRequest, SetWalletRequest, WalletTokenResponse},
    Bridge,
};

const LOG_TARGET: &str = "tari::bridge::wallet";

/// Daemon methods that move funds; a successful forward of one of these
/// raises a host notification.
const TRANSFER_LIKE_METHODS: &[&str] = &["accounts.transfer", "accounts.confidential_transfer", "transactions.submit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletSessionState {
    Unconfigured,
    AwaitingAuth,
    Authorized,
}

impl<TNetwork, TWalletRpc, THost> Bridge<TNetwork, TWalletRpc, THost>
where
    TNetwork: IndexerNetwork,
    TWalletRpc: WalletDaemonNetwork,
    THost: UserInteraction + SeedSource + SettingsStore,
{
    pub async fn wallet_session_state(&self) -> Result<WalletSessionState, BridgeError> {
        let settings = self.settings().await?;
        let state = match (&settings.wallet_daemon_url, &settings.wallet_token) {
            (None, _) => WalletSessionState::Unconfigured,
            (Some(_), None) => WalletSessionState::AwaitingAuth,
            (Some(_), Some(_)) => WalletSessionState::Authorized,
        };
        Ok(state)
    }

    /// Persists the daemon URL and immediately runs the auth handshake so
    /// the session lands in `Authorized`.
    pub async fn set_wallet(&self, request: SetWalletRequest) -> Result<Option<WalletTokenResponse>, BridgeError> {
        let content = DialogContent::new("Connect wallet daemon")
            .line("This website wants to use a Tari wallet daemon for your account, do you want to proceed?")
            .field("Wallet daemon URL", &request.tari_wallet_daemon_url);
        if !self.host().confirm(content).await? {
            info!(target: LOG_TARGET, "Wallet daemon configuration declined by user");
            return Ok(None);
        }

        let mut settings = self.settings().await?;
        settings.wallet_daemon_url = Some(request.tari_wallet_daemon_url.clone());
        settings.wallet_token = None;
        self.host().save_settings(&settings).await?;

        let token = self.authorize_session(&request.tari_wallet_daemon_url).await?;
        Ok(Some(WalletTokenResponse {
            permissions_token: token,
        }))
    }

    /// Runs the two-step handshake against the configured daemon. Alerts and
    /// returns nothing when no daemon is configured.
    pub async fn get_wallet_token(
        &self,
        request: GetWalletTokenRequest,
    ) -> Result<Option<WalletTokenResponse>, BridgeError> {
        let settings = self.settings().await?;
        let Some(daemon_url) = settings.wallet_daemon_url else {
            self.alert_unconfigured().await?;
            return Ok(None);
        };

        let content = DialogContent::new("Wallet session")
            .line("This website requests a session token for your wallet daemon, do you want to proceed?")
            .field("Wallet daemon URL", &daemon_url);
        if !self.host().confirm(content).await? {
            info!(target: LOG_TARGET, "Wallet token request declined by user");
            return Ok(None);
        }

        let permissions = request.permissions.unwrap_or_else(default_session_permissions);
        let token = self
            .wallet_rpc()
            .authorize(&daemon_url, permissions)
            .await
            .map_err(BridgeError::from)?;
        self.cache_wallet_token(&token).await?;
        Ok(Some(WalletTokenResponse {
            permissions_token: token,
        }))
    }

    /// Forwards a whitelisted request to the daemon under the given bearer
    /// token, consulting the per-method confirmation policy first.
    pub async fn send_wallet_request(&self, request: SendWalletRequest) -> Result<Option<Value>, BridgeError> {
        let settings = self.settings().await?;
        let Some(daemon_url) = settings.wallet_daemon_url else {
            self.alert_unconfigured().await?;
            return Ok(None);
        };

        match wallet_method_policy(&request.method) {
            MethodPolicy::Deny => {
                warn!(target: LOG_TARGET, "Denied wallet daemon method '{}'", request.method);
                return Err(BridgeError::MethodDenied {
                    method: request.method,
                });
            },
            MethodPolicy::RequireConfirmation => {
                let content = DialogContent::new("Wallet request")
                    .line("This website requests an operation on your wallet daemon, do you want to proceed?")
                    .field("Method", &request.method)
                    .field("Parameters", &request.params);
                if !self.host().confirm(content).await? {
                    info!(
                        target: LOG_TARGET,
                        "Wallet daemon request '{}' declined by user", request.method
                    );
                    return Ok(None);
                }
            },
            MethodPolicy::AlwaysAllow => {},
        }

        let token = request.token.or(settings.wallet_token);
        let result = self
            .wallet_rpc()
            .request(&daemon_url, token.as_deref(), &request.method, request.params)
            .await
            .map_err(BridgeError::from)?;

        if TRANSFER_LIKE_METHODS.contains(&request.method.as_str()) {
            self.host()
                .notify(&format!("Wallet transaction sent via {}", request.method))
                .await?;
        }
        Ok(Some(result))
    }

    pub(crate) fn wallet_rpc(&self) -> &TWalletRpc {
        &self.wallet_rpc
    }

    async fn authorize_session(&self, daemon_url: &str) -> Result<String, BridgeError> {
        let token = self
            .wallet_rpc()
            .authorize(daemon_url, default_session_permissions())
            .await
            .map_err(BridgeError::from)?;
        self.cache_wallet_token(&token).await?;
        Ok(token)
    }

    async fn cache_wallet_token(&self, token: &str) -> Result<(), BridgeError> {
        let mut settings = self.settings().await?;
        settings.wallet_token = Some(token.to_string());
        self.host().save_settings(&settings).await?;
        Ok(())
    }

    async fn alert_unconfigured(&self) -> Result<(), BridgeError> {
        warn!(target: LOG_TARGET, "Wallet daemon operation requested but none is configured");
        self.host()
            .alert(
                DialogContent::new("No wallet daemon")
                    .line("No Tari wallet daemon has been configured for this account."),
            )
            .await?;
        Ok(())
    }
}
