//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! The dapp bridge: receives page-originated RPC requests from the host
//! runtime, gates every state-changing operation behind a user confirmation,
//! and talks to a remote indexer (or wallet daemon) to read chain state and
//! submit signed transactions.
//!
//! Every capability the bridge needs from its environment is injected:
//! * [`network::IndexerNetwork`] — chain reads and transaction submission;
//! * [`network::WalletDaemonNetwork`] — the optional wallet-daemon backend;
//! * [`host`] traits — dialogs, the master seed and persisted settings.
//!
//! The bridge itself holds no mutable state; persisted settings are the only
//! cross-call state and live behind the host's store.

pub mod dispatcher;
pub mod host;
pub mod keys;
pub mod network;
pub mod poller;
pub mod settings;
pub mod types;

mod accounts;
mod error;
mod faucet;
mod instructions;
mod nfts;
mod transfers;
mod wallet;

#[cfg(test)]
mod test_utils;

pub use error::BridgeError;
pub use keys::KeyManagerApi;
pub use wallet::WalletSessionState;

use tari_bridge_indexer_client::IndexerJsonRpcClient;

use crate::{
    host::{SeedSource, SettingsStore, UserInteraction},
    network::{HttpWalletDaemonNetwork, IndexerNetwork, WalletDaemonNetwork},
    settings::BridgeSettings,
};

/// The bridge service. One instance is constructed at startup; each
/// dispatched request runs as an independent `async` call over it.
#[derive(Debug)]
pub struct Bridge<TNetwork, TWalletRpc, THost> {
    network: TNetwork,
    wallet_rpc: TWalletRpc,
    host: THost,
}

impl<TNetwork, TWalletRpc, THost> Bridge<TNetwork, TWalletRpc, THost>
where
    TNetwork: IndexerNetwork,
    TWalletRpc: WalletDaemonNetwork,
    THost: UserInteraction + SeedSource + SettingsStore,
{
    pub fn new(network: TNetwork, wallet_rpc: TWalletRpc, host: THost) -> Self {
        Self {
            network,
            wallet_rpc,
            host,
        }
    }

    pub fn network(&self) -> &TNetwork {
        &self.network
    }

    pub fn host(&self) -> &THost {
        &self.host
    }

    pub fn key_manager(&self) -> KeyManagerApi<'_, THost> {
        KeyManagerApi::new(&self.host)
    }

    /// Loads persisted settings, falling back to defaults when nothing has
    /// been stored yet.
    pub(crate) async fn settings(&self) -> Result<BridgeSettings, BridgeError> {
        Ok(self.host.load_settings().await?.unwrap_or_default())
    }
}

impl<THost> Bridge<IndexerJsonRpcClient, HttpWalletDaemonNetwork, THost>
where THost: UserInteraction + SeedSource + SettingsStore
{
    /// Wires the production HTTP transports against the persisted indexer
    /// URL (or its default when the bridge has never been configured).
    pub async fn connect(host: THost) -> Result<Self, BridgeError> {
        let settings = host.load_settings().await?.unwrap_or_default();
        let network = IndexerJsonRpcClient::connect(&settings.indexer_url)?;
        Ok(Self::new(network, HttpWalletDaemonNetwork, host))
    }
}
