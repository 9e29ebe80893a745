//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! The single entry point for page-originated requests. Every method passes
//! through the static policy table before it can have any effect; unknown
//! methods are rejected up front. Policy is keyed strictly by method name,
//! never by the operation's inferred effect.

use log::*;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tari_bridge_engine_types::template::parse_template_address;

use crate::{
    error::BridgeError,
    host::{SeedSource, SettingsStore, UserInteraction},
    network::{IndexerNetwork, WalletDaemonNetwork},
    types::{
        ConfidentialTransferRequest,
        GetFreeTestCoinsRequest,
        GetPublicKeyRequest,
        GetPublicKeyResponse,
        GetSubstateRequest,
        GetTemplateDefinitionRequest,
        GetTransactionResultRequest,
        GetWalletTokenRequest,
        MintAccountNftRequest,
        SendInstructionRequest,
        SendTransactionRequest,
        SendWalletRequest,
        SetWalletRequest,
        TransferNftRequest,
        TransferRequest,
    },
    Bridge,
};

const LOG_TARGET: &str = "tari::bridge::dispatcher";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodPolicy {
    /// Read-only methods the page may call freely.
    AlwaysAllow,
    /// State-changing methods; the flow renders a dialog naming the
    /// operation's key fields and nothing is signed until it is accepted.
    RequireConfirmation,
    Deny,
}

/// Policy for the bridge's own RPC surface. `None` means the method does not
/// exist, which is reported before any side effect.
pub fn bridge_method_policy(method: &str) -> Option<MethodPolicy> {
    match method {
        "getAccountData" |
        "getTransactions" |
        "getSubstate" |
        "getTemplateDefinition" |
        "getTransactionResult" |
        "getPublicKey" => Some(MethodPolicy::AlwaysAllow),
        "transfer" |
        "confidentialTransfer" |
        "getFreeTestCoins" |
        "sendTransaction" |
        "sendInstruction" |
        "mintAccountNft" |
        "transferNft" |
        "setWallet" |
        "getWalletToken" |
        "sendWalletRequest" => Some(MethodPolicy::RequireConfirmation),
        _ => None,
    }
}

/// Policy for methods forwarded to a wallet daemon. Anything unlisted is
/// denied.
pub fn wallet_method_policy(method: &str) -> MethodPolicy {
    match method {
        "accounts.get_default" | "accounts.get_balances" | "transactions.get_all_by_status" | "keys.list" => {
            MethodPolicy::AlwaysAllow
        },
        "accounts.transfer" | "accounts.confidential_transfer" | "transactions.submit" => {
            MethodPolicy::RequireConfirmation
        },
        _ => MethodPolicy::Deny,
    }
}

/// A page-originated request as delivered by the host runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeRequest {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl<TNetwork, TWalletRpc, THost> Bridge<TNetwork, TWalletRpc, THost>
where
    TNetwork: IndexerNetwork,
    TWalletRpc: WalletDaemonNetwork,
    THost: UserInteraction + SeedSource + SettingsStore,
{
    /// Routes one request. Declined confirmations surface as JSON `null`,
    /// failures as typed [`BridgeError`]s for the host to report.
    pub async fn handle_request(&self, request: BridgeRequest) -> Result<Value, BridgeError> {
        let policy = bridge_method_policy(&request.method).ok_or_else(|| {
            warn!(target: LOG_TARGET, "Unknown method '{}'", request.method);
            BridgeError::MethodNotFound {
                method: request.method.clone(),
            }
        })?;
        if policy == MethodPolicy::Deny {
            return Err(BridgeError::MethodDenied {
                method: request.method,
            });
        }
        debug!(target: LOG_TARGET, "Dispatching '{}'", request.method);

        let BridgeRequest { method, params } = request;
        match method.as_str() {
            "getAccountData" => to_json(&self.get_account_data().await?),
            "getTransactions" => {
                let result = self.get_transactions().await?;
                Ok(result)
            },
            "transfer" => {
                let request: TransferRequest = parse_params(&method, params)?;
                to_json(&self.transfer(request).await?)
            },
            "confidentialTransfer" => {
                let request: ConfidentialTransferRequest = parse_params(&method, params)?;
                to_json(&self.confidential_transfer(request).await?)
            },
            "getFreeTestCoins" => {
                let request: GetFreeTestCoinsRequest = parse_params(&method, params)?;
                to_json(&self.get_free_test_coins(request).await?)
            },
            "sendTransaction" => {
                let request: SendTransactionRequest = parse_params(&method, params)?;
                to_json(&self.send_transaction(request).await?)
            },
            "sendInstruction" => {
                let request: SendInstructionRequest = parse_params(&method, params)?;
                to_json(&self.send_instruction(request).await?)
            },
            "mintAccountNft" => {
                let request: MintAccountNftRequest = parse_params(&method, params)?;
                to_json(&self.mint_account_nft(request).await?)
            },
            "transferNft" => {
                let request: TransferNftRequest = parse_params(&method, params)?;
                to_json(&self.transfer_nft(request).await?)
            },
            "getSubstate" => {
                let request: GetSubstateRequest = parse_params(&method, params)?;
                let response = self.network().inspect_substate(&request.substate_address, None).await?;
                to_json(&response)
            },
            "getTemplateDefinition" => {
                let request: GetTemplateDefinitionRequest = parse_params(&method, params)?;
                let template_address =
                    parse_template_address(&request.template_address).ok_or(BridgeError::InvalidParams {
                        method: method.clone(),
                        details: format!("invalid template address '{}'", request.template_address),
                    })?;
                let definition = self.network().get_template_definition(&template_address).await?;
                Ok(definition)
            },
            "getTransactionResult" => {
                let request: GetTransactionResultRequest = parse_params(&method, params)?;
                let result = self.network().get_transaction_result(&request.transaction_id).await?;
                to_json(&result)
            },
            "getPublicKey" => {
                let request: GetPublicKeyRequest = parse_params(&method, params)?;
                let keypair = self.key_manager().derive_key_pair(request.index).await?;
                to_json(&GetPublicKeyResponse {
                    public_key: keypair.public_key,
                })
            },
            "setWallet" => {
                let request: SetWalletRequest = parse_params(&method, params)?;
                to_json(&self.set_wallet(request).await?)
            },
            "getWalletToken" => {
                let request: GetWalletTokenRequest = parse_params(&method, params)?;
                to_json(&self.get_wallet_token(request).await?)
            },
            "sendWalletRequest" => {
                let request: SendWalletRequest = parse_params(&method, params)?;
                to_json(&self.send_wallet_request(request).await?)
            },
            // the policy table and this match are kept in sync; a policy hit
            // without a route is unreachable
            _ => Err(BridgeError::MethodNotFound { method }),
        }
    }

    /// Transactions touching the bridge account, straight from the indexer.
    async fn get_transactions(&self) -> Result<Value, BridgeError> {
        let keypair = self.key_manager().derive_key_pair(crate::keys::DEFAULT_ACCOUNT_INDEX).await?;
        let account = crate::keys::account_component_address(&keypair.public_key);
        let result = self
            .network()
            .get_substate_transactions(&account.into(), None)
            .await?;
        Ok(result)
    }
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, BridgeError> {
    serde_json::from_value(params).map_err(|e| BridgeError::InvalidParams {
        method: method.to_string(),
        details: e.to_string(),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, BridgeError> {
    serde_json::to_value(value).map_err(|e| BridgeError::InvalidParams {
        method: "<serialize>".to_string(),
        details: e.to_string(),
    })
}
