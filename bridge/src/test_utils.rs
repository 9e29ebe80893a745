//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! In-memory fakes for the host runtime, the indexer and the wallet daemon.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use serde_json::{json, Value};
use tari_bridge_engine_types::{
    amount::Amount,
    ComponentAddress,
    ResourceAddress,
    SubstateId,
    TemplateAddress,
    VaultId,
};
use tari_bridge_indexer_client::{
    types::{
        FinalizedResult,
        IndexerTransactionFinalizedResult,
        InspectSubstateResponse,
        SubmitTransactionRequest,
        SubmitTransactionResponse,
        TransactionFinalDecision,
        UpSubstate,
    },
    IndexerClientError,
};
use tari_bridge_transaction::TransactionId;
use tari_bridge_wallet_daemon_client::WalletDaemonClientError;

use crate::{
    host::{DerivationPath, DialogContent, HostError, SeedSource, SettingsStore, UserInteraction},
    network::{IndexerNetwork, WalletDaemonNetwork},
    settings::BridgeSettings,
    Bridge,
};

pub fn test_bridge(indexer: MockIndexer) -> Bridge<MockIndexer, MockWalletDaemon, MockHost> {
    test_bridge_with_host(indexer, MockHost::new())
}

pub fn test_bridge_with_host(
    indexer: MockIndexer,
    host: MockHost,
) -> Bridge<MockIndexer, MockWalletDaemon, MockHost> {
    Bridge::new(indexer, MockWalletDaemon::default(), host)
}

#[derive(Debug)]
pub struct MockHost {
    confirm_response: bool,
    confirms: Mutex<Vec<DialogContent>>,
    alerts: Mutex<Vec<DialogContent>>,
    notifications: Mutex<Vec<String>>,
    seed: Vec<u8>,
    settings: Mutex<Option<BridgeSettings>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            confirm_response: true,
            confirms: Mutex::new(vec![]),
            alerts: Mutex::new(vec![]),
            notifications: Mutex::new(vec![]),
            seed: vec![0xde; 32],
            settings: Mutex::new(None),
        }
    }

    pub fn with_confirm_response(mut self, response: bool) -> Self {
        self.confirm_response = response;
        self
    }

    pub fn confirms(&self) -> Vec<DialogContent> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<DialogContent> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserInteraction for MockHost {
    async fn confirm(&self, content: DialogContent) -> Result<bool, HostError> {
        self.confirms.lock().unwrap().push(content);
        Ok(self.confirm_response)
    }

    async fn alert(&self, content: DialogContent) -> Result<(), HostError> {
        self.alerts.lock().unwrap().push(content);
        Ok(())
    }

    async fn notify(&self, message: &str) -> Result<(), HostError> {
        self.notifications.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

#[async_trait]
impl SeedSource for MockHost {
    async fn derive_seed(&self, path: &DerivationPath) -> Result<Vec<u8>, HostError> {
        // deterministic per path, like the host's BIP44 derivation
        let mut seed = self.seed.clone();
        seed.extend_from_slice(path.to_string().as_bytes());
        Ok(seed)
    }
}

#[async_trait]
impl SettingsStore for MockHost {
    async fn load_settings(&self) -> Result<Option<BridgeSettings>, HostError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save_settings(&self, settings: &BridgeSettings) -> Result<(), HostError> {
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockIndexer {
    substates: Mutex<HashMap<String, Value>>,
    submissions: Mutex<Vec<SubmitTransactionRequest>>,
    transaction_result: Mutex<IndexerTransactionFinalizedResult>,
    fail_inspections: AtomicBool,
    fail_result_queries: AtomicBool,
}

impl MockIndexer {
    pub fn new() -> Self {
        Self {
            substates: Mutex::new(HashMap::new()),
            submissions: Mutex::new(vec![]),
            transaction_result: Mutex::new(IndexerTransactionFinalizedResult::Pending),
            fail_inspections: AtomicBool::new(false),
            fail_result_queries: AtomicBool::new(false),
        }
    }

    pub fn insert_substate(&self, id: SubstateId, envelope: Value) {
        self.substates.lock().unwrap().insert(id.to_string(), envelope);
    }

    /// Inserts a bare substate value, wrapping it in a version-0 envelope.
    pub fn insert_raw_substate(&self, id: SubstateId, substate_value: Value) {
        self.insert_substate(id, json!({ "substate": substate_value, "version": 0 }));
    }

    pub fn submissions(&self) -> Vec<SubmitTransactionRequest> {
        self.submissions.lock().unwrap().clone()
    }

    /// All subsequent result queries report finalization with the given
    /// decision and up-substates.
    pub fn finalize_transactions(&self, decision: TransactionFinalDecision, up_substates: Vec<UpSubstate>) {
        *self.transaction_result.lock().unwrap() =
            IndexerTransactionFinalizedResult::Finalized(FinalizedResult {
                final_decision: decision,
                up_substates,
                down_substates: vec![],
                execution_result: None,
            });
    }

    pub fn fail_inspections(&self) {
        self.fail_inspections.store(true, Ordering::SeqCst);
    }

    pub fn fail_result_queries(&self) {
        self.fail_result_queries.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl IndexerNetwork for MockIndexer {
    async fn inspect_substate(
        &self,
        address: &SubstateId,
        _version: Option<u32>,
    ) -> Result<InspectSubstateResponse, IndexerClientError> {
        if self.fail_inspections.load(Ordering::SeqCst) {
            return Err(IndexerClientError::RequestFailed {
                code: -32000,
                message: "substate not found".to_string(),
            });
        }
        let substate = self.substates.lock().unwrap().get(&address.to_string()).cloned();
        Ok(InspectSubstateResponse {
            address: address.clone(),
            version: substate.as_ref().map(|_| 0),
            substate,
            created_by_transaction: None,
        })
    }

    async fn submit_transaction(
        &self,
        request: SubmitTransactionRequest,
    ) -> Result<SubmitTransactionResponse, IndexerClientError> {
        let transaction_id = *request.transaction.id();
        self.submissions.lock().unwrap().push(request);
        Ok(SubmitTransactionResponse { transaction_id })
    }

    async fn get_transaction_result(
        &self,
        _transaction_id: &TransactionId,
    ) -> Result<IndexerTransactionFinalizedResult, IndexerClientError> {
        if self.fail_result_queries.load(Ordering::SeqCst) {
            return Err(IndexerClientError::RequestFailed {
                code: -32000,
                message: "transaction not found".to_string(),
            });
        }
        Ok(self.transaction_result.lock().unwrap().clone())
    }

    async fn get_substate_transactions(
        &self,
        _address: &SubstateId,
        _version: Option<u32>,
    ) -> Result<Value, IndexerClientError> {
        Ok(json!([]))
    }

    async fn get_template_definition(
        &self,
        _template_address: &TemplateAddress,
    ) -> Result<Value, IndexerClientError> {
        Ok(json!({}))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWalletCall {
    pub method: String,
    pub token: Option<String>,
    pub params: Value,
}

#[derive(Debug, Default)]
pub struct MockWalletDaemon {
    calls: Mutex<Vec<RecordedWalletCall>>,
}

impl MockWalletDaemon {
    pub fn calls(&self) -> Vec<RecordedWalletCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletDaemonNetwork for MockWalletDaemon {
    async fn request(
        &self,
        _base_url: &str,
        token: Option<&str>,
        method: &str,
        params: Value,
    ) -> Result<Value, WalletDaemonClientError> {
        self.calls.lock().unwrap().push(RecordedWalletCall {
            method: method.to_string(),
            token: token.map(ToString::to_string),
            params,
        });
        let response = match method {
            "auth.request" => json!({ "auth_token": "auth-token" }),
            "auth.accept" => json!({ "permissions_token": "permissions-token" }),
            _ => json!({ "ok": true }),
        };
        Ok(response)
    }
}

/// A version-0 account component envelope whose state holds the given
/// vault map, with vault ids in the tagged binary form the indexer uses.
pub fn account_component_substate(vaults: &[(ResourceAddress, VaultId)]) -> Value {
    let mut vault_map = serde_json::Map::new();
    for (resource, vault_id) in vaults {
        vault_map.insert(
            resource.to_string(),
            json!({ "@@TAGGED@@": [36, vault_id.hash().as_bytes()] }),
        );
    }
    json!({
        "substate": {
            "Component": {
                "template_address": TemplateAddress::zero().to_string(),
                "module_name": "Account",
                "body": { "state": { "@@TAGGED@@": [128, { "vaults": vault_map }] } }
            }
        },
        "version": 0
    })
}

pub fn fungible_vault(resource: ResourceAddress, amount: Amount) -> Value {
    json!({
        "substate": {
            "Vault": {
                "resource_container": {
                    "Fungible": { "address": resource.to_string(), "amount": amount.value() }
                }
            }
        },
        "version": 0
    })
}

pub fn confidential_vault(resource: ResourceAddress, revealed_amount: Amount) -> Value {
    json!({
        "substate": {
            "Vault": {
                "resource_container": {
                    "Confidential": {
                        "address": resource.to_string(),
                        "revealed_amount": revealed_amount.value(),
                        "commitments": { "c1": { "minimum_value_promise": 0 } }
                    }
                }
            }
        },
        "version": 0
    })
}

pub fn resource_substate() -> Value {
    json!({
        "substate": {
            "Resource": { "resource_type": "Confidential", "view_key": null, "total_supply": null }
        },
        "version": 0
    })
}

/// An up-substate entry for a freshly created account-NFT component.
pub fn nft_component_up_substate(address: ComponentAddress) -> UpSubstate {
    serde_json::from_value(json!({
        "substate_id": SubstateId::Component(address),
        "version": 0,
        "substate": {
            "Component": {
                "template_address": tari_bridge_engine_types::template::ACCOUNT_NFT_TEMPLATE_ADDRESS.to_string(),
                "module_name": "AccountNonFungible",
                "body": { "state": {} }
            }
        }
    }))
    .expect("valid up-substate fixture")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn substate_exists_swallows_every_error() {
        let indexer = MockIndexer::new();
        indexer.fail_inspections();
        let id = SubstateId::Component(ComponentAddress::from_array([1; 32]));
        assert!(!indexer.substate_exists(&id).await);
    }

    #[tokio::test]
    async fn substate_exists_is_true_for_known_substates() {
        let indexer = MockIndexer::new();
        let id = SubstateId::Component(ComponentAddress::from_array([2; 32]));
        indexer.insert_substate(id.clone(), account_component_substate(&[]));
        assert!(indexer.substate_exists(&id).await);
        assert!(
            !indexer
                .substate_exists(&SubstateId::Component(ComponentAddress::from_array([3; 32])))
                .await
        );
    }
}
