//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Account state scanning: reads the account component from the indexer,
//! resolves its vaults and folds each vault's container into a typed
//! resource entry. Decoding is all-or-nothing; one bad vault fails the whole
//! scan rather than reporting a partial balance view.

use log::*;
use tari_bridge_engine_types::{
    substate::{ResourceContainer, Substate},
    tagged::{decode_vault_id, get_value_by_path},
    ComponentAddress,
    DecodeError,
    ResourceAddress,
    SubstateId,
    VaultId,
};

use crate::{
    error::BridgeError,
    host::{SeedSource, SettingsStore, UserInteraction},
    keys::{account_component_address, DEFAULT_ACCOUNT_INDEX},
    network::{IndexerNetwork, WalletDaemonNetwork},
    types::{AccountData, ResourceEntry},
    Bridge,
};

const LOG_TARGET: &str = "tari::bridge::accounts";

impl<TNetwork, TWalletRpc, THost> Bridge<TNetwork, TWalletRpc, THost>
where
    TNetwork: IndexerNetwork,
    TWalletRpc: WalletDaemonNetwork,
    THost: UserInteraction + SeedSource + SettingsStore,
{
    /// Returns the account's public key, component address and decoded
    /// resource balances. An account that does not exist on-chain yet is
    /// reported with an empty resource list, not an error.
    pub async fn get_account_data(&self) -> Result<AccountData, BridgeError> {
        let keypair = self.key_manager().derive_key_pair(DEFAULT_ACCOUNT_INDEX).await?;
        let address = account_component_address(&keypair.public_key);

        let vaults = match self.account_vaults(&address).await? {
            Some(vaults) => vaults,
            None => {
                debug!(target: LOG_TARGET, "Account {} not found on chain", address);
                return Ok(AccountData {
                    public_key: keypair.public_key,
                    address,
                    resources: vec![],
                });
            },
        };

        let mut resources = Vec::with_capacity(vaults.len());
        for (_, vault_id) in vaults {
            resources.push(self.scan_vault(vault_id).await?);
        }

        Ok(AccountData {
            public_key: keypair.public_key,
            address,
            resources,
        })
    }

    /// Resolves the account component's vault map in vault-iteration order.
    /// `None` when the account component does not exist (or cannot currently
    /// be read); any malformed vault entry is a hard error.
    pub(crate) async fn account_vaults(
        &self,
        address: &ComponentAddress,
    ) -> Result<Option<Vec<(String, VaultId)>>, BridgeError> {
        let response = match self.network().inspect_substate(&SubstateId::Component(*address), None).await {
            Ok(response) => response,
            Err(e) => {
                debug!(target: LOG_TARGET, "Error getting account component {}: {}", address, e);
                return Ok(None);
            },
        };
        let Some(raw) = response.substate else {
            return Ok(None);
        };

        let substate = Substate::from_value(&raw)?;
        let component = substate.substate.component()?;
        let vaults = get_value_by_path(&component.body.state, "$.vaults").ok_or(DecodeError::MissingField {
            context: "account component state",
            field: "vaults".to_string(),
        })?;
        let vaults = vaults.as_object().ok_or_else(|| DecodeError::UnexpectedShape {
            context: "account component state",
            details: "vaults is not a map".to_string(),
        })?;

        let mut resolved = Vec::with_capacity(vaults.len());
        for (resource, vault_ref) in vaults {
            resolved.push((resource.clone(), decode_vault_id(vault_ref)?));
        }
        Ok(Some(resolved))
    }

    /// The vault holding `resource_address` for the given account.
    pub(crate) async fn vault_for_resource(
        &self,
        address: &ComponentAddress,
        resource_address: &ResourceAddress,
    ) -> Result<VaultId, BridgeError> {
        let vaults = self.account_vaults(address).await?.unwrap_or_default();
        vaults
            .into_iter()
            .find(|(resource, _)| resource == &resource_address.to_string())
            .map(|(_, vault_id)| vault_id)
            .ok_or(BridgeError::VaultNotFound {
                resource_address: *resource_address,
            })
    }

    async fn scan_vault(&self, vault_id: VaultId) -> Result<ResourceEntry, BridgeError> {
        let response = self
            .network()
            .inspect_substate(&SubstateId::Vault(vault_id), None)
            .await?;
        let raw = response.substate.ok_or(DecodeError::MissingField {
            context: "vault substate",
            field: vault_id.to_string(),
        })?;
        let substate = Substate::from_value(&raw)?;
        let vault = substate.substate.vault()?;

        let entry = match &vault.resource_container {
            ResourceContainer::Fungible { address, amount } => ResourceEntry::Fungible {
                resource_address: *address,
                balance: *amount,
            },
            ResourceContainer::Confidential {
                address,
                revealed_amount,
                commitments,
            } => ResourceEntry::Confidential {
                resource_address: *address,
                revealed_amount: *revealed_amount,
                commitment_count: commitments.len(),
            },
            ResourceContainer::NonFungible { address, token_ids } => ResourceEntry::NonFungible {
                resource_address: *address,
                token_ids: token_ids.clone(),
            },
        };
        Ok(entry)
    }
}
