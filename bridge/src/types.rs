//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Request and response types of the bridge's host-facing RPC surface.

use serde::{Deserialize, Serialize};
use tari_bridge_engine_types::{
    amount::Amount,
    metadata::MetadataField,
    non_fungible::{NonFungibleAddress, NonFungibleId},
    ComponentAddress,
    ResourceAddress,
    SubstateId,
    SubstateRequirement,
};
use tari_bridge_transaction::{Instruction, TransactionId};
use tari_bridge_wallet_daemon_client::TariPermission;
use tari_crypto::ristretto::RistrettoPublicKey;

/// The page-facing view of the bridge's account: recomputed on demand, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub public_key: RistrettoPublicKey,
    pub address: ComponentAddress,
    pub resources: Vec<ResourceEntry>,
}

/// One vault's balance, tagged for the page with a lowercase `type` field.
/// Exactly one variant per vault, chosen by the decoded container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResourceEntry {
    Fungible {
        resource_address: ResourceAddress,
        balance: Amount,
    },
    Confidential {
        resource_address: ResourceAddress,
        revealed_amount: Amount,
        commitment_count: usize,
    },
    NonFungible {
        resource_address: ResourceAddress,
        token_ids: Vec<NonFungibleId>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    pub amount: Amount,
    pub resource_address: ResourceAddress,
    pub destination_public_key: RistrettoPublicKey,
    pub fee: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidentialTransferRequest {
    pub amount: Amount,
    pub resource_address: ResourceAddress,
    pub destination_public_key: RistrettoPublicKey,
    pub fee: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResponse {
    pub transaction_id: TransactionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFreeTestCoinsRequest {
    pub amount: Amount,
    pub fee: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintAccountNftRequest {
    pub metadata: Vec<MetadataField>,
    pub fee: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferNftRequest {
    pub nft_address: NonFungibleAddress,
    pub nft_resource: ResourceAddress,
    pub nft_id: NonFungibleId,
    pub destination_public_key: RistrettoPublicKey,
    pub fee: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendTransactionRequest {
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub input_refs: Vec<SubstateRequirement>,
    #[serde(default)]
    pub required_substates: Vec<SubstateRequirement>,
    #[serde(default)]
    pub is_dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendInstructionRequest {
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub input_refs: Vec<SubstateRequirement>,
    #[serde(default)]
    pub required_substates: Vec<SubstateRequirement>,
    #[serde(default)]
    pub is_dry_run: bool,
    pub fee: Amount,
    /// Account the trailing fee instruction draws from.
    pub fee_account: ComponentAddress,
    /// When set, the last instruction's output bucket is deposited into this
    /// account before the fee is paid.
    #[serde(default)]
    pub dump_account: Option<ComponentAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSubstateRequest {
    pub substate_address: SubstateId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTemplateDefinitionRequest {
    pub template_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTransactionResultRequest {
    pub transaction_id: TransactionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPublicKeyRequest {
    pub index: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPublicKeyResponse {
    pub public_key: RistrettoPublicKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetWalletRequest {
    pub tari_wallet_daemon_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWalletTokenRequest {
    #[serde(default)]
    pub permissions: Option<Vec<TariPermission>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTokenResponse {
    pub permissions_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendWalletRequest {
    #[serde(default)]
    pub token: Option<String>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_entry_type_tags_are_lowercase() {
        let entry = ResourceEntry::Fungible {
            resource_address: ResourceAddress::from_array([1; 32]),
            balance: Amount::new(500),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "fungible");

        let entry = ResourceEntry::NonFungible {
            resource_address: ResourceAddress::from_array([2; 32]),
            token_ids: vec![],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "nonfungible");
    }
}
