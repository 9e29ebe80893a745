//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};
use tari_crypto::ristretto::RistrettoPublicKey;

use crate::{
    amount::Amount,
    error::DecodeError,
    non_fungible::NonFungibleId,
    template::TemplateAddress,
    ResourceAddress,
};

/// A versioned piece of ledger state as read from the indexer. Immutable once
/// read at a given version; a later transaction produces a new version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substate {
    pub substate: SubstateValue,
    pub version: u32,
}

impl Substate {
    pub fn new(substate: SubstateValue, version: u32) -> Self {
        Self { substate, version }
    }

    /// Decodes a raw indexer substate envelope. Any unrecognized shape is a
    /// hard [`DecodeError`].
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        serde_json::from_value(value.clone()).map_err(DecodeError::from)
    }
}

/// The body of a substate. The wire form is serde's externally-tagged
/// representation, matching the indexer's `{"Component": {...}}` JSON; a
/// variant outside this set fails decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubstateValue {
    Component(ComponentHeader),
    Vault(Vault),
    Resource(Resource),
    NonFungible(NonFungible),
}

impl SubstateValue {
    pub fn as_component(&self) -> Option<&ComponentHeader> {
        match self {
            Self::Component(header) => Some(header),
            _ => None,
        }
    }

    pub fn as_vault(&self) -> Option<&Vault> {
        match self {
            Self::Vault(vault) => Some(vault),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn component(&self) -> Result<&ComponentHeader, DecodeError> {
        self.as_component().ok_or(DecodeError::UnexpectedShape {
            context: "substate",
            details: "expected a Component substate".to_string(),
        })
    }

    pub fn vault(&self) -> Result<&Vault, DecodeError> {
        self.as_vault().ok_or(DecodeError::UnexpectedShape {
            context: "substate",
            details: "expected a Vault substate".to_string(),
        })
    }

    pub fn resource(&self) -> Result<&Resource, DecodeError> {
        self.as_resource().ok_or(DecodeError::UnexpectedShape {
            context: "substate",
            details: "expected a Resource substate".to_string(),
        })
    }
}

/// A component instance. `state` is the template-defined CBOR-as-JSON blob;
/// well-known paths (e.g. `$.vaults` for accounts) are walked with
/// [`crate::tagged`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentHeader {
    pub template_address: TemplateAddress,
    #[serde(default)]
    pub module_name: String,
    pub body: ComponentBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBody {
    pub state: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vault {
    pub resource_container: ResourceContainer,
}

impl Vault {
    pub fn resource_address(&self) -> &ResourceAddress {
        self.resource_container.resource_address()
    }
}

/// The funds held by a vault. Exactly one variant per vault, keyed by the
/// container tag the indexer returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResourceContainer {
    Fungible {
        address: ResourceAddress,
        amount: Amount,
    },
    Confidential {
        address: ResourceAddress,
        revealed_amount: Amount,
        #[serde(default)]
        commitments: serde_json::Map<String, serde_json::Value>,
    },
    NonFungible {
        address: ResourceAddress,
        token_ids: Vec<NonFungibleId>,
    },
}

impl ResourceContainer {
    pub fn resource_address(&self) -> &ResourceAddress {
        match self {
            Self::Fungible { address, .. } |
            Self::Confidential { address, .. } |
            Self::NonFungible { address, .. } => address,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Fungible,
    Confidential,
    NonFungible,
}

/// A resource definition substate. Only the fields the bridge consumes are
/// modeled; the confidential view key is carried into withdraw proofs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_type: ResourceType,
    #[serde(default)]
    pub view_key: Option<RistrettoPublicKey>,
    #[serde(default)]
    pub total_supply: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonFungible {
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub mutable_data: serde_json::Value,
}

/// Decodes a raw indexer substate body, mapping any unrecognized shape to a
/// hard [`DecodeError`].
pub fn decode_substate_value(value: &serde_json::Value) -> Result<SubstateValue, DecodeError> {
    serde_json::from_value(value.clone()).map_err(DecodeError::from)
}
