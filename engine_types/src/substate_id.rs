//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    address::{ComponentAddress, ResourceAddress, VaultId},
    non_fungible::NonFungibleAddress,
};

/// The address of a single piece of ledger state. Serialized as its canonical
/// prefixed string (`component_<hex>`, `resource_<hex>`, `vault_<hex>`,
/// `resource_<hex> nft_<id>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubstateId {
    Component(ComponentAddress),
    Resource(ResourceAddress),
    Vault(VaultId),
    NonFungible(NonFungibleAddress),
}

impl SubstateId {
    pub fn as_component_address(&self) -> Option<ComponentAddress> {
        match self {
            Self::Component(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn as_resource_address(&self) -> Option<ResourceAddress> {
        match self {
            Self::Resource(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn as_vault_id(&self) -> Option<VaultId> {
        match self {
            Self::Vault(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_non_fungible_address(&self) -> Option<&NonFungibleAddress> {
        match self {
            Self::NonFungible(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, Self::Component(_))
    }

    pub fn is_vault(&self) -> bool {
        matches!(self, Self::Vault(_))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }
}

impl From<ComponentAddress> for SubstateId {
    fn from(address: ComponentAddress) -> Self {
        Self::Component(address)
    }
}

impl From<ResourceAddress> for SubstateId {
    fn from(address: ResourceAddress) -> Self {
        Self::Resource(address)
    }
}

impl From<VaultId> for SubstateId {
    fn from(id: VaultId) -> Self {
        Self::Vault(id)
    }
}

impl From<NonFungibleAddress> for SubstateId {
    fn from(address: NonFungibleAddress) -> Self {
        Self::NonFungible(address)
    }
}

impl Display for SubstateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(addr) => write!(f, "{}", addr),
            Self::Resource(addr) => write!(f, "{}", addr),
            Self::Vault(id) => write!(f, "{}", id),
            Self::NonFungible(addr) => write!(f, "{}", addr),
        }
    }
}

impl FromStr for SubstateId {
    type Err = InvalidSubstateIdFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('_') {
            Some(("component", _)) => ComponentAddress::from_str(s)
                .map(Self::Component)
                .map_err(|_| InvalidSubstateIdFormat(s.to_string())),
            Some(("resource", _)) => {
                // `resource_xxx nft_yyy` addresses a single token, bare
                // `resource_xxx` the resource itself
                if s.contains(' ') {
                    NonFungibleAddress::from_str(s)
                        .map(Self::NonFungible)
                        .map_err(|_| InvalidSubstateIdFormat(s.to_string()))
                } else {
                    ResourceAddress::from_str(s)
                        .map(Self::Resource)
                        .map_err(|_| InvalidSubstateIdFormat(s.to_string()))
                }
            },
            Some(("vault", _)) => VaultId::from_str(s)
                .map(Self::Vault)
                .map_err(|_| InvalidSubstateIdFormat(s.to_string())),
            Some(_) | None => Err(InvalidSubstateIdFormat(s.to_string())),
        }
    }
}

impl Serialize for SubstateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_with::string::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for SubstateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde_with::string::deserialize(deserializer)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid substate id '{0}'")]
pub struct InvalidSubstateIdFormat(String);

/// A substate a transaction declares as input. `version: None` means "latest
/// known version".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubstateRequirement {
    pub substate_id: SubstateId,
    pub version: Option<u32>,
}

impl SubstateRequirement {
    pub fn new(substate_id: SubstateId, version: Option<u32>) -> Self {
        Self { substate_id, version }
    }

    pub fn unversioned<T: Into<SubstateId>>(substate_id: T) -> Self {
        Self {
            substate_id: substate_id.into(),
            version: None,
        }
    }

    pub fn versioned<T: Into<SubstateId>>(substate_id: T, version: u32) -> Self {
        Self {
            substate_id: substate_id.into(),
            version: Some(version),
        }
    }
}

impl From<SubstateId> for SubstateRequirement {
    fn from(substate_id: SubstateId) -> Self {
        Self::unversioned(substate_id)
    }
}

impl From<ComponentAddress> for SubstateRequirement {
    fn from(address: ComponentAddress) -> Self {
        Self::unversioned(address)
    }
}

impl From<ResourceAddress> for SubstateRequirement {
    fn from(address: ResourceAddress) -> Self {
        Self::unversioned(address)
    }
}

impl From<VaultId> for SubstateRequirement {
    fn from(id: VaultId) -> Self {
        Self::unversioned(id)
    }
}

impl From<NonFungibleAddress> for SubstateRequirement {
    fn from(address: NonFungibleAddress) -> Self {
        Self::unversioned(address)
    }
}

impl Display for SubstateRequirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(v) => write!(f, "{}:{}", self.substate_id, v),
            None => write!(f, "{}", self.substate_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::non_fungible::NonFungibleId;

    #[test]
    fn parses_all_declared_prefixes() {
        let component = ComponentAddress::from_array([1; 32]);
        let resource = ResourceAddress::from_array([2; 32]);
        let vault = VaultId::from_array([3; 32]);
        let nft = NonFungibleAddress::new(resource, NonFungibleId::Uint32(5));

        for (s, expected) in [
            (component.to_string(), SubstateId::Component(component)),
            (resource.to_string(), SubstateId::Resource(resource)),
            (vault.to_string(), SubstateId::Vault(vault)),
            (nft.to_string(), SubstateId::NonFungible(nft.clone())),
        ] {
            assert_eq!(SubstateId::from_str(&s).unwrap(), expected);
        }
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert!(SubstateId::from_str("feeclaim_0000").is_err());
        assert!(SubstateId::from_str("garbage").is_err());
    }
}
