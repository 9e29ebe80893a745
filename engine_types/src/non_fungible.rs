//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tari_utilities::hex::{from_hex, to_hex};

use crate::address::ResourceAddress;

/// A token id within a non-fungible resource. The wire representation is
/// serde's externally-tagged form (`{"Uuid": [...]}`, `{"String": "..."}`,
/// ...); an unrecognized tag fails deserialization, which callers surface as
/// a decode error.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NonFungibleId {
    Uuid(#[serde(with = "crate::serde_with::hex")] [u8; 16]),
    String(String),
    Uint32(u32),
    Uint64(u64),
}

impl NonFungibleId {
    /// Canonical single-string form, e.g. `uuid_<hex>`, `str_<s>`, `u32_<n>`,
    /// `u64_<n>`.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Self::Uuid(bytes) => format!("uuid_{}", to_hex(bytes)),
            Self::String(s) => format!("str_{}", s),
            Self::Uint32(n) => format!("u32_{}", n),
            Self::Uint64(n) => format!("u64_{}", n),
        }
    }

    pub fn try_from_canonical_string(s: &str) -> Result<Self, InvalidNonFungibleIdFormat> {
        let err = || InvalidNonFungibleIdFormat(s.to_string());
        match s.split_once('_') {
            Some(("uuid", hex)) => {
                let bytes = from_hex(hex).map_err(|_| err())?;
                let bytes = <[u8; 16]>::try_from(bytes).map_err(|_| err())?;
                Ok(Self::Uuid(bytes))
            },
            Some(("str", value)) => Ok(Self::String(value.to_string())),
            Some(("u32", value)) => value.parse().map(Self::Uint32).map_err(|_| err()),
            Some(("u64", value)) => value.parse().map(Self::Uint64).map_err(|_| err()),
            _ => Err(err()),
        }
    }
}

impl Display for NonFungibleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid non-fungible id '{0}'")]
pub struct InvalidNonFungibleIdFormat(String);

/// Fully-qualified address of one non-fungible token:
/// `resource_<hex> nft_<canonical id>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonFungibleAddress {
    resource_address: ResourceAddress,
    id: NonFungibleId,
}

impl NonFungibleAddress {
    pub const fn new(resource_address: ResourceAddress, id: NonFungibleId) -> Self {
        Self { resource_address, id }
    }

    pub fn resource_address(&self) -> &ResourceAddress {
        &self.resource_address
    }

    pub fn id(&self) -> &NonFungibleId {
        &self.id
    }
}

impl Display for NonFungibleAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} nft_{}", self.resource_address, self.id)
    }
}

impl FromStr for NonFungibleAddress {
    type Err = InvalidNonFungibleIdFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidNonFungibleIdFormat(s.to_string());
        let (resource, id) = s.split_once(' ').ok_or_else(err)?;
        let resource_address = ResourceAddress::from_str(resource).map_err(|_| err())?;
        let id = id.strip_prefix("nft_").ok_or_else(err)?;
        let id = NonFungibleId::try_from_canonical_string(id)?;
        Ok(Self::new(resource_address, id))
    }
}

impl Serialize for NonFungibleAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_with::string::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for NonFungibleAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde_with::string::deserialize(deserializer)
    }
}
