//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::Hash;

macro_rules! impl_object_address {
    ($name:ident, $prefix:literal) => {
        /// Serialized as its canonical prefixed string form.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Hash);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub const fn new(hash: Hash) -> Self {
                Self(hash)
            }

            pub const fn from_array(bytes: [u8; 32]) -> Self {
                Self(Hash::from_array(bytes))
            }

            pub fn hash(&self) -> &Hash {
                &self.0
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }

            /// Accepts both the canonical prefixed form and bare hex.
            pub fn from_hex(s: &str) -> Result<Self, InvalidObjectAddress> {
                let s = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Hash::from_hex(s).map(Self).map_err(|_| InvalidObjectAddress {
                    kind: $prefix,
                    address: s.to_string(),
                })
            }
        }

        impl From<Hash> for $name {
            fn from(hash: Hash) -> Self {
                Self(hash)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = InvalidObjectAddress;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                crate::serde_with::string::serialize(self, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                crate::serde_with::string::deserialize(deserializer)
            }
        }
    };
}

impl_object_address!(ComponentAddress, "component");
impl_object_address!(ResourceAddress, "resource");
impl_object_address!(VaultId, "vault");

#[derive(Debug, thiserror::Error)]
#[error("Invalid {kind} address '{address}'")]
pub struct InvalidObjectAddress {
    kind: &'static str,
    address: String,
}
