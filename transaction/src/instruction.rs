//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tari_bridge_engine_types::{amount::Amount, ComponentAddress, TemplateAddress};
use tari_crypto::ristretto::RistrettoPublicKey;

use crate::args::Arg;

/// One ordered step of a transaction. Order is semantically significant:
/// a workspace slot must be populated by the instruction immediately before
/// the one that consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    CreateAccount {
        owner_public_key: RistrettoPublicKey,
        #[serde(default)]
        workspace_bucket: Option<String>,
    },
    CallFunction {
        #[serde(with = "tari_bridge_engine_types::serde_with::string")]
        template_address: TemplateAddress,
        function: String,
        args: Vec<Arg>,
    },
    CallMethod {
        component_address: ComponentAddress,
        method: String,
        args: Vec<Arg>,
    },
    PutLastInstructionOutputOnWorkspace {
        key: Vec<u8>,
    },
    CreateFreeTestCoins {
        amount: Amount,
    },
}

impl Instruction {
    /// The component addresses this instruction reads or writes, used to
    /// build required-substate declarations.
    pub fn referenced_component(&self) -> Option<&ComponentAddress> {
        match self {
            Self::CallMethod { component_address, .. } => Some(component_address),
            _ => None,
        }
    }

    pub fn is_method_call(&self, method: &str) -> bool {
        matches!(self, Self::CallMethod { method: m, .. } if m == method)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateAccount {
                owner_public_key,
                workspace_bucket,
            } => {
                write!(f, "CreateAccount {{ owner_public_key: {}, bucket: ", owner_public_key)?;
                match workspace_bucket {
                    Some(bucket) => write!(f, "{}", bucket)?,
                    None => write!(f, "None")?,
                }
                write!(f, " }}")
            },
            Self::CallFunction {
                template_address,
                function,
                args,
            } => write!(
                f,
                "CallFunction {{ template_address: {}, function: {}, args: {:?} }}",
                template_address, function, args
            ),
            Self::CallMethod {
                component_address,
                method,
                args,
            } => write!(
                f,
                "CallMethod {{ component_address: {}, method: {}, args: {:?} }}",
                component_address, method, args
            ),
            Self::PutLastInstructionOutputOnWorkspace { key } => {
                write!(f, "PutLastInstructionOutputOnWorkspace {{ key: {:?} }}", key)
            },
            Self::CreateFreeTestCoins { amount } => {
                write!(f, "CreateFreeTestCoins {{ amount: {} }}", amount)
            },
        }
    }
}
