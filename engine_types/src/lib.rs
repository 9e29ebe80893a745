//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

pub mod amount;
pub mod confidential;
pub mod epoch;
pub mod hashing;
pub mod metadata;
pub mod non_fungible;
pub mod serde_with;
pub mod substate;
pub mod tagged;
pub mod template;

mod address;
mod error;
mod hash;
mod substate_id;

pub use address::{ComponentAddress, InvalidObjectAddress, ResourceAddress, VaultId};
pub use error::DecodeError;
pub use hash::{Hash, HashParseError};
pub use substate_id::{InvalidSubstateIdFormat, SubstateId, SubstateRequirement};
pub use template::TemplateAddress;
