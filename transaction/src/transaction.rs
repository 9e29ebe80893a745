//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tari_bridge_engine_types::{
    epoch::Epoch,
    hashing::{hasher32, EngineHashDomainLabel},
    SubstateRequirement,
};
use tari_crypto::tari_utilities::hex::{from_hex, to_hex};

use crate::{builder::TransactionBuilder, instruction::Instruction, signature::TransactionSignature};

/// Identifies a signed transaction; derived from the signed content and used
/// as the poll key for finality queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(
    #[serde(with = "tari_bridge_engine_types::serde_with::hex")] [u8; 32],
);

impl TransactionId {
    pub fn from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_hex(&self.0))
    }
}

impl FromStr for TransactionId {
    type Err = TransactionIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = from_hex(s).map_err(|_| TransactionIdParseError(s.to_string()))?;
        let bytes = <[u8; 32]>::try_from(bytes).map_err(|_| TransactionIdParseError(s.to_string()))?;
        Ok(Self(bytes))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid transaction id '{0}'")]
pub struct TransactionIdParseError(String);

/// A signed, immutable transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    fee_instructions: Vec<Instruction>,
    instructions: Vec<Instruction>,
    input_refs: IndexSet<SubstateRequirement>,
    min_epoch: Option<Epoch>,
    max_epoch: Option<Epoch>,
    signature: TransactionSignature,
}

impl Transaction {
    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::new()
    }

    pub(crate) fn new(
        unsigned: crate::unsigned::UnsignedTransaction,
        signature: TransactionSignature,
    ) -> Self {
        let id = hasher32(EngineHashDomainLabel::Transaction)
            .chain(&unsigned)
            .chain(signature.public_key())
            .chain(signature.signature())
            .result();
        Self {
            id: TransactionId::from_array(id.into_array()),
            fee_instructions: unsigned.fee_instructions,
            instructions: unsigned.instructions,
            input_refs: unsigned.input_refs,
            min_epoch: unsigned.min_epoch,
            max_epoch: unsigned.max_epoch,
            signature,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn fee_instructions(&self) -> &[Instruction] {
        &self.fee_instructions
    }

    pub fn input_refs(&self) -> &IndexSet<SubstateRequirement> {
        &self.input_refs
    }

    pub fn min_epoch(&self) -> Option<Epoch> {
        self.min_epoch
    }

    pub fn max_epoch(&self) -> Option<Epoch> {
        self.max_epoch
    }

    pub fn signature(&self) -> &TransactionSignature {
        &self.signature
    }

    pub fn verify_signature(&self) -> bool {
        let unsigned = crate::unsigned::UnsignedTransaction {
            fee_instructions: self.fee_instructions.clone(),
            instructions: self.instructions.clone(),
            input_refs: self.input_refs.clone(),
            min_epoch: self.min_epoch,
            max_epoch: self.max_epoch,
        };
        self.signature.verify(&unsigned)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::OsRng;
    use tari_bridge_engine_types::{amount::Amount, ComponentAddress};
    use tari_crypto::{keys::SecretKey, ristretto::RistrettoSecretKey};

    use super::*;
    use crate::args;

    fn builder() -> TransactionBuilder {
        Transaction::builder()
            .call_method(ComponentAddress::from_array([1; 32]), "withdraw", args![Amount::new(10)])
            .put_last_instruction_output_on_workspace(crate::BUCKET_KEY)
            .call_method(
                ComponentAddress::from_array([2; 32]),
                "deposit",
                args![Workspace(crate::BUCKET_KEY)],
            )
    }

    #[test]
    fn it_signs_and_verifies() {
        let secret = RistrettoSecretKey::random(&mut OsRng);
        let transaction = builder().build_and_sign(&secret);
        assert!(transaction.verify_signature());
    }

    #[test]
    fn it_round_trips_through_json() {
        let secret = RistrettoSecretKey::random(&mut OsRng);
        let transaction = builder().build_and_sign(&secret);
        let json = serde_json::to_value(&transaction).unwrap();
        let decoded: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, transaction);
        assert!(decoded.verify_signature());
    }

    #[test]
    fn ids_differ_per_signing() {
        // The Schnorr nonce is random, so re-signing identical content yields
        // a distinct id.
        let secret = RistrettoSecretKey::random(&mut OsRng);
        let a = builder().build_and_sign(&secret);
        let b = builder().build_and_sign(&secret);
        assert_ne!(a.id(), b.id());
    }
}
