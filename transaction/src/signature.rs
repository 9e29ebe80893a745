//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use indexmap::IndexSet;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tari_bridge_engine_types::{
    epoch::Epoch,
    hashing::{hasher64, EngineHashDomainLabel},
    SubstateRequirement,
};
use tari_crypto::{
    keys::PublicKey as PublicKeyT,
    ristretto::{RistrettoPublicKey, RistrettoSchnorr, RistrettoSecretKey},
};

use crate::{instruction::Instruction, unsigned::UnsignedTransaction};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct TransactionSignature {
    public_key: RistrettoPublicKey,
    signature: RistrettoSchnorr,
}

impl TransactionSignature {
    pub fn new(public_key: RistrettoPublicKey, signature: RistrettoSchnorr) -> Self {
        Self { public_key, signature }
    }

    pub fn sign(secret_key: &RistrettoSecretKey, transaction: &UnsignedTransaction) -> Self {
        let public_key = RistrettoPublicKey::from_secret_key(secret_key);
        let challenge = Self::create_challenge(transaction);

        Self {
            signature: RistrettoSchnorr::sign(secret_key, challenge, &mut OsRng)
                .expect("sign is infallible with Ristretto keys"),
            public_key,
        }
    }

    pub fn verify(&self, transaction: &UnsignedTransaction) -> bool {
        let challenge = Self::create_challenge(transaction);
        self.signature.verify(&self.public_key, challenge)
    }

    pub fn signature(&self) -> &RistrettoSchnorr {
        &self.signature
    }

    pub fn public_key(&self) -> &RistrettoPublicKey {
        &self.public_key
    }

    fn create_challenge(transaction: &UnsignedTransaction) -> [u8; 64] {
        let fields = TransactionSignatureFields::from(transaction);
        hasher64(EngineHashDomainLabel::TransactionSignature)
            .chain(&fields)
            .result()
    }
}

/// The subset of transaction fields covered by the signature.
#[derive(Debug, Clone, Serialize)]
struct TransactionSignatureFields<'a> {
    fee_instructions: &'a [Instruction],
    instructions: &'a [Instruction],
    input_refs: &'a IndexSet<SubstateRequirement>,
    min_epoch: Option<Epoch>,
    max_epoch: Option<Epoch>,
}

impl<'a> From<&'a UnsignedTransaction> for TransactionSignatureFields<'a> {
    fn from(transaction: &'a UnsignedTransaction) -> Self {
        Self {
            fee_instructions: &transaction.fee_instructions,
            instructions: &transaction.instructions,
            input_refs: &transaction.input_refs,
            min_epoch: transaction.min_epoch,
            max_epoch: transaction.max_epoch,
        }
    }
}

#[cfg(test)]
mod tests {
    use tari_crypto::keys::SecretKey;

    use super::*;
    use crate::args;

    fn sample_transaction() -> UnsignedTransaction {
        UnsignedTransaction {
            instructions: vec![Instruction::PutLastInstructionOutputOnWorkspace {
                key: b"bucket".to_vec(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn it_signs_and_verifies() {
        let secret = RistrettoSecretKey::random(&mut OsRng);
        let transaction = sample_transaction();
        let signature = TransactionSignature::sign(&secret, &transaction);
        assert!(signature.verify(&transaction));
    }

    #[test]
    fn it_rejects_a_mutated_transaction() {
        let secret = RistrettoSecretKey::random(&mut OsRng);
        let mut transaction = sample_transaction();
        let signature = TransactionSignature::sign(&secret, &transaction);

        transaction.instructions.push(Instruction::CallMethod {
            component_address: tari_bridge_engine_types::ComponentAddress::from_array([9; 32]),
            method: "withdraw".to_string(),
            args: args![],
        });
        assert!(!signature.verify(&transaction));
    }
}
