//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use tari_bridge_engine_types::{
    amount::Amount,
    epoch::Epoch,
    ComponentAddress,
    SubstateRequirement,
    TemplateAddress,
};
use tari_crypto::ristretto::{RistrettoPublicKey, RistrettoSecretKey};

use crate::{
    args,
    args::Arg,
    instruction::Instruction,
    signature::TransactionSignature,
    transaction::Transaction,
    unsigned::UnsignedTransaction,
};

#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    unsigned_transaction: UnsignedTransaction,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            unsigned_transaction: UnsignedTransaction::default(),
        }
    }

    pub fn create_account(self, owner_public_key: RistrettoPublicKey) -> Self {
        self.add_instruction(Instruction::CreateAccount {
            owner_public_key,
            workspace_bucket: None,
        })
    }

    pub fn create_account_with_bucket<T: Into<String>>(
        self,
        owner_public_key: RistrettoPublicKey,
        workspace_bucket: T,
    ) -> Self {
        self.add_instruction(Instruction::CreateAccount {
            owner_public_key,
            workspace_bucket: Some(workspace_bucket.into()),
        })
    }

    pub fn call_function<T: ToString>(
        self,
        template_address: TemplateAddress,
        function: T,
        args: Vec<Arg>,
    ) -> Self {
        self.add_instruction(Instruction::CallFunction {
            template_address,
            function: function.to_string(),
            args,
        })
    }

    pub fn call_method(self, component_address: ComponentAddress, method: &str, args: Vec<Arg>) -> Self {
        self.add_instruction(Instruction::CallMethod {
            component_address,
            method: method.to_string(),
            args,
        })
    }

    pub fn put_last_instruction_output_on_workspace<T: AsRef<[u8]>>(self, label: T) -> Self {
        self.add_instruction(Instruction::PutLastInstructionOutputOnWorkspace {
            key: label.as_ref().to_vec(),
        })
    }

    pub fn create_free_test_coins(self, amount: Amount) -> Self {
        self.add_instruction(Instruction::CreateFreeTestCoins { amount })
    }

    /// Appends a fee payment drawn from `component_address`. Flows place
    /// this last so it settles after the transfer instructions it pays for.
    pub fn pay_fee(self, component_address: ComponentAddress, amount: Amount) -> Self {
        self.add_instruction(Instruction::CallMethod {
            component_address,
            method: "pay_fee".to_string(),
            args: args![amount],
        })
    }

    pub fn add_fee_instruction(mut self, instruction: Instruction) -> Self {
        self.unsigned_transaction.fee_instructions.push(instruction);
        self
    }

    pub fn with_fee_instructions<I: IntoIterator<Item = Instruction>>(mut self, instructions: I) -> Self {
        self.unsigned_transaction.fee_instructions.extend(instructions);
        self
    }

    pub fn add_instruction(mut self, instruction: Instruction) -> Self {
        self.unsigned_transaction.instructions.push(instruction);
        self
    }

    pub fn with_instructions<I: IntoIterator<Item = Instruction>>(mut self, instructions: I) -> Self {
        self.unsigned_transaction.instructions.extend(instructions);
        self
    }

    pub fn add_input_ref<I: Into<SubstateRequirement>>(mut self, input: I) -> Self {
        self.unsigned_transaction.input_refs.insert(input.into());
        self
    }

    pub fn with_input_refs<I: IntoIterator<Item = SubstateRequirement>>(mut self, inputs: I) -> Self {
        self.unsigned_transaction.input_refs.extend(inputs);
        self
    }

    pub fn with_min_epoch(mut self, min_epoch: Option<Epoch>) -> Self {
        self.unsigned_transaction.min_epoch = min_epoch;
        self
    }

    pub fn with_max_epoch(mut self, max_epoch: Option<Epoch>) -> Self {
        self.unsigned_transaction.max_epoch = max_epoch;
        self
    }

    pub fn build_unsigned_transaction(self) -> UnsignedTransaction {
        self.unsigned_transaction
    }

    /// Signs the assembled instructions and produces the immutable
    /// transaction. The id is derived from the signed content.
    pub fn build_and_sign(self, secret_key: &RistrettoSecretKey) -> Transaction {
        let signature = TransactionSignature::sign(secret_key, &self.unsigned_transaction);
        Transaction::new(self.unsigned_transaction, signature)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::OsRng;
    use tari_crypto::keys::{PublicKey as PublicKeyT, SecretKey};

    use super::*;

    #[test]
    fn instructions_keep_insertion_order() {
        let secret = RistrettoSecretKey::random(&mut OsRng);
        let public_key = RistrettoPublicKey::from_secret_key(&secret);
        let account = ComponentAddress::from_array([1; 32]);
        let dest = ComponentAddress::from_array([2; 32]);

        let transaction = Transaction::builder()
            .create_account(public_key)
            .call_method(account, "withdraw", args![Amount::new(1)])
            .put_last_instruction_output_on_workspace(crate::BUCKET_KEY)
            .call_method(dest, "deposit", args![Workspace(crate::BUCKET_KEY)])
            .pay_fee(account, Amount::new(1))
            .build_and_sign(&secret);

        let methods: Vec<_> = transaction
            .instructions()
            .iter()
            .map(|i| match i {
                Instruction::CreateAccount { .. } => "create_account",
                Instruction::CallMethod { method, .. } => method.as_str(),
                Instruction::PutLastInstructionOutputOnWorkspace { .. } => "put_on_workspace",
                Instruction::CallFunction { .. } => "call_function",
                Instruction::CreateFreeTestCoins { .. } => "free_test_coins",
            })
            .collect();
        assert_eq!(
            methods,
            ["create_account", "withdraw", "put_on_workspace", "deposit", "pay_fee"]
        );
    }

    #[test]
    fn duplicate_input_refs_are_deduplicated() {
        let resource = tari_bridge_engine_types::ResourceAddress::from_array([3; 32]);
        let builder = TransactionBuilder::new()
            .add_input_ref(resource)
            .add_input_ref(resource);
        let unsigned = builder.build_unsigned_transaction();
        assert_eq!(unsigned.input_refs.len(), 1);
    }
}
