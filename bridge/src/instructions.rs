//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Page-supplied instruction submission. The page assembles its own
//! instruction list; the bridge renders it for confirmation, optionally
//! appends the dump-account and fee instructions, then signs and submits.

use log::*;
use tari_bridge_indexer_client::types::SubmitTransactionRequest;
use tari_bridge_transaction::{args, Instruction, Transaction, DUMP_BUCKET_KEY};

use crate::{
    error::BridgeError,
    host::{DialogContent, SeedSource, SettingsStore, UserInteraction},
    keys::DEFAULT_ACCOUNT_INDEX,
    network::{IndexerNetwork, WalletDaemonNetwork},
    types::{SendInstructionRequest, SendTransactionRequest, TransferResponse},
    Bridge,
};

const LOG_TARGET: &str = "tari::bridge::instructions";

impl<TNetwork, TWalletRpc, THost> Bridge<TNetwork, TWalletRpc, THost>
where
    TNetwork: IndexerNetwork,
    TWalletRpc: WalletDaemonNetwork,
    THost: UserInteraction + SeedSource + SettingsStore,
{
    pub async fn send_transaction(
        &self,
        request: SendTransactionRequest,
    ) -> Result<Option<TransferResponse>, BridgeError> {
        let mut content = DialogContent::new("New transaction")
            .line("This website requests a transaction from your account, do you want to proceed?");
        for instruction in &request.instructions {
            content = content.line(instruction.to_string());
        }
        if !self.host().confirm(content).await? {
            info!(target: LOG_TARGET, "Transaction declined by user");
            return Ok(None);
        }

        let keypair = self.key_manager().derive_key_pair(DEFAULT_ACCOUNT_INDEX).await?;
        let transaction = Transaction::builder()
            .with_instructions(request.instructions)
            .with_input_refs(request.input_refs)
            .build_and_sign(&keypair.secret_key);

        let transaction_id = *transaction.id();
        info!(target: LOG_TARGET, "Submitting page transaction {}", transaction_id);
        self.network()
            .submit_transaction(SubmitTransactionRequest {
                transaction,
                is_dry_run: request.is_dry_run,
                required_substates: request.required_substates,
            })
            .await?;
        Ok(Some(TransferResponse { transaction_id }))
    }

    /// Like [`Self::send_transaction`], but applies the dump-account
    /// convention and always appends the fee payment as the final
    /// instruction.
    pub async fn send_instruction(
        &self,
        request: SendInstructionRequest,
    ) -> Result<Option<TransferResponse>, BridgeError> {
        let SendInstructionRequest {
            mut instructions,
            input_refs,
            required_substates,
            is_dry_run,
            fee,
            fee_account,
            dump_account,
        } = request;

        if let Some(dump_account) = dump_account {
            instructions.push(Instruction::PutLastInstructionOutputOnWorkspace {
                key: DUMP_BUCKET_KEY.to_vec(),
            });
            instructions.push(Instruction::CallMethod {
                component_address: dump_account,
                method: "deposit".to_string(),
                args: args![Workspace(DUMP_BUCKET_KEY)],
            });
        }
        instructions.push(Instruction::CallMethod {
            component_address: fee_account,
            method: "pay_fee".to_string(),
            args: args![fee],
        });

        self.send_transaction(SendTransactionRequest {
            instructions,
            input_refs,
            required_substates,
            is_dry_run,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use tari_bridge_engine_types::{amount::Amount, ComponentAddress};

    use super::*;
    use crate::test_utils::{test_bridge, test_bridge_with_host, MockHost, MockIndexer};

    fn call(method: &str) -> Instruction {
        Instruction::CallMethod {
            component_address: ComponentAddress::from_array([8; 32]),
            method: method.to_string(),
            args: args![],
        }
    }

    #[tokio::test]
    async fn dump_account_appends_workspace_deposit_and_fee() {
        let bridge = test_bridge(MockIndexer::new());
        let dump = ComponentAddress::from_array([9; 32]);
        let request = SendInstructionRequest {
            instructions: vec![call("mint")],
            input_refs: vec![],
            required_substates: vec![],
            is_dry_run: false,
            fee: Amount::new(3),
            fee_account: dump,
            dump_account: Some(dump),
        };
        bridge.send_instruction(request).await.unwrap().unwrap();

        let submissions = bridge.network().submissions();
        let instructions = submissions[0].transaction.instructions();
        assert_eq!(instructions.len(), 4);
        assert!(instructions[0].is_method_call("mint"));
        assert!(matches!(
            &instructions[1],
            Instruction::PutLastInstructionOutputOnWorkspace { key } if key == DUMP_BUCKET_KEY
        ));
        assert!(instructions[2].is_method_call("deposit"));
        assert!(instructions[3].is_method_call("pay_fee"));
    }

    #[tokio::test]
    async fn confirmation_dialog_lists_the_instructions() {
        let bridge = test_bridge(MockIndexer::new());
        let request = SendTransactionRequest {
            instructions: vec![call("swap")],
            input_refs: vec![],
            required_substates: vec![],
            is_dry_run: false,
        };
        bridge.send_transaction(request).await.unwrap();
        let confirms = bridge.host().confirms();
        assert!(confirms[0].mentions("swap"));
    }

    #[tokio::test]
    async fn declined_transaction_is_not_submitted() {
        let bridge = test_bridge_with_host(MockIndexer::new(), MockHost::new().with_confirm_response(false));
        let request = SendTransactionRequest {
            instructions: vec![call("swap")],
            input_refs: vec![],
            required_substates: vec![],
            is_dry_run: false,
        };
        assert!(bridge.send_transaction(request).await.unwrap().is_none());
        assert!(bridge.network().submissions().is_empty());
    }
}
