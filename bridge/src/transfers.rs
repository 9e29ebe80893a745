//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Fungible and confidential transfer flows. Both follow the same protocol:
//! assemble, confirm with the user, then sign and submit. A declined
//! confirmation is a no-op result, never an error, and nothing is signed
//! before the user accepts.

use log::*;
use tari_bridge_engine_types::{
    confidential::{ConfidentialInputSelection, ConfidentialWithdrawProof},
    substate::Substate,
    DecodeError,
    SubstateId,
    SubstateRequirement,
};
use tari_bridge_indexer_client::types::SubmitTransactionRequest;
use tari_bridge_transaction::{args, Transaction, BUCKET_KEY};

use crate::{
    error::BridgeError,
    host::{DialogContent, SeedSource, SettingsStore, UserInteraction},
    keys::{account_component_address, DEFAULT_ACCOUNT_INDEX},
    network::{IndexerNetwork, WalletDaemonNetwork},
    types::{ConfidentialTransferRequest, TransferRequest, TransferResponse},
    Bridge,
};

const LOG_TARGET: &str = "tari::bridge::transfers";

impl<TNetwork, TWalletRpc, THost> Bridge<TNetwork, TWalletRpc, THost>
where
    TNetwork: IndexerNetwork,
    TWalletRpc: WalletDaemonNetwork,
    THost: UserInteraction + SeedSource + SettingsStore,
{
    /// Transfers `amount` of a fungible resource to the account owned by
    /// `destination_public_key`, creating the destination account when it
    /// does not exist yet.
    pub async fn transfer(&self, request: TransferRequest) -> Result<Option<TransferResponse>, BridgeError> {
        let content = DialogContent::new("Transfer")
            .line("This website requests a transfer of funds from your account, do you want to proceed?")
            .field("Destination", &request.destination_public_key)
            .field("Resource", &request.resource_address)
            .field("Amount", &request.amount)
            .field("Fee", &request.fee);
        if !self.host().confirm(content).await? {
            info!(target: LOG_TARGET, "Transfer declined by user");
            return Ok(None);
        }

        let keypair = self.key_manager().derive_key_pair(DEFAULT_ACCOUNT_INDEX).await?;
        let source_account = account_component_address(&keypair.public_key);
        let destination_account = account_component_address(&request.destination_public_key);

        let destination_exists = self
            .network()
            .substate_exists(&SubstateId::Component(destination_account))
            .await;

        let mut builder = Transaction::builder();
        if !destination_exists {
            builder = builder.create_account(request.destination_public_key.clone());
        }
        let transaction = builder
            .call_method(
                source_account,
                "withdraw",
                args![request.resource_address, request.amount],
            )
            .put_last_instruction_output_on_workspace(BUCKET_KEY)
            .call_method(destination_account, "deposit", args![Workspace(BUCKET_KEY)])
            .pay_fee(source_account, request.fee)
            .add_input_ref(request.resource_address)
            .build_and_sign(&keypair.secret_key);

        // The destination is an input only when it predates this
        // transaction; a just-created account must not be declared.
        let mut required_substates = vec![
            SubstateRequirement::unversioned(source_account),
            SubstateRequirement::unversioned(request.resource_address),
        ];
        if destination_exists {
            required_substates.push(SubstateRequirement::unversioned(destination_account));
        }

        let transaction_id = *transaction.id();
        info!(
            target: LOG_TARGET,
            "Submitting transfer transaction {} to {}", transaction_id, destination_account
        );
        let response = self
            .network()
            .submit_transaction(SubmitTransactionRequest {
                transaction,
                is_dry_run: false,
                required_substates,
            })
            .await?;
        Ok(Some(TransferResponse {
            transaction_id: response.transaction_id,
        }))
    }

    /// Confidential variant: the source vault and the resource definition
    /// are resolved up front (the withdraw proof needs them), and input
    /// selection is restricted to confidential commitments.
    pub async fn confidential_transfer(
        &self,
        request: ConfidentialTransferRequest,
    ) -> Result<Option<TransferResponse>, BridgeError> {
        let keypair = self.key_manager().derive_key_pair(DEFAULT_ACCOUNT_INDEX).await?;
        let source_account = account_component_address(&keypair.public_key);

        let vault_id = self
            .vault_for_resource(&source_account, &request.resource_address)
            .await?;
        let vault_response = self.network().inspect_substate(&SubstateId::Vault(vault_id), None).await?;
        let raw_vault = vault_response.substate.ok_or(DecodeError::MissingField {
            context: "vault substate",
            field: vault_id.to_string(),
        })?;
        // decoded for shape validation; the proof itself only needs the
        // resource view key
        Substate::from_value(&raw_vault)?.substate.vault()?;

        let resource_response = self
            .network()
            .inspect_substate(&SubstateId::Resource(request.resource_address), None)
            .await?;
        let raw_resource = resource_response.substate.ok_or(DecodeError::MissingField {
            context: "resource substate",
            field: request.resource_address.to_string(),
        })?;
        let resource_substate = Substate::from_value(&raw_resource)?;
        let resource = resource_substate.substate.resource()?;

        let content = DialogContent::new("Confidential Transfer")
            .line("This website requests a confidential transfer of funds from your account, do you want to proceed?")
            .field("Destination", &request.destination_public_key)
            .field("Resource", &request.resource_address)
            .field("Amount", &request.amount)
            .field("Fee", &request.fee);
        if !self.host().confirm(content).await? {
            info!(target: LOG_TARGET, "Confidential transfer declined by user");
            return Ok(None);
        }

        let destination_account = account_component_address(&request.destination_public_key);
        let destination_exists = self
            .network()
            .substate_exists(&SubstateId::Component(destination_account))
            .await;

        let proof = ConfidentialWithdrawProof {
            amount: request.amount,
            input_selection: ConfidentialInputSelection::ConfidentialOnly,
            destination_public_key: request.destination_public_key.clone(),
            resource_view_key: resource.view_key.clone(),
        };

        let mut builder = Transaction::builder();
        if !destination_exists {
            builder = builder.create_account(request.destination_public_key.clone());
        }
        let transaction = builder
            .call_method(
                source_account,
                "withdraw_confidential",
                args![request.resource_address, proof],
            )
            .put_last_instruction_output_on_workspace(BUCKET_KEY)
            .call_method(destination_account, "deposit", args![Workspace(BUCKET_KEY)])
            .pay_fee(source_account, request.fee)
            .add_input_ref(request.resource_address)
            .build_and_sign(&keypair.secret_key);

        let mut required_substates = vec![
            SubstateRequirement::unversioned(source_account),
            SubstateRequirement::unversioned(request.resource_address),
        ];
        if destination_exists {
            required_substates.push(SubstateRequirement::unversioned(destination_account));
        }

        info!(
            target: LOG_TARGET,
            "Submitting confidential transfer transaction {} to {}",
            transaction.id(),
            destination_account
        );
        let response = self
            .network()
            .submit_transaction(SubmitTransactionRequest {
                transaction,
                is_dry_run: false,
                required_substates,
            })
            .await?;
        Ok(Some(TransferResponse {
            transaction_id: response.transaction_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use tari_bridge_engine_types::{amount::Amount, ResourceAddress, VaultId};
    use tari_bridge_transaction::Instruction;
    use tari_crypto::{
        keys::{PublicKey as _, SecretKey},
        ristretto::{RistrettoPublicKey, RistrettoSecretKey},
    };

    use super::*;
    use crate::test_utils::{
        account_component_substate,
        confidential_vault,
        resource_substate,
        test_bridge,
        test_bridge_with_host,
        MockHost,
        MockIndexer,
    };

    fn destination_key() -> RistrettoPublicKey {
        let secret = RistrettoSecretKey::random(&mut rand::rngs::OsRng);
        RistrettoPublicKey::from_secret_key(&secret)
    }

    fn transfer_request() -> TransferRequest {
        TransferRequest {
            amount: Amount::new(100),
            resource_address: ResourceAddress::from_array([0xaa; 32]),
            destination_public_key: destination_key(),
            fee: Amount::new(5),
        }
    }

    #[tokio::test]
    async fn declined_confirmation_is_a_noop() {
        let host = MockHost::new().with_confirm_response(false);
        let bridge = test_bridge_with_host(MockIndexer::new(), host);

        let result = bridge.transfer(transfer_request()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(bridge.network().submissions().len(), 0);
    }

    #[tokio::test]
    async fn dialog_names_the_operation_fields_verbatim() {
        let bridge = test_bridge(MockIndexer::new());
        let request = transfer_request();
        bridge.transfer(request.clone()).await.unwrap();

        let confirms = bridge.host().confirms();
        assert_eq!(confirms.len(), 1);
        assert!(confirms[0].mentions(&request.destination_public_key.to_string()));
        assert!(confirms[0].mentions(&request.resource_address.to_string()));
        assert!(confirms[0].mentions("**Amount:** 100"));
        assert!(confirms[0].mentions("**Fee:** 5"));
    }

    #[tokio::test]
    async fn missing_destination_prepends_create_account() {
        let bridge = test_bridge(MockIndexer::new());
        let request = transfer_request();
        bridge.transfer(request.clone()).await.unwrap();

        let submissions = bridge.network().submissions();
        assert_eq!(submissions.len(), 1);
        let instructions = submissions[0].transaction.instructions().to_vec();
        assert!(matches!(&instructions[0], Instruction::CreateAccount { owner_public_key, .. }
            if *owner_public_key == request.destination_public_key));
        assert!(instructions[1].is_method_call("withdraw"));

        // not-yet-existing destination is not declared as an input
        let destination_account = account_component_address(&request.destination_public_key);
        assert!(!submissions[0]
            .required_substates
            .iter()
            .any(|r| r.substate_id == SubstateId::Component(destination_account)));
    }

    #[tokio::test]
    async fn existing_destination_is_declared_and_not_created() {
        let indexer = MockIndexer::new();
        let request = transfer_request();
        let destination_account = account_component_address(&request.destination_public_key);
        indexer.insert_substate(
            SubstateId::Component(destination_account),
            account_component_substate(&[]),
        );
        let bridge = test_bridge(indexer);
        bridge.transfer(request.clone()).await.unwrap();

        let submissions = bridge.network().submissions();
        let instructions = submissions[0].transaction.instructions();
        assert!(instructions[0].is_method_call("withdraw"));
        assert!(submissions[0]
            .required_substates
            .iter()
            .any(|r| r.substate_id == SubstateId::Component(destination_account)));
    }

    #[tokio::test]
    async fn confidential_transfer_carries_input_selection_mode() {
        let indexer = MockIndexer::new();
        let bridge = test_bridge(indexer);
        let keypair = bridge.key_manager().derive_key_pair(0).await.unwrap();
        let source_account = account_component_address(&keypair.public_key);

        let resource = ResourceAddress::from_array([0xbb; 32]);
        let vault_id = VaultId::from_array([4; 32]);
        bridge.network().insert_substate(
            SubstateId::Component(source_account),
            account_component_substate(&[(resource, vault_id)]),
        );
        bridge
            .network()
            .insert_substate(SubstateId::Vault(vault_id), confidential_vault(resource, Amount::new(10)));
        bridge
            .network()
            .insert_substate(SubstateId::Resource(resource), resource_substate());

        let request = ConfidentialTransferRequest {
            amount: Amount::new(7),
            resource_address: resource,
            destination_public_key: destination_key(),
            fee: Amount::new(2),
        };
        bridge.confidential_transfer(request).await.unwrap().unwrap();

        let submissions = bridge.network().submissions();
        assert_eq!(submissions.len(), 1);
        let withdraw = submissions[0]
            .transaction
            .instructions()
            .iter()
            .find(|i| i.is_method_call("withdraw_confidential"))
            .expect("no withdraw_confidential instruction");
        let Instruction::CallMethod { args, .. } = withdraw else {
            unreachable!()
        };
        let proof = args[1].as_literal().unwrap();
        assert_eq!(proof["input_selection"], "ConfidentialOnly");
    }

    #[tokio::test]
    async fn confidential_transfer_without_vault_fails() {
        let indexer = MockIndexer::new();
        let bridge = test_bridge(indexer);
        let keypair = bridge.key_manager().derive_key_pair(0).await.unwrap();
        let source_account = account_component_address(&keypair.public_key);
        bridge
            .network()
            .insert_substate(SubstateId::Component(source_account), account_component_substate(&[]));

        let request = ConfidentialTransferRequest {
            amount: Amount::new(7),
            resource_address: ResourceAddress::from_array([0xdd; 32]),
            destination_public_key: destination_key(),
            fee: Amount::new(2),
        };
        let err = bridge.confidential_transfer(request).await.unwrap_err();
        assert!(matches!(err, BridgeError::VaultNotFound { .. }));
    }
}
