//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Account-NFT flows. Minting against a fresh account is a two-transaction
//! protocol: the holding component is created and its finality awaited so
//! the real component address can be read from the up-substates before the
//! mint is issued.

use log::*;
use tari_bridge_engine_types::{
    metadata::encode_metadata,
    template::ACCOUNT_NFT_TEMPLATE_ADDRESS,
    ComponentAddress,
    DecodeError,
    SubstateId,
    SubstateRequirement,
};
use tari_bridge_indexer_client::types::{FinalizedResult, SubmitTransactionRequest, TransactionFinalDecision};
use tari_bridge_transaction::{args, Transaction, TransactionId, DUMP_BUCKET_KEY};

use crate::{
    error::BridgeError,
    host::{DialogContent, SeedSource, SettingsStore, UserInteraction},
    keys::{account_component_address, account_nft_component_address, owner_token, DEFAULT_ACCOUNT_INDEX},
    network::{IndexerNetwork, WalletDaemonNetwork},
    poller::{wait_for_result, DEFAULT_RESULT_TIMEOUT},
    types::{MintAccountNftRequest, TransferNftRequest, TransferResponse},
    Bridge,
};

const LOG_TARGET: &str = "tari::bridge::nfts";

impl<TNetwork, TWalletRpc, THost> Bridge<TNetwork, TWalletRpc, THost>
where
    TNetwork: IndexerNetwork,
    TWalletRpc: WalletDaemonNetwork,
    THost: UserInteraction + SeedSource + SettingsStore,
{
    pub async fn mint_account_nft(
        &self,
        request: MintAccountNftRequest,
    ) -> Result<Option<TransferResponse>, BridgeError> {
        let mut content = DialogContent::new("Mint NFT")
            .line("This website requests to mint an NFT into your account, do you want to proceed?")
            .field("Fee", &request.fee);
        for field in &request.metadata {
            content = content.field(&field.key, &field.value);
        }
        if !self.host().confirm(content).await? {
            info!(target: LOG_TARGET, "NFT mint declined by user");
            return Ok(None);
        }

        let keypair = self.key_manager().derive_key_pair(DEFAULT_ACCOUNT_INDEX).await?;
        let account = account_component_address(&keypair.public_key);
        let derived_nft_component = account_nft_component_address(&keypair.public_key);

        let nft_component_exists = self
            .network()
            .substate_exists(&SubstateId::Component(derived_nft_component))
            .await;

        let nft_component = if nft_component_exists {
            derived_nft_component
        } else {
            // First transaction: create the holding component and wait for
            // finality so the minted-to address is the one the ledger
            // actually produced.
            let create_transaction = Transaction::builder()
                .call_function(
                    ACCOUNT_NFT_TEMPLATE_ADDRESS,
                    "create",
                    args![owner_token(&keypair.public_key)],
                )
                .pay_fee(account, request.fee)
                .build_and_sign(&keypair.secret_key);
            let create_id = *create_transaction.id();

            info!(
                target: LOG_TARGET,
                "Submitting account NFT component creation transaction {}", create_id
            );
            self.network()
                .submit_transaction(SubmitTransactionRequest {
                    transaction: create_transaction,
                    is_dry_run: false,
                    required_substates: vec![SubstateRequirement::unversioned(account)],
                })
                .await?;

            let result = wait_for_result(self.network(), &create_id, DEFAULT_RESULT_TIMEOUT).await?;
            if result.final_decision != TransactionFinalDecision::Accept {
                return Err(BridgeError::TransactionRejected {
                    transaction_id: create_id,
                });
            }
            extract_nft_component(&result, &create_id)?
        };

        let encoded_metadata = encode_metadata(&request.metadata).map_err(|e| DecodeError::UnexpectedShape {
            context: "nft metadata",
            details: e.to_string(),
        })?;

        let mint_transaction = Transaction::builder()
            .call_method(nft_component, "mint", args![encoded_metadata])
            .put_last_instruction_output_on_workspace(DUMP_BUCKET_KEY)
            .call_method(account, "deposit", args![Workspace(DUMP_BUCKET_KEY)])
            .pay_fee(account, request.fee)
            .build_and_sign(&keypair.secret_key);

        let required_substates = vec![
            SubstateRequirement::unversioned(account),
            SubstateRequirement::unversioned(nft_component),
        ];

        info!(
            target: LOG_TARGET,
            "Submitting NFT mint transaction {} on component {}",
            mint_transaction.id(),
            nft_component
        );
        let response = self
            .network()
            .submit_transaction(SubmitTransactionRequest {
                transaction: mint_transaction,
                is_dry_run: false,
                required_substates,
            })
            .await?;
        Ok(Some(TransferResponse {
            transaction_id: response.transaction_id,
        }))
    }

    /// Moves one specific token to another account. Instruction order is
    /// load-bearing: the withdrawn bucket is parked on the workspace and
    /// consumed by the deposit that follows it, with the fee settled last.
    pub async fn transfer_nft(&self, request: TransferNftRequest) -> Result<Option<TransferResponse>, BridgeError> {
        let content = DialogContent::new("Transfer NFT")
            .line("This website requests an NFT transfer from your account, do you want to proceed?")
            .field("Destination", &request.destination_public_key)
            .field("Resource", &request.nft_resource)
            .field("Token", &request.nft_id)
            .field("Fee", &request.fee);
        if !self.host().confirm(content).await? {
            info!(target: LOG_TARGET, "NFT transfer declined by user");
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
                "withdraw_non_fungible",
                args![request.nft_resource, request.nft_id],
            )
            .put_last_instruction_output_on_workspace(DUMP_BUCKET_KEY)
            .call_method(destination_account, "deposit", args![Workspace(DUMP_BUCKET_KEY)])
            .pay_fee(source_account, request.fee)
            .add_input_ref(request.nft_resource)
            .build_and_sign(&keypair.secret_key);

        let mut required_substates = vec![
            SubstateRequirement::unversioned(source_account),
            SubstateRequirement::unversioned(request.nft_resource),
            SubstateRequirement::unversioned(request.nft_address.clone()),
        ];
        if destination_exists {
            required_substates.push(SubstateRequirement::unversioned(destination_account));
        }

        info!(
            target: LOG_TARGET,
            "Submitting NFT transfer transaction {} to {}",
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

/// Finds the component created by the NFT-template `create` call among the
/// transaction's up-substates.
fn extract_nft_component(
    result: &FinalizedResult,
    transaction_id: &TransactionId,
) -> Result<ComponentAddress, BridgeError> {
    result
        .up_substates
        .iter()
        .find_map(|up| {
            let address = up.substate_id.as_component_address()?;
            let header = up.substate.as_component()?;
            (header.template_address == ACCOUNT_NFT_TEMPLATE_ADDRESS).then_some(address)
        })
        .ok_or(BridgeError::ComponentNotInResult {
            transaction_id: *transaction_id,
        })
}
