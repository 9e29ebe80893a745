//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Free-test-coin minting. On a brand-new account the minted bucket seeds
//! the account creation itself; otherwise it is deposited into the existing
//! account.

use log::*;
use tari_bridge_engine_types::{SubstateId, SubstateRequirement};
use tari_bridge_indexer_client::types::SubmitTransactionRequest;
use tari_bridge_transaction::{args, Transaction};

use crate::{
    error::BridgeError,
    host::{DialogContent, SeedSource, SettingsStore, UserInteraction},
    keys::{account_component_address, DEFAULT_ACCOUNT_INDEX},
    network::{IndexerNetwork, WalletDaemonNetwork},
    types::{GetFreeTestCoinsRequest, TransferResponse},
    Bridge,
};

const LOG_TARGET: &str = "tari::bridge::faucet";

/// Workspace slot carrying the freshly minted coins into the deposit or
/// account-creation instruction.
const FAUCET_BUCKET: &[u8] = b"free_test_coins";

impl<TNetwork, TWalletRpc, THost> Bridge<TNetwork, TWalletRpc, THost>
where
    TNetwork: IndexerNetwork,
    TWalletRpc: WalletDaemonNetwork,
    THost: UserInteraction + SeedSource + SettingsStore,
{
    pub async fn get_free_test_coins(
        &self,
        request: GetFreeTestCoinsRequest,
    ) -> Result<Option<TransferResponse>, BridgeError> {
        let content = DialogContent::new("Free test coins")
            .line("This website requests a deposit of free test coins into your account. Do you want to proceed?")
            .field("Amount", &request.amount)
            .field("Fee", &request.fee);
        if !self.host().confirm(content).await? {
            info!(target: LOG_TARGET, "Free test coins declined by user");
            return Ok(None);
        }

        let keypair = self.key_manager().derive_key_pair(DEFAULT_ACCOUNT_INDEX).await?;
        let account = account_component_address(&keypair.public_key);
        let account_exists = self.network().substate_exists(&SubstateId::Component(account)).await;

        let builder = Transaction::builder()
            .create_free_test_coins(request.amount)
            .put_last_instruction_output_on_workspace(FAUCET_BUCKET);
        let builder = if account_exists {
            builder.call_method(account, "deposit", args![Workspace(FAUCET_BUCKET)])
        } else {
            // the minted bucket funds the account being created
            builder.create_account_with_bucket(
                keypair.public_key.clone(),
                String::from_utf8_lossy(FAUCET_BUCKET),
            )
        };
        let transaction = builder
            .pay_fee(account, request.fee)
            .build_and_sign(&keypair.secret_key);

        // a to-be-created account must not be declared as an input
        let required_substates = if account_exists {
            vec![SubstateRequirement::unversioned(account)]
        } else {
            vec![]
        };

        info!(
            target: LOG_TARGET,
            "Submitting free test coins transaction {} (new account: {})",
            transaction.id(),
            !account_exists
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
