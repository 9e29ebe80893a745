//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Bounded polling for asynchronous transaction finality.

use std::time::Duration;

use log::*;
use tari_bridge_indexer_client::types::{FinalizedResult, IndexerTransactionFinalizedResult};
use tari_bridge_transaction::TransactionId;

use crate::{error::BridgeError, network::IndexerNetwork};

const LOG_TARGET: &str = "tari::bridge::poller";

pub const POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_RESULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Polls the indexer until the transaction finalizes or `timeout` elapses.
/// Each iteration suspends for [`POLL_INTERVAL`]; there is no busy spin and
/// no partial result. Transient query failures count as "still pending" —
/// the retry policy for result queries lives here, not in the client.
pub async fn wait_for_result<TNetwork: IndexerNetwork>(
    network: &TNetwork,
    transaction_id: &TransactionId,
    timeout: Duration,
) -> Result<FinalizedResult, BridgeError> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match network.get_transaction_result(transaction_id).await {
            Ok(IndexerTransactionFinalizedResult::Finalized(result)) => {
                debug!(target: LOG_TARGET, "Transaction {} finalized", transaction_id);
                return Ok(result);
            },
            Ok(IndexerTransactionFinalizedResult::Pending) => {
                debug!(target: LOG_TARGET, "Transaction {} still pending", transaction_id);
            },
            Err(e) => {
                debug!(
                    target: LOG_TARGET,
                    "Result query for {} failed, will retry: {}", transaction_id, e
                );
            },
        }

        if tokio::time::Instant::now() + POLL_INTERVAL > deadline {
            warn!(
                target: LOG_TARGET,
                "Timed out after {:?} waiting for transaction {}", timeout, transaction_id
            );
            return Err(BridgeError::Timeout {
                transaction_id: *transaction_id,
            });
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
