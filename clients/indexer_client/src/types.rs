//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};
use tari_bridge_engine_types::{SubstateId, SubstateRequirement};
use tari_bridge_transaction::{Transaction, TransactionId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectSubstateResponse {
    pub address: SubstateId,
    pub version: Option<u32>,
    /// The raw substate envelope (`{ "substate": ..., "version": n }`).
    /// Interpretation is the decoder's job, not the transport's; absent when
    /// the address has never existed or is already down.
    #[serde(default)]
    pub substate: Option<serde_json::Value>,
    #[serde(default)]
    pub created_by_transaction: Option<TransactionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransactionRequest {
    pub transaction: Transaction,
    pub is_dry_run: bool,
    /// Every substate the transaction reads or writes. Substates created by
    /// this same transaction must not be listed.
    pub required_substates: Vec<SubstateRequirement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransactionResponse {
    pub transaction_id: TransactionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTransactionResultResponse {
    pub result: IndexerTransactionFinalizedResult,
}

/// Finality status of a submitted transaction as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexerTransactionFinalizedResult {
    Pending,
    Finalized(FinalizedResult),
}

impl IndexerTransactionFinalizedResult {
    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Finalized(_))
    }

    pub fn into_finalized(self) -> Option<FinalizedResult> {
        match self {
            Self::Finalized(result) => Some(result),
            Self::Pending => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedResult {
    pub final_decision: TransactionFinalDecision,
    #[serde(default)]
    pub up_substates: Vec<UpSubstate>,
    #[serde(default)]
    pub down_substates: Vec<SubstateRequirement>,
    #[serde(default)]
    pub execution_result: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionFinalDecision {
    Accept,
    Reject,
}

/// A substate created (or re-versioned) by a finalized transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpSubstate {
    pub substate_id: SubstateId,
    pub version: u32,
    pub substate: tari_bridge_engine_types::substate::SubstateValue,
}

