//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};
use tari_crypto::ristretto::RistrettoPublicKey;

use crate::amount::Amount;

/// Which inputs a confidential withdraw may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidentialInputSelection {
    ConfidentialOnly,
    RevealedOnly,
    PreferRevealed,
    PreferConfidential,
}

/// The data the bridge assembles for a `withdraw_confidential` call. The
/// range-proof construction itself is performed by the ledger-side
/// cryptographic capability; this carries the revealed value being spent,
/// the selection mode and the resource view key when one is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidentialWithdrawProof {
    pub amount: Amount,
    pub input_selection: ConfidentialInputSelection,
    pub destination_public_key: RistrettoPublicKey,
    #[serde(default)]
    pub resource_view_key: Option<RistrettoPublicKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_selection_serializes_as_plain_tag() {
        let json = serde_json::to_value(ConfidentialInputSelection::ConfidentialOnly).unwrap();
        assert_eq!(json, serde_json::json!("ConfidentialOnly"));
    }
}
