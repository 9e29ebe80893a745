//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};
use tari_bridge_engine_types::{ResourceAddress, SubstateId};

/// A scoped capability requested from the wallet daemon during the auth
/// handshake. Unit variants serialize as bare strings
/// (`"AccountInfo"`), parameterized variants as single-key objects
/// (`{"TransactionSend": null}`), matching the daemon's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TariPermission {
    AccountBalance,
    AccountInfo,
    AccountList,
    KeyList,
    TransactionGet,
    TransactionSend(Option<SubstateId>),
    GetNft(Option<SubstateId>, Option<ResourceAddress>),
    GetOwnershipProof(Option<SubstateId>),
}

/// The default scope the bridge requests for a page session.
pub fn default_session_permissions() -> Vec<TariPermission> {
    vec![
        TariPermission::AccountInfo,
        TariPermission::KeyList,
        TariPermission::TransactionGet,
        TariPermission::TransactionSend(None),
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wire_shapes_match_the_daemon() {
        assert_eq!(
            serde_json::to_value(TariPermission::AccountInfo).unwrap(),
            json!("AccountInfo")
        );
        assert_eq!(
            serde_json::to_value(TariPermission::TransactionSend(None)).unwrap(),
            json!({ "TransactionSend": null })
        );
        assert_eq!(
            serde_json::to_value(TariPermission::GetNft(None, None)).unwrap(),
            json!({ "GetNft": [null, null] })
        );
    }

    #[test]
    fn default_scope_can_send_and_read() {
        let permissions = default_session_permissions();
        assert!(permissions.contains(&TariPermission::TransactionSend(None)));
        assert!(permissions.contains(&TariPermission::AccountInfo));
    }
}
