//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use crate::hash::Hash;

pub type TemplateAddress = Hash;

/// Builtin account template. Account component addresses are derived from
/// this template and the owner public key.
pub const ACCOUNT_TEMPLATE_ADDRESS: TemplateAddress = Hash::from_array([0; 32]);

/// Builtin account-NFT template, holding the NFTs minted against an account.
pub const ACCOUNT_NFT_TEMPLATE_ADDRESS: TemplateAddress = Hash::from_array([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
]);

/// Resource backing the account owner badges used to authorize NFT minting.
pub const ACCOUNT_OWNER_BADGE_RESOURCE: crate::ResourceAddress = crate::ResourceAddress::from_array([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2,
]);

pub fn parse_template_address(s: &str) -> Option<TemplateAddress> {
    let hash_str = s.strip_prefix("template_").unwrap_or(s);
    TemplateAddress::from_hex(hash_str).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        let addr = ACCOUNT_NFT_TEMPLATE_ADDRESS;
        assert_eq!(parse_template_address(&format!("template_{}", addr)), Some(addr));
        assert_eq!(parse_template_address(&addr.to_string()), Some(addr));
        assert_eq!(parse_template_address("template_zz"), None);
    }
}
