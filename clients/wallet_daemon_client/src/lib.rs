//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

mod client;
mod error;
pub mod permissions;
pub mod types;

pub use client::WalletDaemonClient;
pub use error::WalletDaemonClientError;
pub use permissions::TariPermission;

/// Client name presented to the daemon during `auth.accept`.
pub const CLIENT_NAME: &str = "tari-dapp-bridge";
