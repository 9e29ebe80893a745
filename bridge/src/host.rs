//   Copyright 2025 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Capabilities the host runtime provides to the bridge. Modeled as injected
//! traits so flows and the confirmation policy are unit-testable without a
//! real extension runtime.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;

use crate::settings::BridgeSettings;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Host request failed: {0}")]
    Request(String),
    #[error("Seed source unavailable: {0}")]
    SeedUnavailable(String),
}

/// Content of a confirmation or alert dialog: a heading followed by plain
/// and labeled lines, rendered verbatim by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogContent {
    heading: String,
    lines: Vec<String>,
}

impl DialogContent {
    pub fn new<T: Into<String>>(heading: T) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    pub fn line<T: Into<String>>(mut self, text: T) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn field<T: Display>(mut self, label: &str, value: &T) -> Self {
        self.lines.push(format!("**{}:** {}", label, value));
        self
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when any line names `needle`, used by tests to assert dialogs
    /// carry the operation's key fields verbatim.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

/// User-facing dialogs. Confirmation must resolve before anything is signed;
/// a declined dialog cancels the whole operation.
#[async_trait]
pub trait UserInteraction: Send + Sync {
    async fn confirm(&self, content: DialogContent) -> Result<bool, HostError>;

    async fn alert(&self, content: DialogContent) -> Result<(), HostError>;

    async fn notify(&self, message: &str) -> Result<(), HostError>;
}

/// A BIP44-style derivation path under the Tari coin type. The same path
/// always yields the same seed bytes from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationPath {
    pub coin_type: u32,
    pub account_index: u64,
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "m/44'/{}'/{}'", self.coin_type, self.account_index)
    }
}

/// Deterministic seed material from the host's master entropy.
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn derive_seed(&self, path: &DerivationPath) -> Result<Vec<u8>, HostError>;
}

/// The host's persisted key/value store, scoped to the bridge's settings.
/// This is the only durable state the bridge keeps.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load_settings(&self) -> Result<Option<BridgeSettings>, HostError>;

    async fn save_settings(&self, settings: &BridgeSettings) -> Result<(), HostError>;
}
