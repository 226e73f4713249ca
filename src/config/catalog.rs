//! Built-in channel catalog entries.

use serde::Deserialize;

/// One `[[catalog]]` entry describing a built-in channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// Channel name (matched case-insensitively).
    pub name: String,
    /// Non-zero catalog identity.
    pub id: u32,
    /// Trade channel.
    #[serde(default)]
    pub trade: bool,
    /// City-only channel.
    #[serde(default)]
    pub city: bool,
    /// Looking-for-group channel.
    #[serde(default)]
    pub lfg: bool,
}

impl CatalogEntry {
    /// Entry with no classification bits.
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            trade: false,
            city: false,
            lfg: false,
        }
    }

    /// Builder: mark as trade.
    pub fn trade(mut self) -> Self {
        self.trade = true;
        self
    }

    /// Builder: mark as city-only.
    pub fn city(mut self) -> Self {
        self.city = true;
        self
    }

    /// Builder: mark as LFG.
    pub fn lfg(mut self) -> Self {
        self.lfg = true;
        self
    }
}
