//! Request-side domain types.
//!
//! Contains the flat parameter map handed to a [`Transport`](crate::api::Transport)
//! (`Params`) and the typed arguments the facade accepts before flattening
//! them (`Addresses`, `BlockType`, `Sort`, `TxListOptions`).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Default block-state selector for balance queries.
pub const TAG_LATEST: &str = "latest";

pub const DEFAULT_START_BLOCK: u64 = 0;
pub const DEFAULT_END_BLOCK: u64 = 99_999_999;

// ==============================================================================
// Params
// ==============================================================================

/// Flat key/value parameters for one API call.
///
/// Keys are unique: inserting an existing key replaces its value in place.
/// Insertion order is kept so the form encoding of a map is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a parameter map for `module` / `action`.
    pub fn for_action(module: &str, action: &str) -> Self {
        Self::new().with("module", module).with("action", action)
    }

    pub fn with(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Add `key` only when a value is present.
    pub fn with_opt<V: fmt::Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn insert(&mut self, key: &str, value: impl fmt::Display) {
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key.to_owned(), value)),
        }
    }

    /// Copy of this map with `key` set, leaving `self` untouched.
    pub fn merged(&self, key: &str, value: impl fmt::Display) -> Self {
        self.clone().with(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ==============================================================================
// Addresses
// ==============================================================================

/// One address or a list of addresses for multi-address queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addresses {
    One(String),
    Many(Vec<String>),
}

impl Addresses {
    /// Render as the `address` parameter: lists are comma-joined, a single
    /// address is passed through unchanged.
    pub fn to_param(&self) -> String {
        match self {
            Self::One(address) => address.clone(),
            Self::Many(list) => list.join(","),
        }
    }
}

impl From<&str> for Addresses {
    fn from(address: &str) -> Self {
        Self::One(address.to_owned())
    }
}

impl From<String> for Addresses {
    fn from(address: String) -> Self {
        Self::One(address)
    }
}

impl From<Vec<String>> for Addresses {
    fn from(list: Vec<String>) -> Self {
        Self::Many(list)
    }
}

impl From<Vec<&str>> for Addresses {
    fn from(list: Vec<&str>) -> Self {
        Self::Many(list.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Addresses {
    fn from(list: &[&str]) -> Self {
        Self::Many(list.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Addresses {
    fn from(list: [&str; N]) -> Self {
        Self::Many(list.iter().map(|s| (*s).to_owned()).collect())
    }
}

// ==============================================================================
// Block Type
// ==============================================================================

/// Kind of mined block to list for an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockType {
    #[default]
    Blocks,
    Uncles,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::Uncles => "uncles",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blocks" => Ok(Self::Blocks),
            "uncles" => Ok(Self::Uncles),
            other => Err(CoreError::InvalidArgument(format!(
                "invalid block type `{other}`; expected `blocks` or `uncles`"
            ))),
        }
    }
}

// ==============================================================================
// Transaction List Options
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(CoreError::InvalidArgument(format!(
                "invalid sort order `{other}`; expected `asc` or `desc`"
            ))),
        }
    }
}

/// Block range, ordering and optional pagination for transaction lists.
///
/// `page` and `offset` are sent only when set; `None` means no pagination
/// was requested, not page zero. Values are passed through unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxListOptions {
    pub start_block: u64,
    pub end_block: u64,
    pub sort: Sort,
    pub page: Option<u32>,
    pub offset: Option<u32>,
}

impl Default for TxListOptions {
    fn default() -> Self {
        Self {
            start_block: DEFAULT_START_BLOCK,
            end_block: DEFAULT_END_BLOCK,
            sort: Sort::Asc,
            page: None,
            offset: None,
        }
    }
}

impl TxListOptions {
    pub fn paged(mut self, page: u32, offset: u32) -> Self {
        self.page = Some(page);
        self.offset = Some(offset);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_key_in_place() {
        let mut params = Params::for_action("account", "balance").with("tag", "latest");
        params.insert("action", "balancemulti");

        assert_eq!(params.len(), 3);
        assert_eq!(params.get("action"), Some("balancemulti"));
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["module", "action", "tag"]
        );
    }

    #[test]
    fn merged_leaves_original_untouched() {
        let params = Params::for_action("stats", "ethsupply");
        let merged = params.merged("apikey", "secret");

        assert!(!params.contains_key("apikey"));
        assert_eq!(merged.get("apikey"), Some("secret"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn with_opt_skips_missing_values() {
        let params = Params::new()
            .with_opt("page", None::<u32>)
            .with_opt("offset", Some(10u32));
        assert!(!params.contains_key("page"));
        assert_eq!(params.get("offset"), Some("10"));
    }

    #[test]
    fn addresses_list_is_comma_joined() {
        let list = Addresses::from(vec!["0xa", "0xb", "0xc"]);
        assert_eq!(list.to_param(), "0xa,0xb,0xc");

        let single = Addresses::from("0xa,unchanged");
        assert_eq!(single.to_param(), "0xa,unchanged");
    }

    #[test]
    fn block_type_rejects_unknown_values() {
        assert_eq!("uncles".parse::<BlockType>().unwrap(), BlockType::Uncles);
        let err = "Blocks".parse::<BlockType>().expect_err("matching is exact");
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn tx_list_defaults_have_no_pagination() {
        let options = TxListOptions::default();
        assert_eq!(options.start_block, 0);
        assert_eq!(options.end_block, 99_999_999);
        assert_eq!(options.sort, Sort::Asc);
        assert_eq!(options.page, None);
        assert_eq!(options.offset, None);
    }
}
