use std::fmt;

use reqwest::Url;

pub const MAINNET_URL: &str = "https://api.etherscan.io/api";

/// Which Etherscan deployment a client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    /// A named testnet, served from `https://{name}.etherscan.io/api`.
    /// The name is not checked against any list of known testnets.
    Testnet(String),
    /// An explicit base URL, used as given.
    Custom(String),
}

impl Network {
    /// Interpret an optional network selector.
    ///
    /// A selector that parses as an absolute URL with a host is an explicit
    /// override; anything else is taken as a testnet name.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            None => Self::Mainnet,
            Some(selector) if is_absolute_url(selector) => Self::Custom(selector.to_owned()),
            Some(name) => Self::Testnet(name.to_owned()),
        }
    }

    pub fn base_url(&self) -> String {
        match self {
            Self::Mainnet => MAINNET_URL.to_owned(),
            Self::Testnet(name) => format!("https://{name}.etherscan.io/api"),
            Self::Custom(url) => url.clone(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Testnet(name) => f.write_str(name),
            Self::Custom(url) => f.write_str(url),
        }
    }
}

/// Resolve an optional network selector straight to a base URL.
pub fn resolve_endpoint(selector: Option<&str>) -> String {
    Network::from_selector(selector).base_url()
}

fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.has_host())
        .unwrap_or(false)
}
