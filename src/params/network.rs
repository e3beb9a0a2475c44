//! Chain variant identifiers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ParamsError;

/// Supported chain variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Network {
    #[serde(rename = "main")]
    Main,
    #[serde(rename = "test")]
    TestNet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Main, Network::TestNet];

    pub fn name(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::TestNet => "test",
        }
    }

    /// Map the single "use test network" switch to a variant
    pub fn from_testnet_flag(testnet: bool) -> Self {
        if testnet {
            Network::TestNet
        } else {
            Network::Main
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::TestNet),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("MainNet".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::TestNet);
        assert_eq!("test".parse::<Network>().unwrap(), Network::TestNet);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "regtest".parse::<Network>().unwrap_err();
        assert_eq!(err, ParamsError::UnknownNetwork("regtest".to_string()));
    }

    #[test]
    fn test_flag_mapping() {
        assert_eq!(Network::from_testnet_flag(false), Network::Main);
        assert_eq!(Network::from_testnet_flag(true), Network::TestNet);
    }

    #[test]
    fn test_display_roundtrip() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }
}
