//! Node startup configuration
//!
//! A small TOML file read before chain parameters are selected:
//!
//! ```toml
//! testnet = true
//! datadir = "/var/lib/drz"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ParamsError;
use crate::params::{ChainParams, Network};

pub const CONFIG_FILE_NAME: &str = "drz.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    /// Run on the test network
    pub testnet: bool,
    /// Base data directory; defaults to `~/.drz`
    pub datadir: Option<PathBuf>,
}

impl NodeConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ParamsError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ParamsError> {
        toml::from_str(content).map_err(|e| ParamsError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    pub fn network(&self) -> Network {
        Network::from_testnet_flag(self.testnet)
    }

    pub fn base_dir(&self) -> PathBuf {
        self.datadir.clone().unwrap_or_else(default_base_dir)
    }

    /// Directory holding state for `params`' network
    pub fn data_dir(&self, params: &ChainParams) -> PathBuf {
        let base = self.base_dir();
        if params.data_dir.is_empty() {
            base
        } else {
            base.join(params.data_dir)
        }
    }
}

/// `~/.drz`, or `.drz` in the working directory when there is no home
pub fn default_base_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".drz"),
        None => PathBuf::from(".drz"),
    }
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    default_base_dir().join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NodeConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, NodeConfig::default());
        assert_eq!(config.network(), Network::Main);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "testnet = true").unwrap();
        writeln!(file, "datadir = \"/srv/drz\"").unwrap();

        let config = NodeConfig::load(&path).unwrap();
        assert!(config.testnet);
        assert_eq!(config.network(), Network::TestNet);
        assert_eq!(config.base_dir(), PathBuf::from("/srv/drz"));
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(matches!(
            NodeConfig::from_toml_str("testnet = \"maybe\""),
            Err(ParamsError::Config(_))
        ));
        assert!(NodeConfig::from_toml_str("unknown_key = 1").is_err());
    }

    #[test]
    fn test_data_dir_suffix() {
        let mut rng = StdRng::seed_from_u64(0);
        let main = ChainParams::main(1_700_000_000, &mut rng).unwrap();
        let test = ChainParams::testnet(&main, 1_700_000_000, &mut rng).unwrap();

        let config = NodeConfig {
            testnet: false,
            datadir: Some(PathBuf::from("/srv/drz")),
        };
        assert_eq!(config.data_dir(&main), PathBuf::from("/srv/drz"));
        assert_eq!(config.data_dir(&test), PathBuf::from("/srv/drz/testnet"));
    }

    #[test]
    fn test_default_paths() {
        assert!(default_base_dir().ends_with(".drz"));
        assert!(default_config_path().ends_with(CONFIG_FILE_NAME));
    }
}
