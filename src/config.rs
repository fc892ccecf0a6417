use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_NETWORK: &str = "sepolia";
pub const DEFAULT_SEPOLIA_RPC_URL: &str = "https://rpc.sepolia.org";
pub const DEFAULT_SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const DEFAULT_SOLIDITY_VERSION: &str = "0.8.19";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

#[derive(Debug, Clone)]
pub struct Config {
    pub network: NetworkConfig,
    pub etherscan: EtherscanConfig,
    pub solidity: SolidityConfig,
    pub artifacts_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: u64,
    pub private_key: String,
}

#[derive(Debug, Clone)]
pub struct EtherscanConfig {
    pub api_key: String,
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SolidityConfig {
    pub version: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            network: NetworkConfig {
                name: env::var("NETWORK").unwrap_or_else(|_| DEFAULT_NETWORK.to_string()),
                rpc_url: env::var("SEPOLIA_RPC_URL")
                    .unwrap_or_else(|_| DEFAULT_SEPOLIA_RPC_URL.to_string()),
                chain_id: env::var("CHAIN_ID")
                    .unwrap_or_else(|_| DEFAULT_SEPOLIA_CHAIN_ID.to_string())
                    .parse()
                    .map_err(|_| ConfigError::Invalid("CHAIN_ID"))?,
                private_key: env::var("SEPOLIA_PRIVATE_KEY")
                    .map_err(|_| ConfigError::Missing("SEPOLIA_PRIVATE_KEY"))?,
            },
            etherscan: EtherscanConfig {
                api_key: env::var("ETHERSCAN_API_KEY").unwrap_or_default(),
                source_path: env::var("REWARD_POOL_SOURCE").ok().map(PathBuf::from),
            },
            solidity: SolidityConfig {
                version: env::var("SOLIDITY_VERSION")
                    .unwrap_or_else(|_| DEFAULT_SOLIDITY_VERSION.to_string()),
            },
            artifacts_dir: env::var("ARTIFACTS_DIR")
                .unwrap_or_else(|_| DEFAULT_ARTIFACTS_DIR.to_string())
                .into(),
        })
    }

    /// Path of the flattened contract source to submit for verification.
    /// Verification needs both an explorer key and a source file; otherwise
    /// the deployment runs without it.
    pub fn verification_source(&self) -> Option<&Path> {
        if self.etherscan.api_key.is_empty() {
            return None;
        }
        self.etherscan.source_path.as_deref()
    }
}

impl SolidityConfig {
    /// Compiler version in the form the block explorer expects ("v0.8.19")
    pub fn compiler_version(&self) -> String {
        format!("v{}", self.version)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_etherscan(api_key: &str, source_path: Option<&str>) -> Config {
        Config {
            network: NetworkConfig {
                name: DEFAULT_NETWORK.to_string(),
                rpc_url: DEFAULT_SEPOLIA_RPC_URL.to_string(),
                chain_id: DEFAULT_SEPOLIA_CHAIN_ID,
                private_key: "0x01".to_string(),
            },
            etherscan: EtherscanConfig {
                api_key: api_key.to_string(),
                source_path: source_path.map(PathBuf::from),
            },
            solidity: SolidityConfig {
                version: DEFAULT_SOLIDITY_VERSION.to_string(),
            },
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
        }
    }

    #[test]
    fn test_compiler_version_prefix() {
        let solidity = SolidityConfig {
            version: "0.8.19".to_string(),
        };
        assert_eq!(solidity.compiler_version(), "v0.8.19");
    }

    #[test]
    fn test_verification_needs_key_and_source() {
        let armed = config_with_etherscan("KEY", Some("contracts/RewardPool.sol"));
        assert!(armed.verification_source().is_some());

        let no_key = config_with_etherscan("", Some("contracts/RewardPool.sol"));
        assert!(no_key.verification_source().is_none());

        let no_source = config_with_etherscan("KEY", None);
        assert!(no_source.verification_source().is_none());
    }
}
