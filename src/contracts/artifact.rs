use std::fs;
use std::path::{Path, PathBuf};

use ethers::abi::Abi;
use ethers::types::Bytes;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Artifact for {0} carries no creation bytecode")]
    EmptyBytecode(String),
}

/// Compiled contract in the standard artifact layout the toolchain emits
/// ({"contractName", "abi", "bytecode"}). The contract source itself is not
/// part of this repository; the artifact is supplied alongside it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Load `<dir>/<name>.json`
    pub fn load(dir: &Path, name: &str) -> Result<Self, ArtifactError> {
        let path = dir.join(format!("{name}.json"));
        let raw = fs::read_to_string(&path).map_err(|source| ArtifactError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ArtifactError> {
        let artifact: ContractArtifact = serde_json::from_str(raw)?;
        if artifact.bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(artifact.contract_name));
        }
        Ok(artifact)
    }

    /// Number of arguments the constructor takes (0 when the ABI has none)
    pub fn constructor_inputs(&self) -> usize {
        self.abi
            .constructor()
            .map(|c| c.inputs.len())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REWARD_POOL_ARTIFACT: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "RewardPool",
        "abi": [
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [
                    { "name": "_claimFeeNative", "type": "uint256", "internalType": "uint256" },
                    { "name": "_poolCreationFeePercentage", "type": "uint256", "internalType": "uint256" }
                ]
            }
        ],
        "bytecode": "0x6080604052"
    }"#;

    #[test]
    fn test_parses_toolchain_artifact() {
        let artifact = ContractArtifact::from_json(REWARD_POOL_ARTIFACT).unwrap();
        assert_eq!(artifact.contract_name, "RewardPool");
        assert_eq!(artifact.constructor_inputs(), 2);
        assert!(!artifact.bytecode.is_empty());
    }

    #[test]
    fn test_rejects_placeholder_bytecode() {
        let raw = r#"{ "contractName": "RewardPool", "abi": [], "bytecode": "0x" }"#;
        let result = ContractArtifact::from_json(raw);
        assert!(matches!(result, Err(ArtifactError::EmptyBytecode(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = ContractArtifact::from_json("{ \"contractName\": ");
        assert!(matches!(result, Err(ArtifactError::Parse(_))));
    }

    #[test]
    fn test_constructorless_abi_counts_zero() {
        let raw = r#"{ "contractName": "RewardPool", "abi": [], "bytecode": "0x6080" }"#;
        let artifact = ContractArtifact::from_json(raw).unwrap();
        assert_eq!(artifact.constructor_inputs(), 0);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = ContractArtifact::load(Path::new("no-such-dir"), "RewardPool");
        assert!(matches!(result, Err(ArtifactError::Read { .. })));
    }
}
