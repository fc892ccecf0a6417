use ethers::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid deployer key: {0}")]
    InvalidKey(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

/// The account that signs and funds the deployment transaction
#[derive(Debug, Clone)]
pub struct DeployerWallet {
    signer: LocalWallet,
}

impl DeployerWallet {
    /// Restore the deployer account from its hex-encoded private key,
    /// scoped to the target chain so signatures are replay-protected.
    pub fn from_hex_key(private_key: &str, chain_id: u64) -> Result<Self, WalletError> {
        let signer = private_key
            .parse::<LocalWallet>()
            .map_err(|e| WalletError::InvalidKey(e.to_string()))?;

        Ok(Self {
            signer: signer.with_chain_id(chain_id),
        })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the wallet address as a checksum string
    pub fn address_string(&self) -> String {
        format!("{:?}", self.address())
    }

    pub fn signer(&self) -> LocalWallet {
        self.signer.clone()
    }

    /// Check the native token balance funding the deployment
    pub async fn native_balance(&self, provider: &Provider<Http>) -> Result<U256, WalletError> {
        provider
            .get_balance(self.address(), None)
            .await
            .map_err(|e| WalletError::Provider(e.to_string()))
    }

    /// Format balance as human-readable string (in ETH, 6 decimals)
    pub fn format_balance(balance: U256) -> String {
        let ether = ethers::utils::format_ether(balance);
        match ether.split_once('.') {
            Some((integer, fraction)) => {
                format!("{}.{}", integer, &fraction[..fraction.len().min(6)])
            }
            None => ether,
        }
    }
}
