use std::sync::Arc;

use ethers::abi::Token;
use ethers::prelude::*;
use thiserror::Error;

use crate::config::Config;
use crate::contracts::artifact::ContractArtifact;
use crate::wallet::{DeployerWallet, WalletError};

/// Signer-aware client the creation transaction goes through
pub type DeployClient = SignerMiddleware<Provider<Http>, LocalWallet>;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Provider error: {0}")]
    Provider(String),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("{contract} constructor takes {found} argument(s), expected {expected}")]
    ConstructorMismatch {
        contract: String,
        expected: usize,
        found: usize,
    },
    #[error("Deployment failed: {0}")]
    Deployment(String),
}

/// Handle to a contract instance created on chain
#[derive(Debug, Clone)]
pub struct DeployedContract {
    pub address: Address,
    pub transaction_hash: H256,
    pub block_number: Option<u64>,
}

impl DeployedContract {
    pub fn address_string(&self) -> String {
        format!("{:?}", self.address)
    }
}

pub struct ContractDeployer {
    provider: Arc<Provider<Http>>,
    wallet: DeployerWallet,
    client: Arc<DeployClient>,
}

impl ContractDeployer {
    /// Bind the configured RPC endpoint and deployer account together into
    /// a client that can submit creation transactions.
    pub async fn connect(config: &Config) -> Result<Self, DeployError> {
        let provider = Provider::<Http>::try_from(config.network.rpc_url.as_str())
            .map_err(|e| DeployError::Provider(e.to_string()))?;

        let wallet =
            DeployerWallet::from_hex_key(&config.network.private_key, config.network.chain_id)?;

        let client = Arc::new(SignerMiddleware::new(provider.clone(), wallet.signer()));

        Ok(Self {
            provider: Arc::new(provider),
            wallet,
            client,
        })
    }

    pub fn address_string(&self) -> String {
        self.wallet.address_string()
    }

    /// Native balance of the deployer account, checked up front so an
    /// unfunded deployment shows up in the logs instead of a bare RPC error.
    pub async fn funding_balance(&self) -> Result<U256, DeployError> {
        Ok(self.wallet.native_balance(&self.provider).await?)
    }

    /// Submit the RewardPool creation transaction with the two constructor
    /// arguments, claim fee first, and wait for one confirmation.
    pub async fn deploy(
        &self,
        artifact: &ContractArtifact,
        claim_fee_native: u64,
        pool_creation_fee_percentage: u64,
    ) -> Result<DeployedContract, DeployError> {
        let found = artifact.constructor_inputs();
        if found != 2 {
            return Err(DeployError::ConstructorMismatch {
                contract: artifact.contract_name.clone(),
                expected: 2,
                found,
            });
        }

        let factory = ContractFactory::new(
            artifact.abi.clone(),
            artifact.bytecode.clone(),
            self.client.clone(),
        );

        let deployer = factory
            .deploy((
                U256::from(claim_fee_native),
                U256::from(pool_creation_fee_percentage),
            ))
            .map_err(|e| DeployError::Deployment(e.to_string()))?
            .confirmations(1usize);

        tracing::info!(
            contract = %artifact.contract_name,
            claim_fee_native,
            pool_creation_fee_percentage,
            "Submitting creation transaction"
        );

        let (contract, receipt) = deployer
            .send_with_receipt()
            .await
            .map_err(|e| DeployError::Deployment(e.to_string()))?;

        tracing::info!(
            tx = ?receipt.transaction_hash,
            block = receipt.block_number.map(|n| n.as_u64()),
            "Creation transaction confirmed"
        );

        Ok(DeployedContract {
            address: contract.address(),
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map(|n| n.as_u64()),
        })
    }
}

/// ABI encoding of the two constructor arguments, claim fee first. Also what
/// the block explorer wants for verification.
pub fn encode_constructor_args(claim_fee_native: u64, pool_creation_fee_percentage: u64) -> Vec<u8> {
    ethers::abi::encode(&[
        Token::Uint(U256::from(claim_fee_native)),
        Token::Uint(U256::from(pool_creation_fee_percentage)),
    ])
}

/// Status line printed once the contract is live
pub fn deployment_summary(
    contract_name: &str,
    claim_fee_native: u64,
    pool_creation_fee_percentage: u64,
    deployed: &DeployedContract,
) -> String {
    format!(
        "{} with claim fee {} and creation fee {}% deployed to {}",
        contract_name,
        claim_fee_native,
        pool_creation_fee_percentage,
        deployed.address_string()
    )
}
