mod config;
mod contracts;
mod etherscan;
mod wallet;

use anyhow::Context;
use config::Config;
use contracts::{deployment_summary, encode_constructor_args, ContractArtifact, ContractDeployer};
use etherscan::{EtherscanClient, VerificationRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet::DeployerWallet;

const CONTRACT_NAME: &str = "RewardPool";
const CLAIM_FEE_NATIVE: u64 = 1000;
const POOL_CREATION_FEE_PERCENTAGE: u64 = 10;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rewardpool_deployer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Single failure path: print the error and fail the process
    if let Err(error) = run().await {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        network = %config.network.name,
        rpc = %config.network.rpc_url,
        chain_id = config.network.chain_id,
        "Deploying RewardPool"
    );

    let deployer = ContractDeployer::connect(&config).await?;

    let balance = deployer.funding_balance().await?;
    tracing::info!(
        deployer = %deployer.address_string(),
        balance = %DeployerWallet::format_balance(balance),
        "Deployer account loaded"
    );

    let artifact = ContractArtifact::load(&config.artifacts_dir, CONTRACT_NAME)?;

    let deployed = deployer
        .deploy(&artifact, CLAIM_FEE_NATIVE, POOL_CREATION_FEE_PERCENTAGE)
        .await?;

    println!(
        "{}",
        deployment_summary(
            CONTRACT_NAME,
            CLAIM_FEE_NATIVE,
            POOL_CREATION_FEE_PERCENTAGE,
            &deployed
        )
    );

    if let Some(source_path) = config.verification_source() {
        let source_code = std::fs::read_to_string(source_path)
            .with_context(|| format!("reading contract source {}", source_path.display()))?;

        let explorer =
            EtherscanClient::for_chain(config.network.chain_id, config.etherscan.api_key.clone())?;

        let request = VerificationRequest {
            contract_address: deployed.address_string(),
            contract_name: CONTRACT_NAME.to_string(),
            source_code,
            compiler_version: config.solidity.compiler_version(),
            constructor_args: hex::encode(encode_constructor_args(
                CLAIM_FEE_NATIVE,
                POOL_CREATION_FEE_PERCENTAGE,
            )),
        };

        let guid = explorer.submit_verification(&request).await?;
        tracing::info!(%guid, "Verification submitted");

        let status = explorer.wait_for_verification(&guid).await?;
        tracing::info!(?status, "Verification result");
    }

    Ok(())
}
