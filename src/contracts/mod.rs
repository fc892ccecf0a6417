// Contract artifact handling and deployment
pub mod artifact;
pub mod deployer;

pub use artifact::ContractArtifact;
pub use deployer::{deployment_summary, encode_constructor_args, ContractDeployer};
