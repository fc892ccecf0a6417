use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_STATUS_CHECKS: usize = 12;

#[derive(Debug, Error)]
pub enum EtherscanError {
    #[error("No block explorer API known for chain id {0}")]
    UnsupportedChain(u64),
    #[error("Explorer request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Explorer rejected the request: {0}")]
    Api(String),
}

/// Everything the explorer needs to match the deployed bytecode against
/// a source submission
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub contract_address: String,
    pub contract_name: String,
    pub source_code: String,
    /// "v0.8.19" form, from [`crate::config::SolidityConfig::compiler_version`]
    pub compiler_version: String,
    /// ABI-encoded constructor arguments, hex without the 0x prefix
    pub constructor_args: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Pass,
    Fail(String),
}

impl VerificationStatus {
    fn from_response(status: &str, result: &str) -> Self {
        if result.starts_with("Pending") {
            VerificationStatus::Pending
        } else if status == "1" {
            VerificationStatus::Pass
        } else {
            VerificationStatus::Fail(result.to_string())
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, VerificationStatus::Pending)
    }
}

// Explorer responses always come back as {"status", "message", "result"}
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[allow(dead_code)]
    message: String,
    result: String,
}

#[derive(Clone)]
pub struct EtherscanClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl EtherscanClient {
    pub fn for_chain(chain_id: u64, api_key: String) -> Result<Self, EtherscanError> {
        let api_url =
            api_url_for_chain(chain_id).ok_or(EtherscanError::UnsupportedChain(chain_id))?;

        Ok(Self {
            client: Client::new(),
            api_url: api_url.to_string(),
            api_key,
        })
    }

    /// Submit the source for verification and return the submission guid
    pub async fn submit_verification(
        &self,
        request: &VerificationRequest,
    ) -> Result<String, EtherscanError> {
        // "constructorArguements" is the spelling the explorer API expects
        let params = [
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("apikey", self.api_key.as_str()),
            ("contractaddress", request.contract_address.as_str()),
            ("sourceCode", request.source_code.as_str()),
            ("codeformat", "solidity-single-file"),
            ("contractname", request.contract_name.as_str()),
            ("compilerversion", request.compiler_version.as_str()),
            ("constructorArguements", request.constructor_args.as_str()),
        ];

        let res = self.client.post(&self.api_url).form(&params).send().await?;
        let body: ApiResponse = res.json().await?;

        if body.status == "1" {
            Ok(body.result)
        } else {
            Err(EtherscanError::Api(body.result))
        }
    }

    /// Ask the explorer what became of a submission
    pub async fn check_verification_status(
        &self,
        guid: &str,
    ) -> Result<VerificationStatus, EtherscanError> {
        let params = [
            ("module", "contract"),
            ("action", "checkverifystatus"),
            ("guid", guid),
            ("apikey", self.api_key.as_str()),
        ];

        let res = self.client.get(&self.api_url).query(&params).send().await?;
        let body: ApiResponse = res.json().await?;

        Ok(VerificationStatus::from_response(&body.status, &body.result))
    }

    /// Poll until the submission settles; still Pending after the last
    /// check means the explorer queue is slow, not that verification failed.
    pub async fn wait_for_verification(
        &self,
        guid: &str,
    ) -> Result<VerificationStatus, EtherscanError> {
        for _ in 0..MAX_STATUS_CHECKS {
            tokio::time::sleep(STATUS_POLL_INTERVAL).await;

            let status = self.check_verification_status(guid).await?;
            if !status.is_pending() {
                return Ok(status);
            }
        }

        Ok(VerificationStatus::Pending)
    }
}

fn api_url_for_chain(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("https://api.etherscan.io/api"),
        11155111 => Some("https://api-sepolia.etherscan.io/api"),
        17000 => Some("https://api-holesky.etherscan.io/api"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_per_chain() {
        assert_eq!(api_url_for_chain(1), Some("https://api.etherscan.io/api"));
        assert_eq!(
            api_url_for_chain(11155111),
            Some("https://api-sepolia.etherscan.io/api")
        );
        assert_eq!(api_url_for_chain(31337), None);
    }

    #[test]
    fn test_unsupported_chain_is_rejected() {
        let result = EtherscanClient::for_chain(31337, "KEY".to_string());
        assert!(matches!(result, Err(EtherscanError::UnsupportedChain(31337))));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            VerificationStatus::from_response("0", "Pending in queue"),
            VerificationStatus::Pending
        );
        assert_eq!(
            VerificationStatus::from_response("1", "Pass - Verified"),
            VerificationStatus::Pass
        );
        assert_eq!(
            VerificationStatus::from_response("0", "Fail - Unable to verify"),
            VerificationStatus::Fail("Fail - Unable to verify".to_string())
        );
    }

    #[test]
    fn test_response_shape() {
        let body: ApiResponse = serde_json::from_str(
            r#"{ "status": "1", "message": "OK", "result": "bqdenkvrxix9rz" }"#,
        )
        .unwrap();
        assert_eq!(body.status, "1");
        assert_eq!(body.result, "bqdenkvrxix9rz");
    }
}
