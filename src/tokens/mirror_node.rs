/// Mirror-node REST client
///
/// Endpoints used:
/// 1. /api/v1/tokens/{id} - token registry entry (id may be `shard.realm.num` or an address)
/// 2. /api/v1/balances?order=asc&account.id={account} - native + token balances
/// 3. /api/v1/accounts/{account}/tokens - token associations (paginated via links.next)
use super::lookup::TokenInfoLookup;
use super::types::{Token, TokenBalance, TokenKind, WalletBalance};
use crate::config::MirrorNodeConfig;
use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Upper bound on association pages followed for one account
const MAX_ASSOCIATION_PAGES: usize = 20;

// ============================================================================
// RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomFees {
    #[serde(default)]
    pub fixed_fees: Vec<serde_json::Value>,
    #[serde(default)]
    pub fractional_fees: Vec<serde_json::Value>,
    #[serde(default)]
    pub royalty_fees: Vec<serde_json::Value>,
}

impl CustomFees {
    pub fn is_empty(&self) -> bool {
        self.fixed_fees.is_empty() && self.fractional_fees.is_empty() && self.royalty_fees.is_empty()
    }
}

/// Registry entry as returned by /api/v1/tokens/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfoResponse {
    pub token_id: String,
    #[serde(default)]
    pub evm_address: Option<String>,
    pub name: String,
    pub symbol: String,
    /// Decimal count, sent as a string
    pub decimals: String,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(default)]
    pub expiry_timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub custom_fees: Option<CustomFees>,
}

impl TokenInfoResponse {
    pub fn has_fees(&self) -> bool {
        self.custom_fees.as_ref().map_or(false, |fees| !fees.is_empty())
    }

    pub fn to_token(&self) -> Result<Token, ApiError> {
        let decimals = self.decimals.trim().parse::<u8>().map_err(|_| {
            ApiError::InvalidResponse(format!(
                "token {} has invalid decimals '{}'",
                self.token_id, self.decimals
            ))
        })?;

        let mut token = Token::new(&self.symbol, &self.name, decimals, TokenKind::Hts)
            .with_id(&self.token_id)
            .with_fees(self.has_fees());
        if let Some(address) = self.evm_address.as_deref().filter(|a| !a.is_empty()) {
            token = token.with_address(address);
        }
        Ok(token)
    }
}

#[derive(Debug, Deserialize)]
struct BalancesResponse {
    #[serde(default)]
    balances: Vec<AccountBalanceEntry>,
}

#[derive(Debug, Deserialize)]
struct AccountBalanceEntry {
    balance: serde_json::Value,
    #[serde(default)]
    tokens: Vec<TokenBalanceEntry>,
}

#[derive(Debug, Deserialize)]
struct TokenBalanceEntry {
    token_id: String,
    balance: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AccountTokensResponse {
    #[serde(default)]
    tokens: Vec<AccountTokenEntry>,
    #[serde(default)]
    links: Option<Links>,
}

#[derive(Debug, Deserialize)]
struct AccountTokenEntry {
    token_id: String,
}

#[derive(Debug, Deserialize)]
struct Links {
    next: Option<String>,
}

/// Balances arrive as JSON numbers or strings; keep them as digit strings
fn amount_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => "0".to_string(),
    }
}

fn parse_wallet_balance(response: BalancesResponse) -> WalletBalance {
    match response.balances.into_iter().next() {
        Some(entry) => WalletBalance {
            balance: amount_string(&entry.balance),
            tokens: entry
                .tokens
                .into_iter()
                .map(|t| TokenBalance {
                    token_id: t.token_id,
                    balance: amount_string(&t.balance),
                })
                .collect(),
        },
        None => WalletBalance::default(),
    }
}

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct MirrorNodeClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl MirrorNodeClient {
    pub fn new(config: &MirrorNodeConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a path relative to the base URL; `Ok(None)` on 404
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        logger::debug(LogTag::MirrorNode, &format!("GET {}", url));

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout {
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    ApiError::Network(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            logger::debug(LogTag::MirrorNode, &format!("Not found: {}", path));
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", path, e)))?;
        Ok(Some(parsed))
    }

    /// Raw registry entry for a token id or address
    pub async fn get_token_details(&self, id: &str) -> Result<Option<TokenInfoResponse>, ApiError> {
        self.get_json(&format!("/api/v1/tokens/{}", id.trim())).await
    }

    /// Token metadata; `Ok(None)` when the registry does not know the id
    pub async fn get_token_info(&self, id: &str) -> Result<Option<Token>, ApiError> {
        match self.get_token_details(id).await? {
            Some(details) => details.to_token().map(Some),
            None => Ok(None),
        }
    }

    /// Native and token balances of an account
    pub async fn get_wallet_balance(&self, account_id: &str) -> Result<WalletBalance, ApiError> {
        let path = format!("/api/v1/balances?order=asc&account.id={}", account_id.trim());
        let response: Option<BalancesResponse> = self.get_json(&path).await?;
        Ok(response.map(parse_wallet_balance).unwrap_or_default())
    }

    /// Ids of every token the account is associated with
    pub async fn get_associated_tokens(&self, account_id: &str) -> Result<Vec<String>, ApiError> {
        let mut ids = Vec::new();
        let mut path = Some(format!("/api/v1/accounts/{}/tokens?limit=100", account_id.trim()));
        let mut pages = 0;

        while let Some(current) = path.take() {
            pages += 1;
            let response: Option<AccountTokensResponse> = self.get_json(&current).await?;
            let Some(response) = response else { break };

            ids.extend(response.tokens.into_iter().map(|t| t.token_id));
            path = response.links.and_then(|l| l.next).filter(|n| !n.is_empty());

            if pages >= MAX_ASSOCIATION_PAGES && path.is_some() {
                logger::warning(
                    LogTag::MirrorNode,
                    &format!(
                        "Association list for {} truncated after {} pages",
                        account_id, pages
                    ),
                );
                break;
            }
        }

        Ok(ids)
    }
}

#[async_trait]
impl TokenInfoLookup for MirrorNodeClient {
    async fn token_info(&self, id: &str) -> Result<Option<Token>, ApiError> {
        self.get_token_info(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_info() {
        let json = r#"{
            "token_id": "0.0.456858",
            "evm_address": "0x000000000000000000000000000000000006f89a",
            "name": "USD Coin",
            "symbol": "USDC",
            "decimals": "6",
            "total_supply": "2000000000000000",
            "expiry_timestamp": 1911974400000000000,
            "custom_fees": {
                "created_timestamp": "1633392000.000000000",
                "fixed_fees": [],
                "fractional_fees": []
            }
        }"#;
        let info: TokenInfoResponse = serde_json::from_str(json).unwrap();
        assert!(!info.has_fees());

        let token = info.to_token().unwrap();
        assert_eq!(token.decimals, 6);
        assert_eq!(token.kind, TokenKind::Hts);
        assert_eq!(token.hedera_id.as_deref(), Some("0.0.456858"));
        assert_eq!(token.key(), "000000000000000000000000000000000006f89a");
    }

    #[test]
    fn test_custom_fees_set_has_fees() {
        let json = r#"{
            "token_id": "0.0.1234",
            "name": "Taxed",
            "symbol": "TAX",
            "decimals": "8",
            "custom_fees": {
                "fixed_fees": [{"amount": 1, "collector_account_id": "0.0.2"}],
                "fractional_fees": []
            }
        }"#;
        let info: TokenInfoResponse = serde_json::from_str(json).unwrap();
        assert!(info.has_fees());
        assert!(info.to_token().unwrap().has_fees);
    }

    #[test]
    fn test_invalid_decimals_rejected() {
        let json = r#"{"token_id": "0.0.1", "name": "X", "symbol": "X", "decimals": "many"}"#;
        let info: TokenInfoResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(info.to_token(), Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_wallet_balance() {
        let json = r#"{
            "timestamp": "1700000000.000000000",
            "balances": [{
                "account": "0.0.1001",
                "balance": 123456789012,
                "tokens": [
                    {"token_id": "0.0.456858", "balance": 5000000},
                    {"token_id": "0.0.777", "balance": "42"}
                ]
            }]
        }"#;
        let response: BalancesResponse = serde_json::from_str(json).unwrap();
        let balance = parse_wallet_balance(response);
        assert_eq!(balance.balance, "123456789012");
        assert_eq!(balance.tokens.len(), 2);
        assert_eq!(balance.tokens[1].balance, "42");
    }

    #[test]
    fn test_empty_balances_default() {
        let response: BalancesResponse = serde_json::from_str(r#"{"balances": []}"#).unwrap();
        assert_eq!(parse_wallet_balance(response), WalletBalance::default());
    }

    #[test]
    fn test_client_trims_base_url() {
        let config = MirrorNodeConfig {
            url: "https://mainnet-public.mirrornode.hedera.com/".to_string(),
            timeout_secs: 5,
        };
        let client = MirrorNodeClient::new(&config);
        assert_eq!(client.base_url(), "https://mainnet-public.mirrornode.hedera.com");
    }
}
