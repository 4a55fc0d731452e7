/// Core token types
use serde::{Deserialize, Serialize};

/// Map key identifying a token across pools and valuations
pub type TokenKey = String;

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// The network's native asset (or its wrapped form in pools)
    Native,
    /// Fungible token from the ledger's token registry
    Hts,
    /// Smart-contract token known only by its contract address
    Erc20,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Native => "native",
            TokenKind::Hts => "hts",
            TokenKind::Erc20 => "erc20",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Token metadata as used by pools, search and staking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Structured ledger id (`shard.realm.num`)
    #[serde(default)]
    pub hedera_id: Option<String>,
    /// 40-hex ledger address
    #[serde(default)]
    pub address: Option<String>,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(default)]
    pub has_fees: bool,
}

impl Token {
    pub fn new(symbol: &str, name: &str, decimals: u8, kind: TokenKind) -> Self {
        Self {
            hedera_id: None,
            address: None,
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            kind,
            has_fees: false,
        }
    }

    pub fn with_id(mut self, hedera_id: &str) -> Self {
        self.hedera_id = Some(hedera_id.to_string());
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn with_fees(mut self, has_fees: bool) -> Self {
        self.has_fees = has_fees;
        self
    }

    /// Key used in valuation maps: the lowercased address without `0x`,
    /// falling back to the ledger id
    pub fn key(&self) -> TokenKey {
        match (&self.address, &self.hedera_id) {
            (Some(address), _) if !address.is_empty() => normalize_address(address),
            (_, Some(id)) => id.clone(),
            _ => format!("symbol:{}", self.symbol),
        }
    }

    /// True when `value` is this token's id or address
    pub fn matches_identifier(&self, value: &str) -> bool {
        let value = value.trim();
        if self.hedera_id.as_deref() == Some(value) {
            return true;
        }
        match &self.address {
            Some(address) if !address.is_empty() => {
                normalize_address(address) == normalize_address(value)
            }
            _ => false,
        }
    }

    /// Symbol and name are both present
    pub fn is_resolved(&self) -> bool {
        !self.symbol.trim().is_empty() && !self.name.trim().is_empty()
    }

    pub fn is_native(&self) -> bool {
        self.kind == TokenKind::Native
    }
}

/// Lowercase an address and drop an optional `0x` prefix
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    stripped.to_lowercase()
}

/// Account balance snapshot from the mirror node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalance {
    /// Native balance in the smallest unit
    pub balance: String,
    pub tokens: Vec<TokenBalance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub token_id: String,
    pub balance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefers_address() {
        let token = Token::new("USDC", "USD Coin", 6, TokenKind::Hts)
            .with_id("0.0.456858")
            .with_address("0x000000000000000000000000000000000006F89A");
        assert_eq!(token.key(), "000000000000000000000000000000000006f89a");

        let id_only = Token::new("HELI", "HeliSwap", 8, TokenKind::Hts).with_id("0.0.1234");
        assert_eq!(id_only.key(), "0.0.1234");
    }

    #[test]
    fn test_matches_identifier() {
        let token = Token::new("USDC", "USD Coin", 6, TokenKind::Hts)
            .with_id("0.0.456858")
            .with_address("000000000000000000000000000000000006f89a");
        assert!(token.matches_identifier("0.0.456858"));
        assert!(token.matches_identifier("0x000000000000000000000000000000000006F89A"));
        assert!(!token.matches_identifier("0.0.1"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "hederaId": "0.0.1234",
            "address": "00000000000000000000000000000000000004d2",
            "symbol": "HELI",
            "name": "HeliSwap",
            "decimals": 8,
            "type": "HTS"
        }"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.kind, TokenKind::Hts);
        assert!(!token.has_fees);
        assert!(token.is_resolved());
    }
}
