/// Core types for the pools module
use crate::amounts::{is_raw_amount, raw_to_decimal};
use crate::errors::CoreError;
use crate::tokens::{Token, TokenKey};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Two-token liquidity pool snapshot
///
/// Amounts are raw integers in each token's smallest unit. The rolling figures
/// (`tvl`, `volume_24h`, `volume_7d`) are precomputed upstream and carried as
/// decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub token0: Token,
    pub token1: Token,
    pub token0_amount: String,
    pub token1_amount: String,
    #[serde(default)]
    pub pair_name: String,
    #[serde(default)]
    pub tvl: String,
    #[serde(default)]
    pub volume_24h: String,
    #[serde(default)]
    pub volume_7d: String,
}

impl Pool {
    pub fn new(
        token0: Token,
        token1: Token,
        token0_amount: &str,
        token1_amount: &str,
    ) -> Result<Self, CoreError> {
        let pair_name = format!("{}/{}", token0.symbol, token1.symbol);
        let pool = Self {
            token0,
            token1,
            token0_amount: token0_amount.trim().to_string(),
            token1_amount: token1_amount.trim().to_string(),
            pair_name,
            tvl: String::new(),
            volume_24h: String::new(),
            volume_7d: String::new(),
        };
        pool.validate()?;
        Ok(pool)
    }

    /// Attach the upstream rolling figures
    pub fn with_figures(mut self, tvl: &str, volume_24h: &str, volume_7d: &str) -> Self {
        self.tvl = tvl.to_string();
        self.volume_24h = volume_24h.to_string();
        self.volume_7d = volume_7d.to_string();
        self
    }

    /// Check the pool invariants: two distinct tokens, non-negative integer amounts
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |reason: String| CoreError::InvalidPool {
            pair: self.display_name(),
            reason,
        };

        if self.token0.key() == self.token1.key() {
            return Err(invalid(format!("both sides are {}", self.token0.key())));
        }
        if !is_raw_amount(&self.token0_amount) {
            return Err(invalid(format!("token0 amount '{}' is not an integer", self.token0_amount)));
        }
        if !is_raw_amount(&self.token1_amount) {
            return Err(invalid(format!("token1 amount '{}' is not an integer", self.token1_amount)));
        }
        Ok(())
    }

    pub fn display_name(&self) -> String {
        if self.pair_name.is_empty() {
            format!("{}/{}", self.token0.symbol, self.token1.symbol)
        } else {
            self.pair_name.clone()
        }
    }

    pub fn contains_token(&self, key: &str) -> bool {
        self.token0.key() == key || self.token1.key() == key
    }

    /// Both sides as (token, raw amount)
    pub fn sides(&self) -> [(&Token, &str); 2] {
        [
            (&self.token0, self.token0_amount.as_str()),
            (&self.token1, self.token1_amount.as_str()),
        ]
    }

    /// Both amounts scaled by their token decimals
    pub fn scaled_amounts(&self) -> Result<(BigDecimal, BigDecimal), CoreError> {
        Ok((
            raw_to_decimal(&self.token0_amount, self.token0.decimals)?,
            raw_to_decimal(&self.token1_amount, self.token1.decimals)?,
        ))
    }

    pub fn keys(&self) -> (TokenKey, TokenKey) {
        (self.token0.key(), self.token1.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use std::str::FromStr;

    fn hbar() -> Token {
        Token::new("WHBAR", "Wrapped HBAR", 8, TokenKind::Native).with_id("0.0.1062664")
    }

    fn heli() -> Token {
        Token::new("HELI", "HeliSwap", 8, TokenKind::Hts).with_id("0.0.777")
    }

    #[test]
    fn test_new_pool() {
        let pool = Pool::new(heli(), hbar(), "1000", " 5000000000 ").unwrap();
        assert_eq!(pool.pair_name, "HELI/WHBAR");
        assert_eq!(pool.token1_amount, "5000000000");

        let (a0, a1) = pool.scaled_amounts().unwrap();
        assert_eq!(a0, BigDecimal::from_str("0.00001").unwrap());
        assert_eq!(a1, BigDecimal::from(50));
    }

    #[test]
    fn test_same_token_rejected() {
        let err = Pool::new(heli(), heli(), "1", "1").unwrap_err();
        assert!(matches!(err, CoreError::InvalidPool { .. }));
    }

    #[test]
    fn test_bad_amount_rejected() {
        assert!(Pool::new(heli(), hbar(), "-1", "1").is_err());
        assert!(Pool::new(heli(), hbar(), "1", "1.5").is_err());
    }

    #[test]
    fn test_deserialize_pool() {
        let json = r#"{
            "token0": {"hederaId": "0.0.777", "symbol": "HELI", "name": "HeliSwap", "decimals": 8, "type": "HTS"},
            "token1": {"hederaId": "0.0.1062664", "symbol": "WHBAR", "name": "Wrapped HBAR", "decimals": 8, "type": "NATIVE"},
            "token0Amount": "1000",
            "token1Amount": "5000000000",
            "pairName": "HELI/WHBAR",
            "tvl": "10.0",
            "volume24h": "1.5",
            "volume7d": "12"
        }"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert!(pool.validate().is_ok());
        assert_eq!(pool.volume_24h, "1.5");
        assert!(pool.contains_token("0.0.777"));
    }
}
