/// Single-sided staking figures
///
/// Turns raw staking-contract reads into display values, prices the staking
/// token from its native-asset pool, and tracks the locally adjusted staked
/// amount between contract refreshes.
use crate::amounts::{format_units, is_raw_amount, parse_units};
use crate::config::StakingConfig;
use crate::errors::CoreError;
use crate::pools::{Pool, ReferencePrice};
use crate::tokens::{Token, TokenKind};
use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Contract amount in raw units plus its token-unit rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractAmount {
    pub raw: String,
    pub formatted: String,
}

impl ContractAmount {
    pub fn from_raw(raw: &str, decimals: u8) -> Result<Self, CoreError> {
        let raw = raw.trim();
        Ok(Self {
            raw: raw.to_string(),
            formatted: format_units(raw, decimals)?,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.raw.bytes().all(|b| b == b'0')
    }
}

/// Raw reads from the staking contract for one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingReads {
    pub total_deposited: String,
    pub rewards_percentage: String,
    pub total_rewards: String,
    pub claimable: String,
    pub position: PositionReads,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionReads {
    pub amount: String,
    /// Lock duration in seconds
    pub duration: u64,
    /// Unix timestamp in seconds, 0 when there is no position
    pub expiration: i64,
    pub rewards_not_claimed: String,
    pub rewards_pending: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakingPosition {
    pub amount: ContractAmount,
    pub duration: String,
    pub expiration: Option<DateTime<Utc>>,
    pub rewards_not_claimed: ContractAmount,
    pub rewards_pending: ContractAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakingOverview {
    pub total_deposited: ContractAmount,
    /// Annual rate as a decimal percentage string, e.g. "12.5"
    pub rewards_percentage: String,
    pub total_rewards: ContractAmount,
    pub claimable: ContractAmount,
    pub position: StakingPosition,
}

impl StakingOverview {
    pub fn from_reads(reads: &StakingReads, config: &StakingConfig) -> Result<Self, CoreError> {
        let decimals = config.staking_token_decimals;
        let amount = |raw: &str| ContractAmount::from_raw(raw, decimals);

        Ok(Self {
            total_deposited: amount(&reads.total_deposited)?,
            rewards_percentage: format_units(
                reads.rewards_percentage.trim(),
                config.percentage_decimals,
            )?,
            total_rewards: amount(&reads.total_rewards)?,
            claimable: amount(&reads.claimable)?,
            position: StakingPosition {
                amount: amount(&reads.position.amount)?,
                duration: format_duration(reads.position.duration),
                expiration: expiration_time(reads.position.expiration),
                rewards_not_claimed: amount(&reads.position.rewards_not_claimed)?,
                rewards_pending: amount(&reads.position.rewards_pending)?,
            },
        })
    }
}

/// True when the account holds a non-empty position
pub fn has_user_staked(overview: Option<&StakingOverview>) -> bool {
    overview.map_or(false, |o| !o.position.amount.is_zero())
}

/// Human-readable lock duration, e.g. "30 days 2 hours"
pub fn format_duration(secs: u64) -> String {
    let units = [("day", 86_400u64), ("hour", 3_600), ("minute", 60)];
    let mut remaining = secs;
    let mut parts = Vec::new();

    for (name, size) in units {
        let count = remaining / size;
        remaining %= size;
        if count > 0 {
            parts.push(format!("{} {}{}", count, name, if count == 1 { "" } else { "s" }));
        }
    }

    if parts.is_empty() {
        format!("{} second{}", secs, if secs == 1 { "" } else { "s" })
    } else {
        parts.join(" ")
    }
}

/// Position expiration as a UTC time; `None` for the "no position" zero value
pub fn expiration_time(timestamp: i64) -> Option<DateTime<Utc>> {
    if timestamp <= 0 {
        return None;
    }
    Utc.timestamp_opt(timestamp, 0).single()
}

/// Price of the staking token from the first pool pairing it with a native token
///
/// `reference / (staking_amount / native_amount)`; `None` without such a pool or
/// when either side is empty.
pub fn staking_token_price(
    pools: &[Pool],
    staking_token: &str,
    reference: &ReferencePrice,
) -> Option<BigDecimal> {
    pools.iter().find_map(|pool| {
        let (staking_amount, native_amount) = match (&pool.token0, &pool.token1) {
            (t0, t1) if t0.matches_identifier(staking_token) && t1.is_native() => {
                let (a0, a1) = pool.scaled_amounts().ok()?;
                (a0, a1)
            }
            (t0, t1) if t1.matches_identifier(staking_token) && t0.is_native() => {
                let (a0, a1) = pool.scaled_amounts().ok()?;
                (a1, a0)
            }
            _ => return None,
        };

        if staking_amount.is_zero() || native_amount.is_zero() {
            return None;
        }
        Some(reference.as_decimal() * &native_amount / &staking_amount)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeAction {
    Add,
    Remove,
}

impl FromStr for StakeAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "stake" | "deposit" => Ok(StakeAction::Add),
            "remove" | "unstake" | "withdraw" => Ok(StakeAction::Remove),
            other => Err(CoreError::InvalidStakeAction {
                action: other.to_string(),
            }),
        }
    }
}

/// Apply a stake or unstake to the locally tracked staked amount
///
/// Both amounts are token-unit strings at `decimals` precision. Removing more
/// than is staked is an error.
pub fn adjust_staked(
    current: &str,
    delta: &str,
    action: StakeAction,
    decimals: u8,
) -> Result<String, CoreError> {
    let current_raw = BigDecimal::from_str(&parse_units(current, decimals)?)
        .map_err(|e| CoreError::invalid_amount(current, &e.to_string()))?;
    let delta_raw = BigDecimal::from_str(&parse_units(delta, decimals)?)
        .map_err(|e| CoreError::invalid_amount(delta, &e.to_string()))?;

    let result = match action {
        StakeAction::Add => current_raw + delta_raw,
        StakeAction::Remove => current_raw - delta_raw,
    };
    if result.is_negative() {
        return Err(CoreError::invalid_amount(
            delta,
            &format!("exceeds the staked amount {}", current),
        ));
    }

    let raw = result.with_scale(0).to_string();
    if !is_raw_amount(&raw) {
        return Err(CoreError::invalid_amount(&raw, "unexpected staked amount"));
    }
    format_units(&raw, decimals)
}

/// Ledger tokens the account still has to associate before receiving them
///
/// Native and contract tokens never need association.
pub fn tokens_to_associate(tokens: &[Token], associated_ids: &[String]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Hts)
        .filter(|token| match &token.hedera_id {
            Some(id) => !associated_ids.iter().any(|a| a == id),
            None => true,
        })
        .cloned()
        .collect()
}
