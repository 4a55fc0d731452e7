/// Per-token valuation: locked amounts and fiat value across all pools
use super::pricing::{resolve_token_prices, ReferencePrice};
use super::types::Pool;
use crate::amounts::{raw_to_decimal, to_display_f64};
use crate::logger::{self, LogLevel, LogTag};
use crate::tokens::{Token, TokenKey};
use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    /// Fiat price per token unit, `None` when no pricing path exists
    pub unit_price: Option<BigDecimal>,
    /// Sum of the token's scaled amounts over every pool it appears in
    pub locked_amount: BigDecimal,
    /// `unit_price × locked_amount`; `None` when the price or an amount is unresolved
    pub value: Option<BigDecimal>,
    pub pool_count: usize,
}

impl Valuation {
    pub fn unit_price_f64(&self) -> Option<f64> {
        self.unit_price.as_ref().map(to_display_f64)
    }

    pub fn value_f64(&self) -> Option<f64> {
        self.value.as_ref().map(to_display_f64)
    }
}

/// Value every token appearing in `pools`
///
/// Pure and idempotent. Empty input gives an empty map.
pub fn compute_token_valuations(
    pools: &[Pool],
    reference: &ReferencePrice,
) -> BTreeMap<TokenKey, Valuation> {
    if pools.is_empty() {
        return BTreeMap::new();
    }

    let prices = resolve_token_prices(pools, reference);
    let mut locked: BTreeMap<TokenKey, (BigDecimal, usize)> = BTreeMap::new();
    let mut incomplete: BTreeSet<TokenKey> = BTreeSet::new();

    for pool in pools {
        for (token, raw) in pool.sides() {
            let key = token.key();
            let entry = locked
                .entry(key.clone())
                .or_insert_with(|| (BigDecimal::zero(), 0));
            entry.1 += 1;

            match raw_to_decimal(raw, token.decimals) {
                Ok(amount) => entry.0 += amount,
                Err(e) => {
                    logger::warning(
                        LogTag::Pools,
                        &format!(
                            "Pool {} has an unreadable {} amount: {}",
                            pool.display_name(),
                            token.symbol,
                            e
                        ),
                    );
                    incomplete.insert(key);
                }
            }
        }
    }

    let valuations: BTreeMap<TokenKey, Valuation> = locked
        .into_iter()
        .map(|(key, (locked_amount, pool_count))| {
            let unit_price = prices.get(&key).cloned();
            let value = match &unit_price {
                Some(price) if !incomplete.contains(&key) => Some(price * &locked_amount),
                _ => None,
            };
            let valuation = Valuation {
                unit_price,
                locked_amount,
                value,
                pool_count,
            };
            (key, valuation)
        })
        .collect();

    if logger::enabled(&LogTag::Pools, LogLevel::Debug) {
        let unresolved = valuations.values().filter(|v| v.value.is_none()).count();
        logger::debug(
            LogTag::Pools,
            &format!(
                "Valued {} tokens across {} pools ({} unresolved)",
                valuations.len(),
                pools.len(),
                unresolved
            ),
        );
    }

    valuations
}

/// One row of the token overview table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenOverview {
    pub token: Token,
    pub price: Option<f64>,
    pub tvl: Option<f64>,
    pub pool_count: usize,
}

/// Price and TVL for each known token, in list order
///
/// Returns `None` until both the token list and the pool list are available.
/// Native tokens are priced at the reference price directly; tokens outside
/// every pool have zero TVL.
pub fn build_token_overview(
    tokens: &[Token],
    pools: &[Pool],
    reference: &ReferencePrice,
) -> Option<Vec<TokenOverview>> {
    if tokens.is_empty() || pools.is_empty() {
        return None;
    }

    let valuations = compute_token_valuations(pools, reference);

    let rows = tokens
        .iter()
        .map(|token| {
            let valuation = valuations.get(&token.key());
            let price = if token.is_native() {
                Some(reference.value())
            } else {
                valuation.and_then(Valuation::unit_price_f64)
            };
            let (tvl, pool_count) = match valuation {
                Some(v) => (v.value_f64(), v.pool_count),
                None => (Some(0.0), 0),
            };
            TokenOverview {
                token: token.clone(),
                price,
                tvl,
                pool_count,
            }
        })
        .collect();

    Some(rows)
}
