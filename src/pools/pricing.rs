/// Token price discovery from pool reserves
///
/// Native-kind tokens are anchored at the reference price. Prices then spread
/// outwards one pool hop at a time: a pool with exactly one priced side prices
/// the other side at `amount_priced × price_priced / amount_other`.
use super::types::Pool;
use crate::logger::{self, LogTag};
use crate::tokens::TokenKey;
use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::collections::BTreeMap;

/// Fiat price of the native asset; always positive and finite
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePrice {
    value: f64,
    decimal: BigDecimal,
}

impl ReferencePrice {
    /// `None` for zero, negative or non-finite prices
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        // f64 Display is the shortest round-trip form, so 0.1 stays exactly 0.1
        let decimal = value.to_string().parse::<BigDecimal>().ok()?;
        Some(Self { value, decimal })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.decimal
    }
}

struct Proposal {
    price: BigDecimal,
    depth: BigDecimal,
}

/// Resolve unit prices for every token reachable from a native-kind token
///
/// Tokens with no pricing path are absent from the result. Pools with
/// malformed amounts or an empty side are skipped.
pub fn resolve_token_prices(
    pools: &[Pool],
    reference: &ReferencePrice,
) -> BTreeMap<TokenKey, BigDecimal> {
    let mut prices: BTreeMap<TokenKey, BigDecimal> = BTreeMap::new();

    for pool in pools {
        for (token, _) in pool.sides() {
            if token.is_native() {
                prices.insert(token.key(), reference.as_decimal().clone());
            }
        }
    }

    let scaled: Vec<Option<(BigDecimal, BigDecimal)>> = pools
        .iter()
        .map(|pool| match pool.scaled_amounts() {
            Ok((a0, a1)) if !a0.is_zero() && !a1.is_zero() => Some((a0, a1)),
            Ok(_) => None,
            Err(e) => {
                logger::warning(
                    LogTag::Pricing,
                    &format!("Skipping pool {} for pricing: {}", pool.display_name(), e),
                );
                None
            }
        })
        .collect();

    let mut layer = 0usize;
    loop {
        let mut proposals: BTreeMap<TokenKey, Proposal> = BTreeMap::new();

        for (pool, amounts) in pools.iter().zip(scaled.iter()) {
            let Some((amount0, amount1)) = amounts else {
                continue;
            };
            let (key0, key1) = pool.keys();
            if key0 == key1 {
                continue;
            }

            let (priced_key, priced_amount, other_key, other_amount) =
                match (prices.get(&key0), prices.get(&key1)) {
                    (Some(_), None) => (&key0, amount0, key1.clone(), amount1),
                    (None, Some(_)) => (&key1, amount1, key0.clone(), amount0),
                    _ => continue,
                };
            let Some(priced_price) = prices.get(priced_key) else {
                continue;
            };

            let depth = priced_amount * priced_price;
            let price = &depth / other_amount;

            // Strictly deeper wins, so ties keep the earlier pool
            let replace = proposals
                .get(&other_key)
                .map_or(true, |existing| depth > existing.depth);
            if replace {
                proposals.insert(other_key, Proposal { price, depth });
            }
        }

        if proposals.is_empty() {
            break;
        }

        layer += 1;
        logger::debug(
            LogTag::Pricing,
            &format!("Price layer {} resolved {} tokens", layer, proposals.len()),
        );
        for (key, proposal) in proposals {
            prices.insert(key, proposal.price);
        }
    }

    prices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenKind};
    use std::str::FromStr;

    fn hbar() -> Token {
        Token::new("WHBAR", "Wrapped HBAR", 8, TokenKind::Native).with_id("0.0.1062664")
    }

    fn token(symbol: &str, id: &str, decimals: u8) -> Token {
        Token::new(symbol, symbol, decimals, TokenKind::Hts).with_id(id)
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_price_rejects_unusable_values() {
        assert!(ReferencePrice::new(0.0).is_none());
        assert!(ReferencePrice::new(-1.0).is_none());
        assert!(ReferencePrice::new(f64::NAN).is_none());
        assert!(ReferencePrice::new(f64::INFINITY).is_none());

        let price = ReferencePrice::new(0.1).unwrap();
        assert_eq!(price.as_decimal(), &dec("0.1"));
        assert_eq!(price.value(), 0.1);
    }

    #[test]
    fn test_direct_price_from_native_pool() {
        let a = token("A", "0.0.100", 8);
        let pools = vec![Pool::new(a, hbar(), "1000", "5000000000").unwrap()];
        let reference = ReferencePrice::new(0.10).unwrap();

        let prices = resolve_token_prices(&pools, &reference);
        assert_eq!(prices.get("0.0.100"), Some(&dec("500000")));
        assert_eq!(prices.get("0.0.1062664"), Some(&dec("0.1")));
    }

    #[test]
    fn test_multi_hop_price() {
        let a = token("A", "0.0.100", 8);
        let b = token("B", "0.0.200", 6);
        let pools = vec![
            // 2 B per A
            Pool::new(b.clone(), a.clone(), "2000000", "100000000").unwrap(),
            // 10 native per A
            Pool::new(a, hbar(), "100000000", "1000000000").unwrap(),
        ];
        let reference = ReferencePrice::new(0.5).unwrap();

        let prices = resolve_token_prices(&pools, &reference);
        assert_eq!(prices.get("0.0.100"), Some(&dec("5")));
        assert_eq!(prices.get("0.0.200"), Some(&dec("2.5")));
    }

    #[test]
    fn test_unreachable_token_unresolved() {
        let a = token("A", "0.0.100", 8);
        let b = token("B", "0.0.200", 8);
        let pools = vec![Pool::new(a, b, "100", "100").unwrap()];
        let reference = ReferencePrice::new(1.0).unwrap();

        assert!(resolve_token_prices(&pools, &reference).is_empty());
    }

    #[test]
    fn test_deepest_pool_wins_within_layer() {
        let a = token("A", "0.0.100", 0);
        let pools = vec![
            // shallow: 1 native for 1 A
            Pool::new(a.clone(), hbar(), "1", "100000000").unwrap(),
            // deep: 100 native for 50 A
            Pool::new(a, hbar(), "50", "10000000000").unwrap(),
        ];
        let reference = ReferencePrice::new(1.0).unwrap();

        let prices = resolve_token_prices(&pools, &reference);
        assert_eq!(prices.get("0.0.100"), Some(&dec("2")));
    }

    #[test]
    fn test_empty_side_does_not_price() {
        let a = token("A", "0.0.100", 8);
        let pools = vec![Pool::new(a, hbar(), "0", "5000000000").unwrap()];
        let reference = ReferencePrice::new(1.0).unwrap();

        let prices = resolve_token_prices(&pools, &reference);
        assert!(prices.get("0.0.100").is_none());
    }
}
