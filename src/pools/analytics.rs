/// Pool-level aggregates and pool filtering
use super::types::Pool;
use crate::logger::{self, LogTag};
use serde::Serialize;

/// Summed rolling figures over a set of pools
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PoolsAnalytics {
    pub tvl: f64,
    pub volume_24h: f64,
    pub volume_7d: f64,
}

impl PoolsAnalytics {
    /// Figures of a single pool
    pub fn for_pool(pool: &Pool) -> Self {
        Self {
            tvl: parse_figure(pool, "tvl", &pool.tvl),
            volume_24h: parse_figure(pool, "volume_24h", &pool.volume_24h),
            volume_7d: parse_figure(pool, "volume_7d", &pool.volume_7d),
        }
    }
}

/// Parse an upstream figure; missing or unreadable figures count as zero
fn parse_figure(pool: &Pool, field: &str, raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            logger::warning(
                LogTag::Pools,
                &format!(
                    "Pool {} has unreadable {} '{}', counted as 0",
                    pool.display_name(),
                    field,
                    raw
                ),
            );
            0.0
        }
    }
}

/// Sum TVL, 24h volume and 7d volume over all pools
pub fn compute_pools_analytics(pools: &[Pool]) -> PoolsAnalytics {
    pools
        .iter()
        .map(PoolsAnalytics::for_pool)
        .fold(PoolsAnalytics::default(), |acc, p| PoolsAnalytics {
            tvl: acc.tvl + p.tvl,
            volume_24h: acc.volume_24h + p.volume_24h,
            volume_7d: acc.volume_7d + p.volume_7d,
        })
}

/// Pools with a side matching `query` by id, address or symbol
///
/// Ids and addresses must match exactly; symbols match case-insensitively.
/// An empty query keeps every pool.
pub fn filter_pools_by_token(pools: &[Pool], query: &str) -> Vec<Pool> {
    let query = query.trim();
    if query.is_empty() {
        return pools.to_vec();
    }

    pools
        .iter()
        .filter(|pool| {
            [&pool.token0, &pool.token1].iter().any(|token| {
                token.matches_identifier(query) || token.symbol.eq_ignore_ascii_case(query)
            })
        })
        .cloned()
        .collect()
}
