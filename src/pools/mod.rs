/// Pool TVL and price aggregation
///
/// Everything here is a pure recomputation over a snapshot of pools: callers
/// re-invoke the functions whenever the pool feed or the reference price
/// changes. Nothing is cached or patched in place.
pub mod analytics;
pub mod pricing;
pub mod types;
pub mod valuation;

pub use analytics::{compute_pools_analytics, filter_pools_by_token, PoolsAnalytics};
pub use pricing::{resolve_token_prices, ReferencePrice};
pub use types::Pool;
pub use valuation::{build_token_overview, compute_token_valuations, TokenOverview, Valuation};
