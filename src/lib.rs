//! heliswap-core: data core of a ledger-network DEX frontend
//!
//! - `pools`: token prices, per-token TVL and pool aggregates from pool snapshots
//! - `tokens`: token metadata, search classification, import confirmation and
//!   the mirror-node client
//! - `staking`: single-sided staking figures
//! - `session`: explicit account session over the mirror node
//! - `amounts`, `config`, `errors`, `logger`: shared infrastructure

pub mod amounts;
pub mod config;
pub mod errors;
pub mod logger;
pub mod pools;
pub mod session;
pub mod staking;
pub mod tokens;

pub use errors::{ApiError, CoreError};
