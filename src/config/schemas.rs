/// Configuration schemas - all config structures defined once with defaults
///
/// Each struct is defined using the config_struct! macro which provides:
/// - Single-source definition (no repetition)
/// - Embedded defaults
/// - Serde support
use crate::config_struct;

// ============================================================================
// MIRROR NODE CONFIGURATION
// ============================================================================

config_struct! {
    /// Mirror-node REST API access
    pub struct MirrorNodeConfig {
        /// Base URL without trailing slash, e.g. https://mainnet-public.mirrornode.hedera.com
        url: String = "https://testnet.mirrornode.hedera.com".to_string(),
        /// Per-request timeout
        timeout_secs: u64 = 10,
    }
}

// ============================================================================
// SEARCH CONFIGURATION
// ============================================================================

config_struct! {
    /// Token search modal behaviour
    pub struct SearchConfig {
        /// Quiet period before a typed query is acted upon
        debounce_ms: u64 = 1000,
        /// Queries longer than this trigger a remote search
        async_search_threshold: usize = 2,
        /// Decimals offered by default when importing a contract token
        default_import_decimals: u8 = 18,
    }
}

// ============================================================================
// PRICING CONFIGURATION
// ============================================================================

config_struct! {
    /// Valuation display settings
    pub struct PricingConfig {
        /// Decimal places shown for fiat values
        display_decimals: usize = 2,
    }
}

// ============================================================================
// STAKING CONFIGURATION
// ============================================================================

config_struct! {
    /// Single-sided staking campaign
    pub struct StakingConfig {
        /// Ledger address of the staking token
        staking_token_address: String = String::new(),
        /// Decimals of the staking token
        staking_token_decimals: u8 = 8,
        /// Decimals used by the staking contract for percentages
        percentage_decimals: u8 = 2,
    }
}

// ============================================================================
// MAIN CONFIG
// ============================================================================

config_struct! {
    /// Root configuration
    pub struct Config {
        mirror_node: MirrorNodeConfig = MirrorNodeConfig::default(),
        search: SearchConfig = SearchConfig::default(),
        pricing: PricingConfig = PricingConfig::default(),
        staking: StakingConfig = StakingConfig::default(),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl MirrorNodeConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(format!("mirror_node.url must be an http(s) URL, got '{}'", self.url));
        }
        if self.timeout_secs == 0 {
            return Err("mirror_node.timeout_secs must be > 0".to_string());
        }
        Ok(())
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_import_decimals == 0 {
            return Err("search.default_import_decimals must be > 0".to_string());
        }
        Ok(())
    }
}

impl Config {
    /// Validate every section, returning the first problem found
    pub fn validate(&self) -> Result<(), String> {
        self.mirror_node.validate()?;
        self.search.validate()?;
        Ok(())
    }
}
