/// Log tags identify the subsystem a message comes from.
///
/// Each tag maps to a `--debug-<key>` / `--verbose-<key>` command-line flag.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Pools,
    Pricing,
    Tokens,
    Search,
    MirrorNode,
    Staking,
    Session,
    Test,
    Other(String),
}

impl LogTag {
    /// Key used for --debug-<key> flags and enabled_tags filtering
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Pools => "pools".to_string(),
            LogTag::Pricing => "pricing".to_string(),
            LogTag::Tokens => "tokens".to_string(),
            LogTag::Search => "search".to_string(),
            LogTag::MirrorNode => "mirror-node".to_string(),
            LogTag::Staking => "staking".to_string(),
            LogTag::Session => "session".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Uncolored display label
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Pools => "POOLS".to_string(),
            LogTag::Pricing => "PRICING".to_string(),
            LogTag::Tokens => "TOKENS".to_string(),
            LogTag::Search => "SEARCH".to_string(),
            LogTag::MirrorNode => "MIRROR".to_string(),
            LogTag::Staking => "STAKING".to_string(),
            LogTag::Session => "SESSION".to_string(),
            LogTag::Test => "TEST".to_string(),
            LogTag::Other(s) => s.to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
