/// Tokens: metadata types, identifiers, search classification and import
///
/// - `types`: Token, TokenKind, wallet balances
/// - `ids`: ledger id / address parsing and conversion
/// - `search`: pure classification of a search query
/// - `lookup`: stale-safe network confirmation of import candidates
/// - `debounce`: quiet-period input debouncing
/// - `mirror_node`: REST client for token info, balances and associations
pub mod debounce;
pub mod ids;
pub mod lookup;
pub mod mirror_node;
pub mod search;
pub mod types;

pub use debounce::Debouncer;
pub use ids::{
    classify_identifier, is_address_valid, is_ledger_id_valid, is_long_zero_address, EntityId,
    IdentifierKind,
};
pub use lookup::{
    confirm_ledger_import, contract_import_token, parse_import_decimals, ConfirmOutcome,
    SearchSequencer, SearchTicket, TokenInfoLookup,
};
pub use mirror_node::MirrorNodeClient;
pub use search::{resolve_search, should_search_remote, SearchState};
pub use types::{normalize_address, Token, TokenBalance, TokenKey, TokenKind, WalletBalance};
