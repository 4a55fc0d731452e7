/// Network confirmation of import candidates
///
/// A search that classifies as `ImportableAsLedgerToken` is confirmed by asking
/// the token registry for the candidate. Responses can arrive out of order, so
/// every lookup carries a `SearchTicket`; only the most recently issued ticket
/// may produce an outcome.
use super::ids::{classify_identifier, EntityId, IdentifierKind};
use super::types::{normalize_address, Token, TokenKind};
use crate::errors::{ApiError, CoreError};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

pub const CONTRACT_TOKEN_SYMBOL: &str = "ERC20";
pub const CONTRACT_TOKEN_NAME: &str = "Possible ERC20 Token";

/// Token registry lookup by ledger id or ledger address
#[async_trait]
pub trait TokenInfoLookup: Send + Sync {
    /// `Ok(None)` when the registry does not know the token
    async fn token_info(&self, id: &str) -> Result<Option<Token>, ApiError>;
}

/// Generation counter for search lookups
#[derive(Debug, Default)]
pub struct SearchSequencer {
    generation: AtomicU64,
}

/// Proof of which search generation started a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search generation, superseding every earlier ticket
    pub fn issue(&self) -> SearchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket { generation }
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The registry knows the token; `fee_warning` is set when it carries custom fees
    Found { token: Token, fee_warning: bool },
    /// The registry does not know it; offer manual contract-token import
    ImportAsContractToken { query: String },
}

/// Id string passed to the registry for a candidate
fn lookup_key(candidate: &IdentifierKind) -> String {
    match candidate.lookup_id() {
        Some(id) => id.to_string(),
        None => match candidate {
            IdentifierKind::LedgerId(id) => id.to_string(),
            IdentifierKind::Address(address) => format!("0x{}", normalize_address(address)),
        },
    }
}

fn candidate_text(candidate: &IdentifierKind) -> String {
    match candidate {
        IdentifierKind::LedgerId(id) => id.to_string(),
        IdentifierKind::Address(address) => address.clone(),
    }
}

/// Confirm an import candidate against the registry
///
/// Returns `None` when `ticket` has been superseded by the time the response
/// arrives. Transport failures are logged and treated as "not found".
pub async fn confirm_ledger_import<L>(
    lookup: &L,
    candidate: &IdentifierKind,
    ticket: SearchTicket,
    sequencer: &SearchSequencer,
) -> Option<ConfirmOutcome>
where
    L: TokenInfoLookup + ?Sized,
{
    let key = lookup_key(candidate);
    logger::debug(
        LogTag::Search,
        &format!("Confirming import candidate {} (generation {})", key, ticket.generation),
    );

    let result = lookup.token_info(&key).await;

    if !sequencer.is_current(ticket) {
        logger::debug(
            LogTag::Search,
            &format!("Discarding stale lookup for {} (generation {})", key, ticket.generation),
        );
        return None;
    }

    let found = match result {
        Ok(found) => found,
        Err(e) => {
            logger::warning(
                LogTag::Search,
                &format!("Token lookup for {} failed: {}", key, e),
            );
            None
        }
    };

    Some(match found {
        Some(mut token) => {
            if token.address.is_none() {
                token.address = token
                    .hedera_id
                    .as_deref()
                    .and_then(|id| id.parse::<EntityId>().ok())
                    .map(|id| id.to_address());
            }
            let fee_warning = token.has_fees;
            if fee_warning {
                logger::info(
                    LogTag::Search,
                    &format!("Token {} has custom fees", token.symbol),
                );
            }
            ConfirmOutcome::Found { token, fee_warning }
        }
        None => ConfirmOutcome::ImportAsContractToken {
            query: candidate_text(candidate),
        },
    })
}

/// Placeholder token for a manual contract-token import
///
/// The counterpart id or address is derived locally when the query allows it
/// (ledger ids and long-zero addresses); alias addresses keep no ledger id.
/// Any other text becomes the ledger id as typed, with no address. Only a
/// blank query is rejected.
pub fn contract_import_token(query: &str, decimals: u8) -> Result<Token, CoreError> {
    let query = query.trim();
    let mut token = Token::new(
        CONTRACT_TOKEN_SYMBOL,
        CONTRACT_TOKEN_NAME,
        decimals,
        TokenKind::Erc20,
    );

    match classify_identifier(query) {
        Some(IdentifierKind::LedgerId(id)) => {
            token.hedera_id = Some(id.to_string());
            token.address = Some(id.to_address());
        }
        Some(kind @ IdentifierKind::Address(_)) => {
            token.address = Some(normalize_address(query));
            token.hedera_id = kind.lookup_id().map(|id| id.to_string());
        }
        None if query.is_empty() => {
            return Err(CoreError::InvalidIdentifier {
                value: query.to_string(),
            })
        }
        None => token.hedera_id = Some(query.to_string()),
    }

    Ok(token)
}

/// Parse the decimals typed for a contract-token import
///
/// Zero, negative and non-numeric input are rejected.
pub fn parse_import_decimals(input: &str) -> Result<u8, CoreError> {
    let input = input.trim();
    match input.parse::<u8>() {
        Ok(0) => Err(CoreError::invalid_amount(input, "decimals must be greater than zero")),
        Ok(decimals) => Ok(decimals),
        Err(_) => Err(CoreError::invalid_amount(input, "decimals must be a whole number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::search::{resolve_search, SearchState};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::time::Duration;

    struct MockLookup {
        tokens: HashMap<String, Token>,
        fail: bool,
        delay: Option<Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl MockLookup {
        fn new() -> Self {
            Self {
                tokens: HashMap::new(),
                fail: false,
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_token(mut self, id: &str, token: Token) -> Self {
            self.tokens.insert(id.to_string(), token);
            self
        }
    }

    #[async_trait]
    impl TokenInfoLookup for MockLookup {
        async fn token_info(&self, id: &str) -> Result<Option<Token>, ApiError> {
            self.calls.lock().push(id.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(ApiError::Network("connection reset".to_string()));
            }
            Ok(self.tokens.get(id).cloned())
        }
    }

    fn heli() -> Token {
        Token::new("HELI", "HeliSwap", 8, TokenKind::Hts).with_id("0.0.777")
    }

    #[test]
    fn test_sequencer_supersedes_earlier_tickets() {
        let sequencer = SearchSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(second.generation() > first.generation());
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[tokio::test]
    async fn test_confirm_found_fills_address() {
        let lookup = MockLookup::new().with_token("0.0.777", heli());
        let sequencer = SearchSequencer::new();
        let ticket = sequencer.issue();

        let outcome = confirm_ledger_import(
            &lookup,
            &IdentifierKind::LedgerId(EntityId::new(0, 0, 777)),
            ticket,
            &sequencer,
        )
        .await;

        match outcome {
            Some(ConfirmOutcome::Found { token, fee_warning }) => {
                assert_eq!(token.symbol, "HELI");
                assert_eq!(
                    token.address.as_deref(),
                    Some("0000000000000000000000000000000000000309")
                );
                assert!(!fee_warning);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_long_zero_address_looked_up_by_id() {
        let lookup = MockLookup::new().with_token("0.0.777", heli().with_fees(true));
        let sequencer = SearchSequencer::new();
        let ticket = sequencer.issue();
        let candidate = IdentifierKind::Address(
            "0x0000000000000000000000000000000000000309".to_string(),
        );

        let outcome = confirm_ledger_import(&lookup, &candidate, ticket, &sequencer).await;
        assert!(matches!(
            outcome,
            Some(ConfirmOutcome::Found { fee_warning: true, .. })
        ));
        assert_eq!(*lookup.calls.lock(), vec!["0.0.777".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_token_offers_contract_import() {
        let lookup = MockLookup::new();
        let sequencer = SearchSequencer::new();
        let ticket = sequencer.issue();

        let outcome = confirm_ledger_import(
            &lookup,
            &IdentifierKind::LedgerId(EntityId::new(0, 0, 42)),
            ticket,
            &sequencer,
        )
        .await;
        assert_eq!(
            outcome,
            Some(ConfirmOutcome::ImportAsContractToken {
                query: "0.0.42".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_transport_error_treated_as_not_found() {
        let mut lookup = MockLookup::new().with_token("0.0.777", heli());
        lookup.fail = true;
        let sequencer = SearchSequencer::new();
        let ticket = sequencer.issue();

        let outcome = confirm_ledger_import(
            &lookup,
            &IdentifierKind::LedgerId(EntityId::new(0, 0, 777)),
            ticket,
            &sequencer,
        )
        .await;
        assert!(matches!(
            outcome,
            Some(ConfirmOutcome::ImportAsContractToken { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_lookup_returns_none() {
        let mut lookup = MockLookup::new().with_token("0.0.777", heli());
        lookup.delay = Some(Duration::from_millis(500));
        let sequencer = SearchSequencer::new();
        let stale_ticket = sequencer.issue();
        let candidate = IdentifierKind::LedgerId(EntityId::new(0, 0, 777));

        let (stale, _) = tokio::join!(
            confirm_ledger_import(&lookup, &candidate, stale_ticket, &sequencer),
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                sequencer.issue();
            }
        );
        assert_eq!(stale, None);
    }

    #[test]
    fn test_contract_import_token_from_id() {
        let token = contract_import_token(" 0.0.1234 ", 18).unwrap();
        assert_eq!(token.symbol, "ERC20");
        assert_eq!(token.name, "Possible ERC20 Token");
        assert_eq!(token.kind, TokenKind::Erc20);
        assert_eq!(token.decimals, 18);
        assert_eq!(token.hedera_id.as_deref(), Some("0.0.1234"));
        assert_eq!(
            token.address.as_deref(),
            Some("00000000000000000000000000000000000004d2")
        );
    }

    #[test]
    fn test_contract_import_token_from_alias_address() {
        let token =
            contract_import_token("0x5FbDB2315678afecb367f032d93F642f64180aa3", 6).unwrap();
        assert_eq!(
            token.address.as_deref(),
            Some("5fbdb2315678afecb367f032d93f642f64180aa3")
        );
        assert_eq!(token.hedera_id, None);
    }

    #[test]
    fn test_contract_import_token_from_free_text() {
        let known = vec![Token::new("USDC", "USD Coin", 6, TokenKind::Hts).with_id("0.0.456858")];
        let SearchState::ImportableAsContractToken(text) =
            resolve_search("mystery", &known, None)
        else {
            panic!("expected free text to be importable as a contract token");
        };

        let token = contract_import_token(&text, 18).unwrap();
        assert_eq!(token.kind, TokenKind::Erc20);
        assert_eq!(token.decimals, 18);
        assert_eq!(token.hedera_id.as_deref(), Some("mystery"));
        assert_eq!(token.address, None);

        assert!(contract_import_token("   ", 18).is_err());
    }

    #[test]
    fn test_parse_import_decimals() {
        assert_eq!(parse_import_decimals("18").unwrap(), 18);
        assert_eq!(parse_import_decimals(" 6 ").unwrap(), 6);
        assert!(parse_import_decimals("0").is_err());
        assert!(parse_import_decimals("-3").is_err());
        assert!(parse_import_decimals("abc").is_err());
        assert!(parse_import_decimals("").is_err());
    }
}
