/// Token search classification
///
/// Turns the text typed into the token picker into exactly one `SearchState`.
/// Classification is pure; confirming an import candidate against the network
/// is a separate step (see `tokens::lookup`).
use super::ids::{classify_identifier, IdentifierKind};
use super::types::Token;
use crate::logger::{self, LogTag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Empty query: show the full known list
    ShowAll(Vec<Token>),
    /// Identifier query matching a known token
    ExactMatch(Token),
    /// Text query matching one or more known tokens by symbol or name
    PartialMatches(Vec<Token>),
    /// Unknown identifier eligible for a network lookup
    ImportableAsLedgerToken(IdentifierKind),
    /// Unknown free text eligible for manual contract-token import
    ImportableAsContractToken(String),
    /// Nothing matched and nothing can be imported
    NotImportable,
}

impl SearchState {
    /// Tokens to display for this state
    pub fn tokens(&self) -> Vec<Token> {
        match self {
            SearchState::ShowAll(tokens) | SearchState::PartialMatches(tokens) => tokens.clone(),
            SearchState::ExactMatch(token) => vec![token.clone()],
            _ => Vec::new(),
        }
    }

    pub fn has_results(&self) -> bool {
        match self {
            SearchState::ShowAll(tokens) | SearchState::PartialMatches(tokens) => {
                !tokens.is_empty()
            }
            SearchState::ExactMatch(_) => true,
            _ => false,
        }
    }

    pub fn is_importable(&self) -> bool {
        matches!(
            self,
            SearchState::ImportableAsLedgerToken(_) | SearchState::ImportableAsContractToken(_)
        )
    }
}

/// Classify a query against the known token list
///
/// Priority order, first match wins:
/// 1. empty query shows the full list
/// 2. identifier-shaped queries (ledger id or address) match exactly on id or address
/// 3. other queries match case-insensitively on symbol or name
/// 4. unmatched identifiers are importable as ledger tokens unless they name `excluded`
/// 5. unmatched free text is importable as a contract token
pub fn resolve_search(query: &str, known_tokens: &[Token], excluded: Option<&Token>) -> SearchState {
    let query = query.trim();
    if query.is_empty() {
        return SearchState::ShowAll(known_tokens.to_vec());
    }

    let identifier = classify_identifier(query);

    if identifier.is_some() {
        if let Some(token) = known_tokens.iter().find(|t| t.matches_identifier(query)) {
            logger::debug(
                LogTag::Search,
                &format!("'{}' matched known token {}", query, token.symbol),
            );
            return SearchState::ExactMatch(token.clone());
        }
    } else {
        let needle = query.to_lowercase();
        let matches: Vec<Token> = known_tokens
            .iter()
            .filter(|t| {
                t.symbol.to_lowercase().contains(&needle) || t.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        if !matches.is_empty() {
            logger::debug(
                LogTag::Search,
                &format!("'{}' matched {} known tokens", query, matches.len()),
            );
            return SearchState::PartialMatches(matches);
        }
    }

    match identifier {
        Some(kind) => {
            let is_excluded = excluded.map_or(false, |t| t.matches_identifier(query));
            if is_excluded {
                logger::debug(
                    LogTag::Search,
                    &format!("'{}' names the token selected in the paired field", query),
                );
                SearchState::NotImportable
            } else {
                SearchState::ImportableAsLedgerToken(kind)
            }
        }
        None => SearchState::ImportableAsContractToken(query.to_string()),
    }
}

/// Whether a query is long enough to show a pending remote-search indicator
pub fn should_search_remote(query: &str, threshold: usize) -> bool {
    query.trim().chars().count() > threshold
}
