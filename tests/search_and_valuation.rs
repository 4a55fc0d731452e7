use async_trait::async_trait;
use heliswap_core::errors::ApiError;
use heliswap_core::pools::{
    build_token_overview, compute_pools_analytics, compute_token_valuations, Pool, ReferencePrice,
};
use heliswap_core::tokens::{
    confirm_ledger_import, resolve_search, ConfirmOutcome, Debouncer, IdentifierKind,
    SearchSequencer, SearchState, Token, TokenInfoLookup, TokenKind,
};
use std::time::Duration;

const POOLS_JSON: &str = r#"[
    {
        "token0": {"hederaId": "0.0.100", "symbol": "A", "name": "Token A", "decimals": 8, "type": "HTS"},
        "token1": {"hederaId": "0.0.1062664", "symbol": "WHBAR", "name": "Wrapped HBAR", "decimals": 8, "type": "NATIVE"},
        "token0Amount": "1000",
        "token1Amount": "5000000000",
        "pairName": "A/WHBAR",
        "tvl": "10",
        "volume24h": "2.5",
        "volume7d": "17.5"
    },
    {
        "token0": {"hederaId": "0.0.200", "symbol": "B", "name": "Token B", "decimals": 6, "type": "HTS"},
        "token1": {"hederaId": "0.0.100", "symbol": "A", "name": "Token A", "decimals": 8, "type": "HTS"},
        "token0Amount": "2000000",
        "token1Amount": "1000",
        "pairName": "B/A",
        "tvl": "10",
        "volume24h": "0",
        "volume7d": "1"
    }
]"#;

struct StaticLookup;

#[async_trait]
impl TokenInfoLookup for StaticLookup {
    async fn token_info(&self, id: &str) -> Result<Option<Token>, ApiError> {
        tokio::time::sleep(Duration::from_millis(300)).await;
        if id == "0.0.4242" {
            Ok(Some(
                Token::new("NEW", "New Token", 8, TokenKind::Hts).with_id("0.0.4242"),
            ))
        } else {
            Ok(None)
        }
    }
}

#[test]
fn test_pool_snapshot_valuation() {
    let pools: Vec<Pool> = serde_json::from_str(POOLS_JSON).unwrap();
    assert!(pools.iter().all(|p| p.validate().is_ok()));
    let reference = ReferencePrice::new(0.10).unwrap();

    let valuations = compute_token_valuations(&pools, &reference);
    assert_eq!(valuations.len(), 3);
    assert_eq!(valuations["0.0.100"].unit_price_f64(), Some(500000.0));
    // 0.00002 A locked over two pools
    assert_eq!(valuations["0.0.100"].value_f64(), Some(10.0));
    assert_eq!(valuations["0.0.100"].pool_count, 2);
    // 2 B against 0.00001 A: 2.5 each, 5.0 in total
    assert_eq!(valuations["0.0.200"].value_f64(), Some(5.0));

    let totals = compute_pools_analytics(&pools);
    assert_eq!(totals.tvl, 20.0);
    assert_eq!(totals.volume_24h, 2.5);
    assert_eq!(totals.volume_7d, 18.5);

    let tokens: Vec<Token> = vec![pools[0].token1.clone(), pools[1].token0.clone()];
    let overview = build_token_overview(&tokens, &pools, &reference).unwrap();
    assert_eq!(overview[0].price, Some(0.1));
    assert_eq!(overview[1].tvl, Some(5.0));
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_confirms_latest_query_only() {
    let known = vec![Token::new("USDC", "USD Coin", 6, TokenKind::Hts).with_id("0.0.456858")];
    let (debouncer, mut queries) = Debouncer::spawn(Duration::from_millis(1000));
    for text in ["0", "0.0", "0.0.4", "0.0.42", "0.0.4242"] {
        debouncer.push(text.to_string());
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let query = queries.recv().await.unwrap();
    assert_eq!(query, "0.0.4242");

    let state = resolve_search(&query, &known, None);
    let SearchState::ImportableAsLedgerToken(candidate) = state else {
        panic!("expected an importable ledger id");
    };

    let sequencer = SearchSequencer::new();
    let ticket = sequencer.issue();
    let outcome = confirm_ledger_import(&StaticLookup, &candidate, ticket, &sequencer).await;
    assert!(matches!(
        outcome,
        Some(ConfirmOutcome::Found { ref token, fee_warning: false }) if token.symbol == "NEW"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_newer_search_wins_over_slow_response() {
    let sequencer = SearchSequencer::new();
    let old = IdentifierKind::Address("0x5fbdb2315678afecb367f032d93f642f64180aa3".to_string());
    let new = resolve_search("0.0.4242", &[], None);
    let SearchState::ImportableAsLedgerToken(new) = new else {
        panic!("expected an importable ledger id");
    };

    let old_ticket = sequencer.issue();
    let old_lookup = confirm_ledger_import(&StaticLookup, &old, old_ticket, &sequencer);
    let new_ticket = sequencer.issue();
    let new_lookup = confirm_ledger_import(&StaticLookup, &new, new_ticket, &sequencer);

    let (old_outcome, new_outcome) = tokio::join!(old_lookup, new_lookup);
    assert_eq!(old_outcome, None);
    assert!(matches!(new_outcome, Some(ConfirmOutcome::Found { .. })));
}
