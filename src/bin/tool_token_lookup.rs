use clap::{Arg, Command};
use colored::Colorize;
use heliswap_core::config::{load_config_from_path, CONFIG_FILE_PATH};
use heliswap_core::logger::{self, LogTag};
use heliswap_core::session::Session;
use heliswap_core::tokens::{
    confirm_ledger_import, contract_import_token, parse_import_decimals, resolve_search,
    should_search_remote, ConfirmOutcome, Debouncer, SearchSequencer, SearchState, Token,
};

/// Token lookup tool
/// Classifies a search query against a known token list and, for unknown
/// identifiers, confirms the token through the mirror node

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = logger::init();

    let matches = Command::new("Token Lookup")
        .about("Resolves a token search query the way the token picker does")
        .arg(
            Arg::new("query")
                .long("query")
                .value_name("TEXT")
                .help("Symbol, name, ledger id (0.0.x) or address")
                .required(true),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .value_name("FILE")
                .help("JSON file with the known token list"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value(CONFIG_FILE_PATH),
        )
        .arg(
            Arg::new("decimals")
                .long("decimals")
                .value_name("N")
                .help("Decimals for a contract-token import (defaults to search.default_import_decimals)"),
        )
        .arg(
            Arg::new("account")
                .long("account")
                .value_name("ID")
                .help("Account id to check token association for"),
        )
        .get_matches_from(args);

    let query = matches
        .get_one::<String>("query")
        .ok_or("missing --query")?;
    let config_file = matches
        .get_one::<String>("config")
        .ok_or("missing --config")?;
    let config = load_config_from_path(config_file)?;

    let known_tokens: Vec<Token> = match matches.get_one::<String>("tokens") {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };
    let import_decimals = match matches.get_one::<String>("decimals") {
        Some(value) => parse_import_decimals(value)?,
        None => config.search.default_import_decimals,
    };

    let mut session = Session::new(config);
    if let Some(account) = matches.get_one::<String>("account") {
        session.connect(account)?;
    }

    // Same quiet period the token picker applies to typed input
    let (debouncer, mut settled) = Debouncer::from_config(&session.config().search);
    debouncer.push(query.clone());
    let query = settled.recv().await.ok_or("search input closed")?;
    drop(debouncer);

    if should_search_remote(&query, session.config().search.async_search_threshold) {
        logger::debug(LogTag::Search, &format!("'{}' qualifies for remote search", query));
    }

    let state = resolve_search(&query, &known_tokens, None);
    match state {
        SearchState::ShowAll(tokens) => {
            println!("{} ({} tokens)", "Empty query, showing all".bold(), tokens.len());
            print_tokens(&tokens);
        }
        SearchState::ExactMatch(token) => {
            println!("{}", "Exact match".green().bold());
            print_tokens(std::slice::from_ref(&token));
            report_association(&session, &token).await;
        }
        SearchState::PartialMatches(tokens) => {
            println!("{} ({})", "Matches".green().bold(), tokens.len());
            print_tokens(&tokens);
        }
        SearchState::ImportableAsLedgerToken(candidate) => {
            let sequencer = SearchSequencer::new();
            let ticket = sequencer.issue();
            match confirm_ledger_import(session.client(), &candidate, ticket, &sequencer).await {
                Some(ConfirmOutcome::Found { token, fee_warning }) => {
                    println!("{}", "Found on the ledger".green().bold());
                    print_tokens(std::slice::from_ref(&token));
                    if fee_warning {
                        println!("{}", "Token has fees!".yellow().bold());
                    }
                    report_association(&session, &token).await;
                }
                Some(ConfirmOutcome::ImportAsContractToken { query }) => {
                    print_contract_import(&query, import_decimals)?;
                }
                None => println!("{}", "Lookup superseded".dimmed()),
            }
        }
        SearchState::ImportableAsContractToken(text) => {
            println!("{} '{}' is not a known token", "No match:".yellow().bold(), text);
            print_contract_import(&text, import_decimals)?;
        }
        SearchState::NotImportable => {
            println!("{}", "Not importable".red().bold());
        }
    }

    Ok(())
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!(
            "  {:<10} {:<28} {:<16} {:<42} decimals={} type={}",
            token.symbol,
            token.name,
            token.hedera_id.as_deref().unwrap_or("-"),
            token.address.as_deref().unwrap_or("-"),
            token.decimals,
            token.kind
        );
    }
}

fn print_contract_import(query: &str, decimals: u8) -> Result<(), Box<dyn std::error::Error>> {
    let token = contract_import_token(query, decimals)?;
    println!("{} importable as a contract token:", query.yellow());
    print_tokens(std::slice::from_ref(&token));
    Ok(())
}

async fn report_association(session: &Session, token: &Token) {
    if !session.is_connected() {
        return;
    }
    match session.tokens_to_associate(std::slice::from_ref(token)).await {
        Ok(pending) if pending.is_empty() => {
            println!("  {}", "Account can receive this token".green())
        }
        Ok(_) => println!("  {}", "Account must associate this token first".yellow()),
        Err(e) => logger::warning(
            LogTag::Session,
            &format!("Association check failed: {}", e),
        ),
    }
}
