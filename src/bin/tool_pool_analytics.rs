use clap::{Arg, Command};
use colored::Colorize;
use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, ContentArrangement, Table};
use heliswap_core::amounts::format_fiat;
use heliswap_core::config::{load_config_from_path, CONFIG_FILE_PATH};
use heliswap_core::logger::{self, LogTag};
use heliswap_core::pools::{
    build_token_overview, compute_pools_analytics, compute_token_valuations, Pool, ReferencePrice,
};
use heliswap_core::tokens::Token;
use std::path::Path;

/// Pool analytics tool
/// Reads a pool snapshot (JSON) and a reference price, then prints pool totals
/// and per-token valuations

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = logger::init();

    let matches = Command::new("Pool Analytics")
        .about("Computes token prices, per-token TVL and pool totals from a pool snapshot")
        .arg(
            Arg::new("pools")
                .long("pools")
                .value_name("FILE")
                .help("JSON file with an array of pools")
                .required(true),
        )
        .arg(
            Arg::new("price")
                .long("price")
                .value_name("FIAT")
                .help("Fiat price of the native asset")
                .required(true),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .value_name("FILE")
                .help("JSON file with the known token list (prints the token overview)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value(CONFIG_FILE_PATH),
        )
        .get_matches_from(args);

    let pools_file = matches
        .get_one::<String>("pools")
        .ok_or("missing --pools")?;
    let price: f64 = matches
        .get_one::<String>("price")
        .ok_or("missing --price")?
        .parse()?;
    let config_file = matches
        .get_one::<String>("config")
        .ok_or("missing --config")?;

    let config = load_config_from_path(config_file)?;
    let decimals = config.pricing.display_decimals;

    let reference = ReferencePrice::new(price)
        .ok_or_else(|| format!("Reference price must be positive and finite, got {}", price))?;

    let pools = load_pools(pools_file)?;
    logger::info(
        LogTag::Pools,
        &format!("Loaded {} valid pools from {}", pools.len(), pools_file),
    );

    let totals = compute_pools_analytics(&pools);
    println!("\n{}", "Pool totals".bold());
    println!("  TVL:         ${}", format_fiat(totals.tvl, decimals));
    println!("  Volume 24h:  ${}", format_fiat(totals.volume_24h, decimals));
    println!("  Volume 7d:   ${}", format_fiat(totals.volume_7d, decimals));

    match matches.get_one::<String>("tokens") {
        Some(tokens_file) => {
            let tokens: Vec<Token> = serde_json::from_str(&std::fs::read_to_string(tokens_file)?)?;
            match build_token_overview(&tokens, &pools, &reference) {
                Some(rows) => print_overview(&rows, decimals),
                None => println!("\n{}", "No tokens or pools to show".yellow()),
            }
        }
        None => print_valuations(&pools, &reference, decimals),
    }

    Ok(())
}

/// Load pools, dropping the ones that break pool invariants
fn load_pools(path: &str) -> Result<Vec<Pool>, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Pools file not found: {}", path).into());
    }

    let pools: Vec<Pool> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    Ok(pools
        .into_iter()
        .filter(|pool| match pool.validate() {
            Ok(()) => true,
            Err(e) => {
                logger::warning(LogTag::Pools, &format!("Skipping pool: {}", e));
                false
            }
        })
        .collect())
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn fiat_cell(value: Option<f64>, decimals: usize) -> Cell {
    let cell = match value {
        Some(v) => Cell::new(format!("${}", format_fiat(v, decimals))),
        None => Cell::new("unresolved").fg(comfy_table::Color::DarkGrey),
    };
    cell.set_alignment(CellAlignment::Right)
}

fn print_valuations(pools: &[Pool], reference: &ReferencePrice, decimals: usize) {
    let valuations = compute_token_valuations(pools, reference);
    let symbols: std::collections::HashMap<String, String> = pools
        .iter()
        .flat_map(|p| [&p.token0, &p.token1])
        .map(|t| (t.key(), t.symbol.clone()))
        .collect();

    let mut rows: Vec<_> = valuations.iter().collect();
    rows.sort_by(|a, b| {
        let va = a.1.value_f64().unwrap_or(-1.0);
        let vb = b.1.value_f64().unwrap_or(-1.0);
        vb.partial_cmp(&va).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut table = new_table(&["Token", "Price", "Locked", "TVL", "Pools"]);
    for (key, valuation) in rows {
        table.add_row(vec![
            Cell::new(symbols.get(key).map(String::as_str).unwrap_or(key.as_str())),
            fiat_cell(valuation.unit_price_f64(), decimals.max(6)),
            Cell::new(valuation.locked_amount.normalized().to_string())
                .set_alignment(CellAlignment::Right),
            fiat_cell(valuation.value_f64(), decimals),
            Cell::new(valuation.pool_count).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("\n{}", "Token valuations".bold());
    println!("{}", table);
}

fn print_overview(rows: &[heliswap_core::pools::TokenOverview], decimals: usize) {
    let mut table = new_table(&["Token", "Name", "Price", "TVL", "Pools"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.token.symbol),
            Cell::new(&row.token.name),
            fiat_cell(row.price, decimals.max(6)),
            fiat_cell(row.tvl, decimals),
            Cell::new(row.pool_count).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("\n{}", "Token overview".bold());
    println!("{}", table);
}
