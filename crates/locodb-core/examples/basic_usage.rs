//! Basic usage example for locodb-rs
//!
//! This example demonstrates how to:
//! - Load boundary documents and a UN/LOCODE code list
//! - Run fuzzy queries and read match metadata
//! - Walk the country → subdivision → location hierarchy
//!
//! Run with: cargo run -p locodb-core --example basic_usage

use locodb_core::prelude::*;
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("=== LocoDB-RS Basic Usage Example ===\n");

    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data");
    let db = Database::load_from_paths(
        &[data.join("boundaries.json")],
        &[data.join("code-list.csv")],
        SearchConfig::default(),
    )?;

    let stats = db.stats();
    println!(
        "✓ Loaded {} countries, {} subdivisions, {} locations\n",
        stats.countries, stats.subdivisions, stats.locations
    );

    // Example 1: Fuzzy query
    println!("--- Example 1: Query with a typo ---");
    let text = "Dentists in Abercorn";
    for hit in db.query(text, 5, 2, Some("GB"))? {
        let span = hit.offset()?;
        let matched: String = text
            .chars()
            .skip(span.start)
            .take(span.end - span.start)
            .collect();
        println!(
            "{} [{}] score={} matched {:?}",
            hit.name(),
            hit.key(),
            hit.score()?,
            matched
        );
    }
    println!();

    // Example 2: Retrieve by key and walk up
    println!("--- Example 2: Retrieve and navigate ---");
    let abc = db.retrieve("UN-LOCODE-gb:abc")?;
    if let Some(subdiv) = abc.subdiv() {
        println!("{} is in {}", abc.name(), subdiv.name());
    }
    if let Some(state) = abc.state() {
        println!("{} is in {}", abc.name(), state.name());
    }
    println!();

    // Example 3: Walk down
    println!("--- Example 3: Children of each country ---");
    for country in db.countries() {
        println!("{} ({})", country.name(), country.id());
        for child in country.children() {
            println!("  - {} [{}]", child.name(), child.key());
        }
    }
    println!();

    // Example 4: Code lookups
    println!("--- Example 4: Code lookups ---");
    println!("GB -> {}", db.get_state_key("GB")?);
    println!("GB-CAY -> {}", db.get_subdiv_name("GB", "CAY")?);
    for loc in db.find_by_code("CWL", None) {
        println!("CWL -> {}", loc.key());
    }

    Ok(())
}
