//! Error handling example for locodb-rs
//!
//! This example demonstrates how each error variant surfaces.
//!
//! Run with: cargo run -p locodb-core --example error_handling

use locodb_core::prelude::*;
use std::path::PathBuf;

fn main() {
    println!("=== LocoDB-RS Error Handling Example ===\n");

    // Example 1: Missing dataset
    println!("--- Example 1: Loading from a missing path ---");
    match Database::load_from_paths(
        &["/nonexistent/boundaries.json"],
        &[] as &[&str],
        SearchConfig::default(),
    ) {
        Ok(_) => println!("✗ Unexpected success"),
        Err(e) => println!("✓ Expected error: {e}"),
    }
    println!();

    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data");
    let db = match Database::load_from_paths(
        &[data.join("boundaries.json")],
        &[data.join("code-list.csv")],
        SearchConfig::default(),
    ) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("✗ Fixture failed to load: {e}");
            return;
        }
    };

    // Example 2: Unknown key
    println!("--- Example 2: Unknown key ---");
    match db.retrieve("UN-LOCODE-gb:zzz") {
        Ok(loc) => println!("✗ Unexpected hit: {}", loc.key()),
        Err(LocoError::NotFound(what)) => println!("✓ Not found: {what}"),
        Err(e) => println!("✗ Other error: {e}"),
    }
    println!();

    // Example 3: Invalid search arguments
    println!("--- Example 3: Invalid arguments ---");
    match db.query("Abercarn", 0, 2, None) {
        Err(LocoError::InvalidArgument(msg)) => println!("✓ Rejected: {msg}"),
        other => println!("✗ Unexpected: {other:?}"),
    }
    println!();

    // Example 4: Match metadata on a plain location
    println!("--- Example 4: Score on a retrieved location ---");
    if let Ok(loc) = db.retrieve("ISO-3166-1-gb") {
        match loc.score() {
            Ok(score) => println!("✗ Unexpected score {score}"),
            Err(e) => println!("✓ {e}"),
        }
    }
}
