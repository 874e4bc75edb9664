//! locodb — Command-line interface for locodb-core
//!
//! Loads one or more boundary documents and UN/LOCODE code lists, builds the
//! gazetteer in memory and runs a single command against it.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ locodb -b boundaries.json.gz -r code-list.csv stats
//!
//! - Fuzzy search, restricted to one country
//!   $ locodb -b boundaries.json.gz -r code-list.csv query "Dentists in Abercorn" --state GB
//!
//! - Retrieve a location and its children
//!   $ locodb -b boundaries.json.gz get ISO-3166-2-gb:cay
//!   $ locodb -b boundaries.json.gz children ISO-3166-1-gb
//!
//! - Code lookups
//!   $ locodb -b boundaries.json.gz state gb
//!   $ locodb -b boundaries.json.gz subdiv gb cay
//!
//! Use `-v`/`-vv` or `RUST_LOG` for build and query diagnostics.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use locodb_core::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct QueryHit<'a> {
    key: &'a str,
    name: &'a str,
    score: i64,
    cost: u32,
    code: bool,
    start: usize,
    end: usize,
    matched: &'a str,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_location(view: &LocationView<'_>) {
    println!("Key: {}", view.key());
    println!("Name: {}", view.name());
    if view.names().len() > 1 {
        println!("Other names: {}", view.names()[1..].join(", "));
    }
    println!("Codes: {}", view.codes().join(", "));
    if let Some(parent) = view.subdiv().or_else(|| view.state()) {
        println!("Parent: {} ({})", parent.name(), parent.key());
    }
    if let Some(c) = view.coordinates() {
        println!("Coordinates: {:.4}, {:.4}", c.lat, c.lon);
    }
    if let Some(status) = view.status() {
        println!("Status: {status}");
    }
    if let Some(function) = view.function() {
        println!("Function: {function}");
    }
    println!("Children: {}", view.children().len());
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    if args.boundaries.is_empty() {
        bail!("at least one --boundaries document is required");
    }
    let db = Database::load_from_paths(&args.boundaries, &args.records, SearchConfig::default())
        .context("failed to build the gazetteer")?;

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Database statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Subdivisions: {}", stats.subdivisions);
            println!("  Locations: {}", stats.locations);
        }

        Commands::Query {
            text,
            state,
            limit,
            distance,
            json,
        } => {
            let hits = db.query(&text, limit, distance, state.as_deref())?;
            if json {
                let mut out = Vec::with_capacity(hits.len());
                for h in &hits {
                    let span = h.offset()?;
                    out.push(QueryHit {
                        key: h.key(),
                        name: h.name(),
                        score: h.score()?,
                        cost: h.cost(),
                        code: h.is_code_match(),
                        start: span.start,
                        end: span.end,
                        matched: h.matched_word(),
                    });
                }
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if hits.is_empty() {
                println!("No locations found in: {text}");
            } else {
                for h in &hits {
                    let span = h.offset()?;
                    println!(
                        "{:>5}  {} — {} [{}..{}]",
                        h.score()?,
                        h.key(),
                        h.name(),
                        span.start,
                        span.end
                    );
                }
            }
        }

        Commands::Get { key, json } => {
            let view = db.retrieve(&key)?;
            if json {
                println!("{}", serde_json::to_string_pretty(view.location())?);
            } else {
                print_location(&view);
            }
        }

        Commands::Children { key } => {
            let view = db.retrieve(&key)?;
            let children = view.children();
            if children.is_empty() {
                println!("{} has no children", view.key());
            }
            for c in children {
                println!("- {} ({})", c.name(), c.key());
            }
        }

        Commands::State { code } => {
            let key = db.get_state_key(&code)?;
            println!("{} — {}", key, db.get_state_name(&code)?);
        }

        Commands::Subdiv { state, code } => {
            let key = db.get_subdiv_key(&state, &code)?;
            println!("{} — {}", key, db.get_subdiv_name(&state, &code)?);
        }

        Commands::Code { code, state } => {
            let hits = db.find_by_code(&code, state.as_deref());
            if hits.is_empty() {
                eprintln!("No location carries code: {code}");
            }
            for h in hits {
                println!("{} — {}", h.key(), h.name());
            }
        }
    }

    Ok(())
}
