use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for locodb
#[derive(Debug, Parser)]
#[command(
    name = "locodb",
    version,
    about = "CLI for querying and inspecting the locodb-core gazetteer"
)]
pub struct CliArgs {
    /// Administrative-boundary JSON document (.json or .json.gz); repeatable
    #[arg(short = 'b', long = "boundaries", global = true)]
    pub boundaries: Vec<PathBuf>,

    /// UN/LOCODE code list CSV (.csv or .csv.gz); repeatable
    #[arg(short = 'r', long = "records", global = true)]
    pub records: Vec<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the database contents
    Stats,

    /// Fuzzy search for locations mentioned in free text
    Query {
        /// Text to search, e.g. "Dentists in Abercarn"
        text: String,

        /// Restrict results to one country (ISO2, case-insensitive)
        #[arg(short = 's', long = "state")]
        state: Option<String>,

        /// Maximum number of results
        #[arg(short = 'l', long = "limit", default_value_t = 10)]
        limit: usize,

        /// Maximum edit distance per token
        #[arg(short = 'd', long = "distance", default_value_t = 2)]
        distance: u32,

        /// Print results as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Show one location by key (e.g. UN-LOCODE-gb:abc)
    Get {
        key: String,

        /// Print the location as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// List the locations directly owned by a key
    Children { key: String },

    /// Lookup a country by ISO2 code
    State { code: String },

    /// Lookup a subdivision by country and subdivision code
    Subdiv { state: String, code: String },

    /// Find locations carrying a code (ISO2/ISO3, UN/LOCODE subcode, IATA)
    Code {
        code: String,

        #[arg(short = 's', long = "state")]
        state: Option<String>,
    },
}
