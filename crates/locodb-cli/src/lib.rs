//! locodb-cli
//! ==========
//!
//! Command-line interface for the `locodb-core` gazetteer.
//!
//! This crate primarily provides a binary (`locodb`). The library target only
//! exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install locodb-cli
//! locodb --help
//! locodb -b boundaries.json.gz -r code-list.csv stats
//! locodb -b boundaries.json.gz -r code-list.csv query "Dentists in Abercarn" --state GB
//! ```
//!
//! For programmatic access use the `locodb-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
