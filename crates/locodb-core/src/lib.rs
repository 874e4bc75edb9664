// crates/locodb-core/src/lib.rs

//! # locodb-core
//!
//! A fuzzy gazetteer over ISO 3166 countries and subdivisions and UN/LOCODE
//! locations.
//!
//! The pipeline is: [`loader`] reads raw boundary documents and code lists,
//! [`store`] merges them into one country → subdivision → place forest,
//! [`index`] builds an inverted token index over every searchable name, and
//! [`search`] aligns query tokens against indexed phrases with a bounded
//! Levenshtein budget. [`Database`] ties it together:
//!
//! ```no_run
//! use locodb_core::prelude::*;
//!
//! let db = Database::load_from_paths(
//!     &["data/boundaries.json.gz"],
//!     &["data/code-list.csv"],
//!     SearchConfig::default(),
//! )?;
//! for hit in db.query("Dentists in Abercarn", 5, 2, Some("GB"))? {
//!     println!("{} {:?} {:?}", hit.key(), hit.score()?, hit.offset()?);
//! }
//! # Ok::<(), LocoError>(())
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod raw;
pub mod search;
pub mod store;
pub mod text;

pub use crate::config::{SearchConfig, SearchConfigBuilder};
pub use crate::db::Database;
pub use crate::error::{LocoError, Result};
pub use crate::model::{DbStats, Location, MatchInfo, ISO_3166_1, ISO_3166_2, UN_LOCODE};
pub use crate::search::SearchResult;
pub use crate::store::LocationView;
pub use crate::text::{fold_key, normalize, StopWords};
