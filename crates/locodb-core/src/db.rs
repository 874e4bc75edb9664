// crates/locodb-core/src/db.rs
use crate::config::SearchConfig;
use crate::error::{LocoError, Result};
use crate::index::FuzzyIndex;
use crate::loader;
use crate::model::{DbStats, Level};
use crate::raw::{CountryRaw, LocodeRecord};
use crate::search::{QueryEngine, SearchResult};
use crate::store::{LocationStore, LocationView};
use crate::text::StopWords;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// The gazetteer: a merged location store plus its fuzzy index.
///
/// Built once, immutable afterwards, and safe to share between threads.
///
/// # Example
///
/// ```rust
/// use locodb_core::prelude::*;
///
/// let boundaries: Vec<CountryRaw> = serde_json::from_str(
///     r#"[{ "code": "GB", "name": "United Kingdom",
///           "subdivisions": [{ "code": "CAY", "name": "Caerphilly" }] }]"#,
/// )?;
/// let records = vec![LocodeRecord {
///     country: "GB".into(),
///     subcode: "ABC".into(),
///     name: "Abercarn".into(),
///     subdivision_code: "CAY".into(),
///     ..Default::default()
/// }];
///
/// let db = Database::build(&[boundaries], &[records])?;
/// let hits = db.query("Dentists in Abercorn", 5, 2, Some("GB"))?;
/// assert_eq!(hits[0].key(), "UN-LOCODE-gb:abc");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Database {
    store: LocationStore,
    index: FuzzyIndex,
    stop_words: StopWords,
    config: SearchConfig,
}

impl Database {
    /// Merge boundary documents and record lists, then index the result.
    pub fn build<B, R>(boundaries: &[B], records: &[R]) -> Result<Self>
    where
        B: AsRef<[CountryRaw]>,
        R: AsRef<[LocodeRecord]>,
    {
        Self::build_with_config(boundaries, records, SearchConfig::default())
    }

    /// Like [`build`](Self::build), with the defaults [`search_default`](Self::search_default) uses.
    pub fn build_with_config<B, R>(
        boundaries: &[B],
        records: &[R],
        config: SearchConfig,
    ) -> Result<Self>
    where
        B: AsRef<[CountryRaw]>,
        R: AsRef<[LocodeRecord]>,
    {
        let started = Instant::now();
        let store = LocationStore::build(boundaries, records)?;
        let index = FuzzyIndex::build(&store);
        let stop_words = StopWords::english();

        info!(
            locations = store.len(),
            terms = index.term_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "database built"
        );
        Ok(Self {
            store,
            index,
            stop_words,
            config,
        })
    }

    /// Read every file, then build.
    ///
    /// Files ending in `.gz` are decompressed on the fly.
    pub fn load_from_paths<P, Q>(
        boundary_paths: &[P],
        record_paths: &[Q],
        config: SearchConfig,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let boundaries = boundary_paths
            .iter()
            .map(loader::read_boundaries)
            .collect::<Result<Vec<_>>>()?;
        let records = record_paths
            .iter()
            .map(loader::read_records)
            .collect::<Result<Vec<_>>>()?;
        Self::build_with_config(&boundaries, &records, config)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.store, &self.index, &self.stop_words)
    }

    /// Fuzzy search with explicit limit and edit budget.
    pub fn query(
        &self,
        text: &str,
        limit: usize,
        max_edit_distance: u32,
        state: Option<&str>,
    ) -> Result<Vec<SearchResult<'_>>> {
        let config = SearchConfig {
            limit,
            max_edit_distance,
            ..self.config.clone()
        };
        self.search(text, &config, state)
    }

    pub fn search(
        &self,
        text: &str,
        config: &SearchConfig,
        state: Option<&str>,
    ) -> Result<Vec<SearchResult<'_>>> {
        self.engine().search(text, config, state)
    }

    /// Search with the database's own configuration.
    pub fn search_default(&self, text: &str, state: Option<&str>) -> Result<Vec<SearchResult<'_>>> {
        self.search(text, &self.config, state)
    }

    pub fn retrieve(&self, key: &str) -> Result<LocationView<'_>> {
        self.store.retrieve(key)
    }

    pub fn get_state_key(&self, state_code: &str) -> Result<&str> {
        self.store.get_state_key(state_code)
    }

    pub fn get_subdiv_key(&self, state_code: &str, subdiv_code: &str) -> Result<&str> {
        self.store.get_subdiv_key(state_code, subdiv_code)
    }

    pub fn get_state_name(&self, state_code: &str) -> Result<&str> {
        self.store.get_state_name(state_code)
    }

    pub fn get_subdiv_name(&self, state_code: &str, subdiv_code: &str) -> Result<&str> {
        self.store.get_subdiv_name(state_code, subdiv_code)
    }

    /// Country code of the location at `key` (its own code for a country).
    pub fn get_state_code(&self, key: &str) -> Result<&str> {
        self.retrieve(key).map(|v| v.location().country_code())
    }

    /// Subdivision code of the location at `key` (its own code for a
    /// subdivision).
    pub fn get_subdiv_code(&self, key: &str) -> Result<&str> {
        let loc = self.retrieve(key)?.location();
        let code = match loc.level() {
            Level::Subdivision => loc.id().split_once(':').map(|(_, local)| local),
            _ => loc.subdiv_code(),
        };
        code.ok_or_else(|| LocoError::NotFound(format!("`{key}` has no subdivision")))
    }

    /// Exact, case-insensitive code lookup, optionally within one country.
    pub fn find_by_code(&self, code: &str, state: Option<&str>) -> Vec<LocationView<'_>> {
        let mut hits = self.store.find_by_code(code);
        if let Some(cc) = state.map(str::trim) {
            hits.retain(|v| v.country_code().eq_ignore_ascii_case(cc));
        }
        hits
    }

    /// Countries in build order.
    pub fn countries(&self) -> Vec<LocationView<'_>> {
        self.store.roots().collect()
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            countries: self.store.count(Level::State),
            subdivisions: self.store.count(Level::Subdivision),
            locations: self.store.count(Level::Place),
        }
    }
}
