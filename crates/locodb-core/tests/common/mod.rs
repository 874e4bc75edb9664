use locodb_core::prelude::*;
use std::path::PathBuf;

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

#[allow(dead_code)]
pub fn fixture_db() -> Database {
    let dir = data_dir();
    Database::load_from_paths(
        &[dir.join("boundaries.json")],
        &[dir.join("code-list.csv")],
        SearchConfig::default(),
    )
    .expect("fixture should load")
}

#[allow(dead_code)]
pub fn keys(results: &[SearchResult<'_>]) -> Vec<String> {
    results.iter().map(|r| r.key().to_string()).collect()
}
