mod common;

use common::data_dir;
use locodb_core::loader::{read_boundaries, read_records};
use locodb_core::prelude::*;
use std::io::Write;

#[test]
fn fixture_files_parse() {
    let doc = read_boundaries(data_dir().join("boundaries.json")).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc[0].subdivisions.len(), 3);

    let records = read_records(data_dir().join("code-list.csv")).unwrap();
    assert_eq!(records.len(), 9);
    assert_eq!(records[1].subcode, "ABC");
}

#[test]
fn conflicting_sources_fail_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let extra = dir.path().join("extra.csv");
    let mut file = std::fs::File::create(&extra).unwrap();
    writeln!(file, "country,subcode,name,subdivision_code").unwrap();
    writeln!(file, "GB,ABC,Abercarn,NWP").unwrap();

    let err = Database::load_from_paths(
        &[data_dir().join("boundaries.json")],
        &[data_dir().join("code-list.csv"), extra],
        SearchConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LocoError::Build(_)), "{err}");
}

#[test]
fn later_sources_add_names() {
    let dir = tempfile::tempdir().unwrap();
    let extra = dir.path().join("extra.csv");
    let mut file = std::fs::File::create(&extra).unwrap();
    writeln!(file, "country,subcode,name,subdivision_code").unwrap();
    writeln!(file, "GB,ABC,Aber-carn,").unwrap();

    let db = Database::load_from_paths(
        &[data_dir().join("boundaries.json")],
        &[data_dir().join("code-list.csv"), extra],
        SearchConfig::default(),
    )
    .unwrap();
    let abc = db.retrieve("UN-LOCODE-gb:abc").unwrap();
    assert_eq!(abc.names(), ["Abercarn", "Aber-carn"]);
    assert_eq!(abc.words(), ["abercarn", "aber carn"]);
    assert_eq!(abc.subdiv_code(), Some("cay"));
}

#[test]
fn bad_coordinates_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let extra = dir.path().join("extra.csv");
    let mut file = std::fs::File::create(&extra).unwrap();
    writeln!(file, "country,subcode,name,coordinates").unwrap();
    writeln!(file, "GB,XYZ,Somewhere,north-ish").unwrap();
    writeln!(file, "GB,XYY,Elsewhere,5139N 00308W").unwrap();

    let db = Database::load_from_paths(
        &[data_dir().join("boundaries.json")],
        &[extra],
        SearchConfig::default(),
    )
    .unwrap();
    assert_eq!(db.retrieve("UN-LOCODE-gb:xyz").unwrap().coordinates(), None);
    assert!(db.retrieve("UN-LOCODE-gb:xyy").unwrap().coordinates().is_some());
}

#[test]
fn missing_files_are_reported() {
    let err = Database::load_from_paths(
        &[data_dir().join("nope.json")],
        &[] as &[std::path::PathBuf],
        SearchConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LocoError::NotFound(_)));
}
