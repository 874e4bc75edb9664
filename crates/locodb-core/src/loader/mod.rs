// crates/locodb-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, decompression) and hands typed raw
//! input to the store builder. JSON boundary documents go through
//! `serde_json`, UN/LOCODE code lists through `csv`.

use crate::error::Result;
use crate::raw::{BoundaryDoc, LocodeRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

mod common_io;

pub use common_io::open_stream;

/// Read one administrative-boundary document (`.json` or `.json.gz`).
pub fn read_boundaries(path: impl AsRef<Path>) -> Result<BoundaryDoc> {
    let path = path.as_ref();
    let doc = boundaries_from_reader(open_stream(path)?)?;
    info!(path = %path.display(), countries = doc.len(), "boundary document loaded");
    Ok(doc)
}

pub fn boundaries_from_reader<R: Read>(reader: R) -> Result<BoundaryDoc> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read one UN/LOCODE code list (`.csv` or `.csv.gz`).
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<LocodeRecord>> {
    let path = path.as_ref();
    let records = records_from_reader(open_stream(path)?)?;
    info!(path = %path.display(), records = records.len(), "code list loaded");
    Ok(records)
}

pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<LocodeRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut out = Vec::new();
    for row in rdr.deserialize() {
        out.push(row?);
    }
    debug!(rows = out.len(), "parsed code list");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LocoError;
    use std::io::Write;

    #[test]
    fn reads_records_with_normalized_headers() {
        let text = "country,subcode,name,name_wo_diacritics,subdivision_code,status,function,date,iata_code,coordinates\n\
                    GB,ABC,Abercarn,Abercarn,CAY,RL,--3-----,0701,,5139N 00308W\n";
        let records = records_from_reader(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Abercarn");
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = boundaries_from_reader("[{".as_bytes()).unwrap_err();
        assert!(matches!(err, LocoError::Json(_)));
    }

    #[test]
    fn missing_required_column_is_a_csv_error() {
        let err = records_from_reader("name\nAbercarn\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LocoError::Csv(_)));
    }

    #[cfg(feature = "compact")]
    #[test]
    fn reads_gzipped_boundaries() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boundaries.json.gz");
        let mut enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        enc.write_all(br#"[{ "code": "GB", "name": "United Kingdom" }]"#)
            .unwrap();
        enc.finish().unwrap();

        let doc = read_boundaries(&path).unwrap();
        assert_eq!(doc[0].code, "GB");
    }

    #[test]
    fn reads_plain_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{ "code": "FR", "name": "France" }]"#)
            .unwrap();
        let doc = read_boundaries(file.path()).unwrap();
        assert_eq!(doc[0].name, "France");
    }
}
