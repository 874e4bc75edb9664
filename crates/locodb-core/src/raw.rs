// crates/locodb-core/src/raw.rs

//! Raw loader input, as it comes out of JSON / CSV.
//!
//! These types mirror the external datasets and are only consumed by
//! [`StoreBuilder`](crate::store::StoreBuilder). They do no validation of
//! their own beyond what serde enforces.

use serde::Deserialize;
use std::collections::HashMap;

/// One administrative-boundary document: a list of countries.
pub type BoundaryDoc = Vec<CountryRaw>;

/// Raw country structure from JSON.
///
/// ```json
/// {
///   "code": "GB",
///   "alpha3": "GBR",
///   "name": "United Kingdom of Great Britain and Northern Ireland",
///   "short": "United Kingdom",
///   "translations": { "de": "Vereinigtes Königreich" },
///   "subdivisions": [ { "code": "CAY", "name": "Caerphilly" } ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRaw {
    /// ISO 3166-1 alpha-2 code.
    pub code: String,
    #[serde(default)]
    pub alpha3: Option<String>,
    pub name: String,
    #[serde(default)]
    pub short: Option<String>,
    /// Localized names keyed by language code.
    #[serde(default)]
    pub translations: HashMap<String, String>,
    #[serde(default)]
    pub subdivisions: Vec<SubdivisionRaw>,
    /// Places attached directly to the country.
    #[serde(default)]
    pub locations: Vec<PlaceRaw>,
}

/// Raw ISO 3166-2 subdivision.
#[derive(Debug, Clone, Deserialize)]
pub struct SubdivisionRaw {
    /// Local part of the ISO 3166-2 code (`CAY` for `GB-CAY`).
    pub code: String,
    pub name: String,
    /// Subdivision category, e.g. "unitary authority". Kept as the
    /// location's `function`.
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub translations: HashMap<String, String>,
    #[serde(default)]
    pub locations: Vec<PlaceRaw>,
}

/// A point location nested inside a boundary document.
///
/// `encoding` defaults to UN/LOCODE; any other value introduces a
/// source-defined namespace (e.g. `"IATA"`).
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceRaw {
    #[serde(default)]
    pub encoding: Option<String>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub codes: Vec<String>,
    /// Only meaningful for places listed directly under a country.
    #[serde(default)]
    pub subdivision: Option<String>,
    #[serde(default)]
    pub coordinates: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// One row of the UN/LOCODE code list.
///
/// Field names follow the normalized column mapping; the UN/LOCODE export
/// headers (`Country`, `Location`, `NameWoDiacritics`, ...) are accepted as
/// aliases so a raw export can be read directly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocodeRecord {
    #[serde(alias = "Country")]
    pub country: String,
    #[serde(alias = "Location")]
    pub subcode: String,
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "NameWoDiacritics")]
    pub name_wo_diacritics: String,
    #[serde(default, alias = "Subdivision")]
    pub subdivision_code: String,
    #[serde(default, alias = "Status")]
    pub status: String,
    #[serde(default, alias = "Function")]
    pub function: String,
    #[serde(default, alias = "Date")]
    pub date: String,
    #[serde(default, alias = "IATA")]
    pub iata_code: String,
    #[serde(default, alias = "Coordinates")]
    pub coordinates: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_defaults_optional_sections() {
        let raw: CountryRaw =
            serde_json::from_str(r#"{ "code": "GB", "name": "United Kingdom" }"#).unwrap();
        assert!(raw.subdivisions.is_empty());
        assert!(raw.locations.is_empty());
        assert!(raw.translations.is_empty());
        assert_eq!(raw.alpha3, None);
    }

    #[test]
    fn nested_document_parses() {
        let doc: BoundaryDoc = serde_json::from_str(
            r#"[{
                "code": "GB", "name": "United Kingdom",
                "subdivisions": [{
                    "code": "CAY", "name": "Caerphilly",
                    "locations": [{ "code": "ABC", "name": "Abercarn" }]
                }]
            }]"#,
        )
        .unwrap();
        assert_eq!(doc[0].subdivisions[0].locations[0].name, "Abercarn");
        assert_eq!(doc[0].subdivisions[0].locations[0].encoding, None);
    }

    #[test]
    fn locode_record_accepts_unlocode_headers() {
        let csv_text = "Country,Location,Name,NameWoDiacritics,Subdivision,Status,Function,Date,IATA,Coordinates\n\
                        GB,ABC,Abercarn,Abercarn,CAY,RL,--3-----,0701,,5139N 00308W\n";
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let rec: LocodeRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(rec.country, "GB");
        assert_eq!(rec.subcode, "ABC");
        assert_eq!(rec.subdivision_code, "CAY");
        assert_eq!(rec.coordinates.as_deref(), Some("5139N 00308W"));
    }
}
