// crates/locodb-core/src/model.rs
use crate::error::{LocoError, Result};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// ISO 3166-1 country codes.
pub const ISO_3166_1: &str = "ISO-3166-1";
/// ISO 3166-2 subdivision codes.
pub const ISO_3166_2: &str = "ISO-3166-2";
/// UN/LOCODE trade and transport locations.
pub const UN_LOCODE: &str = "UN-LOCODE";

/// Arena index of a [`Location`] inside its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LocId(pub(crate) u32);

impl LocId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where a location sits in the country → subdivision → place forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    State,
    Subdivision,
    Place,
}

/// Decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Parse the UN/LOCODE `DDMM[NS] DDDMM[EW]` notation.
    ///
    /// ```rust
    /// use locodb_core::model::Coordinates;
    ///
    /// let c = Coordinates::parse_locode("5130N 00008W").unwrap();
    /// assert_eq!(c.lat, 51.5);
    /// assert!(c.lon < 0.0);
    /// ```
    pub fn parse_locode(raw: &str) -> Result<Self> {
        let bad = || LocoError::Build(format!("unparseable coordinates `{raw}`"));

        let mut parts = raw.split_whitespace();
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(bad());
        };

        let lat = parse_axis(lat, 2, 'N', 'S').ok_or_else(bad)?;
        let lon = parse_axis(lon, 3, 'E', 'W').ok_or_else(bad)?;
        if lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(bad());
        }
        Ok(Self { lat, lon })
    }
}

fn parse_axis(part: &str, deg_digits: usize, pos: char, neg: char) -> Option<f64> {
    let last = part.chars().last()?;
    let digits = &part[..part.len() - last.len_utf8()];
    let hemi = last.to_ascii_uppercase();
    if digits.len() != deg_digits + 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let degrees: f64 = digits[..deg_digits].parse().ok()?;
    let minutes: f64 = digits[deg_digits..].parse().ok()?;
    if minutes >= 60.0 {
        return None;
    }
    let value = degrees + minutes / 60.0;
    match hemi {
        h if h == pos => Some(value),
        h if h == neg => Some(-value),
        _ => None,
    }
}

/// A single gazetteer entry: country, subdivision or place.
///
/// Locations are created once by the store builder and never mutated.
/// Hierarchy links are arena indices; use
/// [`LocationView`](crate::store::LocationView) to follow them.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub(crate) key: String,
    pub(crate) encoding: String,
    pub(crate) id: String,
    pub(crate) names: Vec<String>,
    pub(crate) words: Vec<String>,
    pub(crate) codes: Vec<String>,
    pub(crate) state_code: Option<String>,
    pub(crate) subdiv_code: Option<String>,
    pub(crate) coordinates: Option<Coordinates>,
    pub(crate) status: Option<String>,
    pub(crate) function: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) level: Level,
    #[serde(skip)]
    pub(crate) state: Option<LocId>,
    #[serde(skip)]
    pub(crate) subdiv: Option<LocId>,
    #[serde(skip)]
    pub(crate) children: Vec<LocId>,
}

impl Location {
    /// `"<encoding>-<id>"`, unique across the store.
    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn encoding(&self) -> &str {
        &self.encoding
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    /// Primary name (first entry of [`names`](Self::names)).
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }
    pub fn names(&self) -> &[String] {
        &self.names
    }
    /// Normalized searchable phrases.
    pub fn words(&self) -> &[String] {
        &self.words
    }
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
    /// Two-letter country code; `None` for a country itself.
    pub fn state_code(&self) -> Option<&str> {
        self.state_code.as_deref()
    }
    pub fn subdiv_code(&self) -> Option<&str> {
        self.subdiv_code.as_deref()
    }
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
    pub fn level(&self) -> Level {
        self.level
    }

    /// Country code this location is filed under; a country files under its own.
    pub fn country_code(&self) -> &str {
        match &self.state_code {
            Some(cc) => cc,
            None => &self.id,
        }
    }

    /// Ordering used to break score ties.
    pub(crate) fn encoding_rank(&self) -> u8 {
        encoding_rank(&self.encoding)
    }
}

pub(crate) fn encoding_rank(encoding: &str) -> u8 {
    match encoding {
        ISO_3166_1 => 0,
        ISO_3166_2 => 1,
        UN_LOCODE => 2,
        _ => 3,
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.key)
    }
}

/// Match metadata shared by every location-like value.
///
/// Only query results carry a score and an offset; plain locations and views
/// answer with [`LocoError::FieldNotPresent`].
pub trait MatchInfo {
    /// Lower is better.
    fn score(&self) -> Result<i64> {
        Err(LocoError::FieldNotPresent("score"))
    }

    /// Character span of the match in the query text.
    fn offset(&self) -> Result<Range<usize>> {
        Err(LocoError::FieldNotPresent("offset"))
    }
}

impl MatchInfo for Location {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DbStats {
    pub countries: usize,
    pub subdivisions: usize,
    pub locations: usize,
}
