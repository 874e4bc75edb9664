// crates/locodb-core/src/store.rs

//! The merged location hierarchy.
//!
//! [`StoreBuilder`] folds boundary documents and flat record lists into a
//! list of drafts keyed by geographic identity, then [`StoreBuilder::finish`]
//! freezes them into a [`LocationStore`] arena. Hierarchy links are
//! [`LocId`]s into that arena; [`LocationView`] follows them.

use crate::error::{LocoError, Result};
use crate::model::{
    Coordinates, LocId, Level, Location, MatchInfo, ISO_3166_1, ISO_3166_2, UN_LOCODE,
};
use crate::raw::{CountryRaw, LocodeRecord, PlaceRaw, SubdivisionRaw};
use crate::text::normalize_phrase;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use tracing::{debug, warn};

/// `(encoding, state_code, local_code)`, all lowercase except the encoding.
type Identity = (String, String, String);

#[derive(Debug)]
struct Draft {
    encoding: String,
    state_code: String,
    local: String,
    level: Level,
    names: Vec<String>,
    codes: Vec<String>,
    subdiv_code: Option<String>,
    coordinates: Option<Coordinates>,
    status: Option<String>,
    function: Option<String>,
    date: Option<String>,
    state: Option<usize>,
    subdiv: Option<usize>,
}

impl Draft {
    fn id(&self) -> String {
        match self.level {
            Level::State => self.local.clone(),
            _ => format!("{}:{}", self.state_code, self.local),
        }
    }
}

/// Incoming data for one identity, before it is merged into a draft.
struct Incoming {
    names: Vec<String>,
    codes: Vec<String>,
    subdiv: Option<(String, usize)>,
    coordinates: Option<Coordinates>,
    status: Option<String>,
    function: Option<String>,
    date: Option<String>,
}

/// Accumulates sources and merges entries that describe the same place.
///
/// Sources are merged in call order. [`LocationStore::build`] applies them in
/// the canonical order: every boundary document, then every record list.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    drafts: Vec<Draft>,
    identity: HashMap<Identity, usize>,
    skipped: usize,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one administrative-boundary document.
    pub fn add_boundaries(&mut self, doc: &[CountryRaw]) -> Result<()> {
        for country in doc {
            self.add_country(country)?;
        }
        Ok(())
    }

    /// Merge one flat UN/LOCODE record list.
    ///
    /// Rows without a location code (the per-country header rows of the
    /// UN/LOCODE export) and rows for countries no boundary document defined
    /// are skipped.
    pub fn add_records(&mut self, records: &[LocodeRecord]) -> Result<()> {
        for rec in records {
            let cc = rec.country.trim().to_lowercase();
            let code = rec.subcode.trim().to_lowercase();
            if cc.is_empty() || code.is_empty() {
                debug!(country = %rec.country, name = %rec.name, "skipping header row");
                self.skipped += 1;
                continue;
            }
            let Some(state) = self.state_index(&cc) else {
                warn!(country = %cc, code = %code, "record for unknown country skipped");
                self.skipped += 1;
                continue;
            };

            let subdiv = self.resolve_subdiv(&cc, &rec.subdivision_code);
            let mut names = Vec::new();
            push_non_empty(&mut names, &rec.name);
            push_non_empty(&mut names, &rec.name_wo_diacritics);
            if names.is_empty() {
                warn!(country = %cc, code = %code, "record without a name skipped");
                self.skipped += 1;
                continue;
            }

            let mut codes = vec![code.clone()];
            push_non_empty(&mut codes, &rec.iata_code.to_lowercase());

            let coordinates = parse_coordinates(rec.coordinates.as_deref(), &cc, &code);

            self.merge(
                (UN_LOCODE.to_string(), cc, code),
                Level::Place,
                Some(state),
                Incoming {
                    names,
                    codes,
                    subdiv,
                    coordinates,
                    status: non_empty(&rec.status),
                    function: non_empty(&rec.function),
                    date: non_empty(&rec.date),
                },
            )?;
        }
        Ok(())
    }

    fn add_country(&mut self, raw: &CountryRaw) -> Result<()> {
        let cc = raw.code.trim().to_lowercase();
        if cc.is_empty() {
            return Err(LocoError::Build(format!(
                "country `{}` has no code",
                raw.name
            )));
        }

        let mut names = vec![raw.name.clone()];
        if let Some(short) = &raw.short {
            push_non_empty(&mut names, short);
        }
        extend_translations(&mut names, &raw.translations);

        let mut codes = vec![cc.clone()];
        if let Some(alpha3) = &raw.alpha3 {
            push_non_empty(&mut codes, &alpha3.to_lowercase());
        }

        let state = self.merge(
            (ISO_3166_1.to_string(), String::new(), cc.clone()),
            Level::State,
            None,
            Incoming::named(names, codes),
        )?;

        for sub in &raw.subdivisions {
            self.add_subdivision(&cc, state, sub)?;
        }
        for place in &raw.locations {
            let subdiv = place
                .subdivision
                .as_deref()
                .and_then(|sd| self.resolve_subdiv(&cc, sd));
            self.add_place(&cc, state, subdiv, place)?;
        }
        Ok(())
    }

    fn add_subdivision(&mut self, cc: &str, state: usize, raw: &SubdivisionRaw) -> Result<()> {
        let sd = raw.code.trim().to_lowercase();
        if sd.is_empty() {
            return Err(LocoError::Build(format!(
                "subdivision `{}` in `{cc}` has no code",
                raw.name
            )));
        }

        let mut names = vec![raw.name.clone()];
        extend_translations(&mut names, &raw.translations);

        let mut incoming = Incoming::named(names, vec![sd.clone()]);
        incoming.function = raw.level.clone();
        let idx = self.merge(
            (ISO_3166_2.to_string(), cc.to_string(), sd.clone()),
            Level::Subdivision,
            Some(state),
            incoming,
        )?;

        for place in &raw.locations {
            self.add_place(cc, state, Some((sd.clone(), idx)), place)?;
        }
        Ok(())
    }

    fn add_place(
        &mut self,
        cc: &str,
        state: usize,
        subdiv: Option<(String, usize)>,
        raw: &PlaceRaw,
    ) -> Result<()> {
        let code = raw.code.trim().to_lowercase();
        if code.is_empty() {
            return Err(LocoError::Build(format!(
                "place `{}` in `{cc}` has no code",
                raw.name
            )));
        }
        let encoding = match raw.encoding.as_deref().map(str::trim) {
            Some(enc) if !enc.is_empty() => enc.to_string(),
            _ => UN_LOCODE.to_string(),
        };

        let mut names = vec![raw.name.clone()];
        for alias in &raw.aliases {
            push_non_empty(&mut names, alias);
        }
        let mut codes = vec![code.clone()];
        for c in &raw.codes {
            push_non_empty(&mut codes, &c.to_lowercase());
        }
        let coordinates = parse_coordinates(raw.coordinates.as_deref(), cc, &code);

        self.merge(
            (encoding, cc.to_string(), code),
            Level::Place,
            Some(state),
            Incoming {
                names,
                codes,
                subdiv,
                coordinates,
                status: raw.status.clone(),
                function: raw.function.clone(),
                date: raw.date.clone(),
            },
        )?;
        Ok(())
    }

    fn state_index(&self, cc: &str) -> Option<usize> {
        self.identity
            .get(&(ISO_3166_1.to_string(), String::new(), cc.to_string()))
            .copied()
    }

    /// Known subdivision for `(cc, sd)`; unknown codes fall back to the country.
    fn resolve_subdiv(&self, cc: &str, sd: &str) -> Option<(String, usize)> {
        let sd = sd.trim().to_lowercase();
        if sd.is_empty() {
            return None;
        }
        let key = (ISO_3166_2.to_string(), cc.to_string(), sd.clone());
        match self.identity.get(&key) {
            Some(&idx) => Some((sd, idx)),
            None => {
                debug!(country = %cc, subdivision = %sd, "unknown subdivision, attaching to country");
                None
            }
        }
    }

    fn merge(
        &mut self,
        identity: Identity,
        level: Level,
        state: Option<usize>,
        incoming: Incoming,
    ) -> Result<usize> {
        if let Some(&idx) = self.identity.get(&identity) {
            let draft = &mut self.drafts[idx];
            if let Some((new, sub_idx)) = incoming.subdiv {
                if let Some(have) = draft.subdiv_code.as_deref() {
                    if have != new {
                        return Err(LocoError::Build(format!(
                            "`{}-{}` is filed under subdivision `{have}` and `{new}`",
                            draft.encoding,
                            draft.id()
                        )));
                    }
                } else {
                    draft.subdiv_code = Some(new);
                    draft.subdiv = Some(sub_idx);
                }
            }
            union_into(&mut draft.names, incoming.names);
            union_into(&mut draft.codes, incoming.codes);
            draft.coordinates = draft.coordinates.or(incoming.coordinates);
            fill(&mut draft.status, incoming.status);
            fill(&mut draft.function, incoming.function);
            fill(&mut draft.date, incoming.date);
            return Ok(idx);
        }

        let (encoding, state_code, local) = identity.clone();
        let (subdiv_code, subdiv) = match incoming.subdiv {
            Some((code, idx)) => (Some(code), Some(idx)),
            None => (None, None),
        };
        let mut names = Vec::with_capacity(incoming.names.len());
        union_into(&mut names, incoming.names);
        let mut codes = Vec::with_capacity(incoming.codes.len());
        union_into(&mut codes, incoming.codes);

        let idx = self.drafts.len();
        self.drafts.push(Draft {
            encoding,
            state_code,
            local,
            level,
            names,
            codes,
            subdiv_code,
            coordinates: incoming.coordinates,
            status: incoming.status,
            function: incoming.function,
            date: incoming.date,
            state,
            subdiv,
        });
        self.identity.insert(identity, idx);
        Ok(idx)
    }

    /// Freeze the drafts into an immutable store.
    pub fn finish(self) -> Result<LocationStore> {
        let count = u32::try_from(self.drafts.len())
            .map_err(|_| LocoError::Build("too many locations".into()))?;
        let mut store = LocationStore {
            locations: Vec::with_capacity(count as usize),
            by_key: HashMap::with_capacity(count as usize),
            states: HashMap::new(),
            subdivs: HashMap::new(),
            by_code: HashMap::new(),
            roots: Vec::new(),
        };

        for (i, d) in self.drafts.into_iter().enumerate() {
            let loc_id = LocId(i as u32);
            let id = d.id();
            let key = format!("{}-{}", d.encoding, id);
            let words = searchable_words(&d.names);

            if store.by_key.insert(key.clone(), loc_id).is_some() {
                return Err(LocoError::Build(format!("duplicate key `{key}`")));
            }
            match d.level {
                Level::State => {
                    store.states.insert(d.local.clone(), loc_id);
                    store.roots.push(loc_id);
                }
                Level::Subdivision => {
                    store
                        .subdivs
                        .insert((d.state_code.clone(), d.local.clone()), loc_id);
                }
                Level::Place => {}
            }
            for code in &d.codes {
                store.by_code.entry(code.clone()).or_default().push(loc_id);
            }

            store.locations.push(Location {
                key,
                encoding: d.encoding,
                id,
                names: d.names,
                words,
                codes: d.codes,
                state_code: (d.level != Level::State).then_some(d.state_code),
                subdiv_code: d.subdiv_code,
                coordinates: d.coordinates,
                status: d.status,
                function: d.function,
                date: d.date,
                level: d.level,
                state: d.state.map(|s| LocId(s as u32)),
                subdiv: d.subdiv.map(|s| LocId(s as u32)),
                children: Vec::new(),
            });
        }

        // second pass: a parent may be drafted after a child it adopts later
        for i in 0..store.locations.len() {
            let loc = &store.locations[i];
            if let Some(parent) = loc.subdiv.or(loc.state) {
                store.locations[parent.index()].children.push(LocId(i as u32));
            }
        }

        if self.skipped > 0 {
            debug!(skipped = self.skipped, "inputs skipped during build");
        }
        Ok(store)
    }
}

impl Incoming {
    fn named(names: Vec<String>, codes: Vec<String>) -> Self {
        Self {
            names,
            codes,
            subdiv: None,
            coordinates: None,
            status: None,
            function: None,
            date: None,
        }
    }
}

/// Coordinates are metadata only: an unreadable value is dropped, not fatal.
fn parse_coordinates(raw: Option<&str>, cc: &str, code: &str) -> Option<Coordinates> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
    match Coordinates::parse_locode(raw) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(country = %cc, code = %code, error = %e, "coordinates dropped");
            None
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn push_non_empty(out: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() && !out.iter().any(|v| v == s) {
        out.push(s.to_string());
    }
}

fn union_into(out: &mut Vec<String>, incoming: Vec<String>) {
    for v in incoming {
        push_non_empty(out, &v);
    }
}

fn fill(slot: &mut Option<String>, v: Option<String>) {
    if slot.is_none() {
        *slot = v.and_then(|s| non_empty(&s));
    }
}

/// Translations in language-key order so builds are reproducible.
fn extend_translations(names: &mut Vec<String>, translations: &HashMap<String, String>) {
    let mut langs: Vec<_> = translations.iter().collect();
    langs.sort_by(|a, b| a.0.cmp(b.0));
    for (_, name) in langs {
        push_non_empty(names, name);
    }
}

fn searchable_words(names: &[String]) -> Vec<String> {
    let mut words: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let phrase = normalize_phrase(name);
        if !phrase.is_empty() && !words.contains(&phrase) {
            words.push(phrase);
        }
    }
    words
}

/// Immutable arena of every location, with the exact-lookup tables.
#[derive(Debug, Default)]
pub struct LocationStore {
    locations: Vec<Location>,
    by_key: HashMap<String, LocId>,
    states: HashMap<String, LocId>,
    subdivs: HashMap<(String, String), LocId>,
    by_code: HashMap<String, Vec<LocId>>,
    roots: Vec<LocId>,
}

impl LocationStore {
    /// Merge boundary documents, then record lists, into one store.
    pub fn build<B, R>(boundaries: &[B], records: &[R]) -> Result<Self>
    where
        B: AsRef<[CountryRaw]>,
        R: AsRef<[LocodeRecord]>,
    {
        let mut builder = StoreBuilder::new();
        for doc in boundaries {
            builder.add_boundaries(doc.as_ref())?;
        }
        for list in records {
            builder.add_records(list.as_ref())?;
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Direct arena access. Ids only come from this store, so this cannot miss.
    pub(crate) fn location(&self, id: LocId) -> &Location {
        &self.locations[id.index()]
    }

    pub(crate) fn view(&self, id: LocId) -> LocationView<'_> {
        LocationView { store: self, id }
    }

    /// All locations in build order.
    pub fn iter(&self) -> impl Iterator<Item = LocationView<'_>> + '_ {
        (0..self.locations.len()).map(move |i| self.view(LocId(i as u32)))
    }

    /// Countries in build order.
    pub fn roots(&self) -> impl Iterator<Item = LocationView<'_>> + '_ {
        self.roots.iter().map(move |&id| self.view(id))
    }

    pub fn retrieve(&self, key: &str) -> Result<LocationView<'_>> {
        self.by_key
            .get(key)
            .map(|&id| self.view(id))
            .ok_or_else(|| LocoError::NotFound(format!("key `{key}`")))
    }

    pub fn get_state_key(&self, state_code: &str) -> Result<&str> {
        self.state(state_code).map(|loc| loc.key.as_str())
    }

    pub fn get_subdiv_key(&self, state_code: &str, subdiv_code: &str) -> Result<&str> {
        self.subdiv(state_code, subdiv_code)
            .map(|loc| loc.key.as_str())
    }

    pub fn get_state_name(&self, state_code: &str) -> Result<&str> {
        self.state(state_code).map(Location::name)
    }

    pub fn get_subdiv_name(&self, state_code: &str, subdiv_code: &str) -> Result<&str> {
        self.subdiv(state_code, subdiv_code).map(Location::name)
    }

    /// Locations carrying `code` among their codes, in build order.
    pub fn find_by_code(&self, code: &str) -> Vec<LocationView<'_>> {
        self.by_code
            .get(&code.trim().to_lowercase())
            .map(|ids| ids.iter().map(|&id| self.view(id)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn has_state(&self, state_code: &str) -> bool {
        self.states.contains_key(&state_code.trim().to_lowercase())
    }

    fn state(&self, state_code: &str) -> Result<&Location> {
        self.states
            .get(&state_code.trim().to_lowercase())
            .map(|&id| self.location(id))
            .ok_or_else(|| LocoError::NotFound(format!("state code `{state_code}`")))
    }

    fn subdiv(&self, state_code: &str, subdiv_code: &str) -> Result<&Location> {
        let key = (
            state_code.trim().to_lowercase(),
            subdiv_code.trim().to_lowercase(),
        );
        self.subdivs
            .get(&key)
            .map(|&id| self.location(id))
            .ok_or_else(|| {
                LocoError::NotFound(format!("subdivision `{state_code}-{subdiv_code}`"))
            })
    }

    pub(crate) fn count(&self, level: Level) -> usize {
        match level {
            Level::State => self.roots.len(),
            Level::Subdivision => self.subdivs.len(),
            Level::Place => self.locations.len() - self.roots.len() - self.subdivs.len(),
        }
    }
}

/// A borrowed location that can walk the hierarchy.
///
/// Derefs to [`Location`] for the plain fields.
#[derive(Clone, Copy)]
pub struct LocationView<'a> {
    store: &'a LocationStore,
    id: LocId,
}

impl<'a> LocationView<'a> {
    pub fn loc_id(&self) -> LocId {
        self.id
    }

    pub fn location(&self) -> &'a Location {
        self.store.location(self.id)
    }

    /// Owning country; `None` for a country.
    pub fn state(&self) -> Option<LocationView<'a>> {
        self.location().state.map(|id| self.store.view(id))
    }

    /// Owning subdivision, if any.
    pub fn subdiv(&self) -> Option<LocationView<'a>> {
        self.location().subdiv.map(|id| self.store.view(id))
    }

    /// Directly owned locations, in first-appearance order.
    pub fn children(&self) -> Vec<LocationView<'a>> {
        let store = self.store;
        self.location()
            .children
            .iter()
            .map(|&id| store.view(id))
            .collect()
    }
}

impl Deref for LocationView<'_> {
    type Target = Location;

    fn deref(&self) -> &Location {
        self.store.location(self.id)
    }
}

impl MatchInfo for LocationView<'_> {}

impl PartialEq for LocationView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.store, other.store) && self.id == other.id
    }
}

impl fmt::Debug for LocationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationView")
            .field("key", &self.key)
            .field("names", &self.names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gb() -> Vec<CountryRaw> {
        serde_json::from_str(
            r#"[{
                "code": "GB", "alpha3": "GBR",
                "name": "United Kingdom of Great Britain and Northern Ireland",
                "short": "United Kingdom",
                "subdivisions": [
                    { "code": "CAY", "name": "Caerphilly" },
                    { "code": "NWP", "name": "Newport",
                      "locations": [{ "code": "NPT", "name": "Newport" }] }
                ]
            }]"#,
        )
        .unwrap()
    }

    fn record(cc: &str, code: &str, name: &str, sd: &str) -> LocodeRecord {
        LocodeRecord {
            country: cc.into(),
            subcode: code.into(),
            name: name.into(),
            name_wo_diacritics: name.into(),
            subdivision_code: sd.into(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_keys_and_ids() {
        let store = LocationStore::build(&[gb()], &[vec![record("GB", "ABC", "Abercarn", "CAY")]])
            .unwrap();

        let abc = store.retrieve("UN-LOCODE-gb:abc").unwrap();
        assert_eq!(abc.id(), "gb:abc");
        assert_eq!(abc.words(), ["abercarn"]);
        assert_eq!(abc.state_code(), Some("gb"));
        assert_eq!(abc.subdiv_code(), Some("cay"));
        assert_eq!(abc.state().unwrap().key(), "ISO-3166-1-gb");
        assert_eq!(abc.subdiv().unwrap().key(), "ISO-3166-2-gb:cay");

        let gb = store.retrieve("ISO-3166-1-gb").unwrap();
        assert_eq!(gb.state_code(), None);
        assert_eq!(gb.codes(), ["gb", "gbr"]);
        assert_eq!(gb.words(), ["united kingdom of great britain and northern ireland", "united kingdom"]);
    }

    #[test]
    fn children_follow_first_appearance() {
        let store = LocationStore::build(
            &[gb()],
            &[vec![
                record("GB", "ABC", "Abercarn", "CAY"),
                record("GB", "LON", "London", ""),
            ]],
        )
        .unwrap();

        let gb = store.retrieve("ISO-3166-1-gb").unwrap();
        let keys: Vec<_> = gb.children().iter().map(|c| c.key().to_string()).collect();
        assert_eq!(
            keys,
            ["ISO-3166-2-gb:cay", "ISO-3166-2-gb:nwp", "UN-LOCODE-gb:lon"]
        );

        let nwp = store.retrieve("ISO-3166-2-gb:nwp").unwrap();
        assert_eq!(nwp.children().len(), 1);
        assert!(store.retrieve("UN-LOCODE-gb:npt").unwrap().children().is_empty());
    }

    #[test]
    fn merges_same_identity_across_sources() {
        let mut with_alias = record("GB", "NPT", "Newport", "NWP");
        with_alias.iata_code = "NWT".into();
        let store = LocationStore::build(&[gb()], &[vec![with_alias]]).unwrap();

        let npt = store.retrieve("UN-LOCODE-gb:npt").unwrap();
        assert_eq!(npt.codes(), ["npt", "nwt"]);
        assert_eq!(npt.names(), ["Newport"]);
        assert_eq!(store.find_by_code("NWT").len(), 1);
    }

    #[test]
    fn empty_subdivision_is_filled_later() {
        let store = LocationStore::build(
            &[gb()],
            &[
                vec![record("GB", "ABC", "Abercarn", "")],
                vec![record("GB", "ABC", "Abercarn", "CAY")],
            ],
        )
        .unwrap();
        let abc = store.retrieve("UN-LOCODE-gb:abc").unwrap();
        assert_eq!(abc.subdiv_code(), Some("cay"));
        let gb = store.retrieve("ISO-3166-1-gb").unwrap();
        assert!(gb.children().iter().all(|c| c.key() != "UN-LOCODE-gb:abc"));
    }

    #[test]
    fn conflicting_subdivisions_fail_the_build() {
        let err = LocationStore::build(
            &[gb()],
            &[vec![
                record("GB", "ABC", "Abercarn", "CAY"),
                record("GB", "ABC", "Abercarn", "NWP"),
            ]],
        )
        .unwrap_err();
        assert!(matches!(err, LocoError::Build(_)));
    }

    #[test]
    fn unknown_country_and_header_rows_are_skipped() {
        let store = LocationStore::build(
            &[gb()],
            &[vec![
                record("GB", "", ".UNITED KINGDOM", ""),
                record("ZZ", "AAA", "Nowhere", ""),
            ]],
        )
        .unwrap();
        assert!(store.retrieve("UN-LOCODE-zz:aaa").is_err());
        assert_eq!(store.count(Level::Place), 1);
    }

    #[test]
    fn unknown_subdivision_falls_back_to_country() {
        let store =
            LocationStore::build(&[gb()], &[vec![record("GB", "XYZ", "Somewhere", "QQQ")]]).unwrap();
        let xyz = store.retrieve("UN-LOCODE-gb:xyz").unwrap();
        assert_eq!(xyz.subdiv_code(), None);
        assert!(xyz.subdiv().is_none());
        assert_eq!(xyz.state().unwrap().id(), "gb");
    }

    #[test]
    fn code_lookups_are_case_insensitive() {
        let store = LocationStore::build(&[gb()], &[] as &[Vec<LocodeRecord>]).unwrap();
        assert_eq!(store.get_state_key("GB").unwrap(), "ISO-3166-1-gb");
        assert_eq!(store.get_subdiv_key("gb", "Cay").unwrap(), "ISO-3166-2-gb:cay");
        assert_eq!(store.get_subdiv_name("GB", "CAY").unwrap(), "Caerphilly");
        assert!(matches!(store.get_state_name("XX"), Err(LocoError::NotFound(_))));
        assert!(matches!(store.get_subdiv_key("GB", "XXX"), Err(LocoError::NotFound(_))));
    }

    #[test]
    fn views_have_no_match_info() {
        let store = LocationStore::build(&[gb()], &[] as &[Vec<LocodeRecord>]).unwrap();
        let gb = store.retrieve("ISO-3166-1-gb").unwrap();
        assert!(matches!(gb.score(), Err(LocoError::FieldNotPresent("score"))));
        assert!(matches!(gb.offset(), Err(LocoError::FieldNotPresent("offset"))));
    }

    #[test]
    fn back_references_agree_with_codes() {
        let store = LocationStore::build(&[gb()], &[vec![record("GB", "ABC", "Abercarn", "CAY")]])
            .unwrap();
        for loc in store.iter() {
            assert_eq!(loc.subdiv_code().is_some(), loc.subdiv().is_some(), "{}", loc.key());
            assert_eq!(loc.state_code().is_some(), loc.state().is_some(), "{}", loc.key());
        }
        let cay = store.retrieve("ISO-3166-2-gb:cay").unwrap();
        assert_eq!(cay.subdiv_code(), None);
        assert_eq!(cay.state_code(), Some("gb"));
    }

    #[test]
    fn unreadable_coordinates_are_dropped() {
        let mut rec = record("GB", "ABC", "Abercarn", "CAY");
        rec.coordinates = Some("north-ish".into());
        let store = LocationStore::build(&[gb()], &[vec![rec]]).unwrap();
        assert_eq!(store.retrieve("UN-LOCODE-gb:abc").unwrap().coordinates(), None);
    }
}
