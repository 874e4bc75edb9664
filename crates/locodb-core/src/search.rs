// crates/locodb-core/src/search.rs

//! Phrase and code matching over the fuzzy index.
//!
//! A location word matches when every one of its tokens lines up with a
//! contiguous window of query tokens, each within the edit budget. Query
//! tokens of two or three characters also match location codes exactly
//! (`CWL`, `GB`, `CAY`). The best match per location is scored with
//!
//! ```text
//! score = 1 + 100 * cost + rank + min(uncovered_tokens, 9)
//! ```
//!
//! where `cost` is the summed edit distance and `rank` is
//! `10 * min(word_index, 9)` for a phrase (0 = primary name) or 50 for a code.
//! `uncovered_tokens` counts query tokens explained neither by the match nor
//! by a matched parent: when the location's own country or subdivision also
//! matched, on a span that does not overlap, its tokens count as covered.
//!
//! Exact phrase hits score 1..=100, code hits 51..=60 and fuzzy hits at
//! least 101.
//!
//! With [`SearchConfig::stop_words`] on, English stop words in the query only
//! match exactly, are never tried as codes, and a window made of nothing but
//! stop words is dropped unless it spans the whole query.

use crate::config::SearchConfig;
use crate::error::{LocoError, Result};
use crate::index::{FuzzyIndex, TermMatch};
use crate::model::{LocId, MatchInfo};
use crate::store::{LocationStore, LocationView};
use crate::text::{normalize, StopWords, Token};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, Range, RangeInclusive};
use tracing::{debug, trace};

const COST_WEIGHT: i64 = 100;
const WORD_WEIGHT: i64 = 10;
const CODE_RANK: i64 = 50;
const CLAMP: usize = 9;
const CODE_CHARS: RangeInclusive<usize> = 2..=3;

/// What a result matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Matched {
    /// Index into the location's `words`.
    Word(u32),
    /// Index into the location's `codes`.
    Code(u32),
}

/// A location hit with its match metadata.
///
/// Derefs to [`LocationView`], so hierarchy navigation works the same as on
/// retrieved locations.
#[derive(Clone)]
pub struct SearchResult<'a> {
    view: LocationView<'a>,
    score: i64,
    offset: Range<usize>,
    cost: u32,
    matched: Matched,
}

impl<'a> SearchResult<'a> {
    /// Summed edit distance of the winning match; 0 for exact and code hits.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Whether the winning match was one of the location's codes.
    pub fn is_code_match(&self) -> bool {
        matches!(self.matched, Matched::Code(_))
    }

    /// The location phrase, or code, that matched.
    pub fn matched_word(&self) -> &'a str {
        let loc = self.view.location();
        let text = match self.matched {
            Matched::Word(i) => loc.words().get(i as usize),
            Matched::Code(i) => loc.codes().get(i as usize),
        };
        text.map(String::as_str).unwrap_or_default()
    }
}

impl MatchInfo for SearchResult<'_> {
    fn score(&self) -> Result<i64> {
        Ok(self.score)
    }

    fn offset(&self) -> Result<Range<usize>> {
        Ok(self.offset.clone())
    }
}

impl<'a> Deref for SearchResult<'a> {
    type Target = LocationView<'a>;

    fn deref(&self) -> &LocationView<'a> {
        &self.view
    }
}

impl fmt::Debug for SearchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchResult")
            .field("key", &self.view.key())
            .field("score", &self.score)
            .field("offset", &self.offset)
            .field("matched", &self.matched_word())
            .finish()
    }
}

/// Running state of one `(location, word, window start)` alignment.
#[derive(Debug, Default, Clone, Copy)]
struct Window {
    matched: u32,
    cost: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    cost: u32,
    matched: Matched,
    start: usize,
    len: usize,
    uncovered: usize,
}

impl Candidate {
    fn score(&self) -> i64 {
        score(self.cost, self.matched, self.uncovered)
    }

    fn rank(&self) -> (i64, Matched, usize) {
        (self.score(), self.matched, self.start)
    }

    /// Query tokens covered by this match.
    fn span(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Read-only matcher over a store and its index.
#[derive(Clone, Copy)]
pub struct QueryEngine<'a> {
    store: &'a LocationStore,
    index: &'a FuzzyIndex,
    stop_words: &'a StopWords,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a LocationStore, index: &'a FuzzyIndex, stop_words: &'a StopWords) -> Self {
        Self {
            store,
            index,
            stop_words,
        }
    }

    /// Rank locations whose phrases or codes occur (fuzzily) in `text`.
    ///
    /// `state` restricts results to one country code, case-insensitively.
    /// Empty or punctuation-only text yields no results.
    pub fn search(
        &self,
        text: &str,
        config: &SearchConfig,
        state: Option<&str>,
    ) -> Result<Vec<SearchResult<'a>>> {
        validate(text, config)?;
        let state = match state.map(str::trim) {
            Some("") => {
                return Err(LocoError::InvalidArgument(
                    "state filter must not be empty".into(),
                ))
            }
            Some(cc) => Some(cc.to_ascii_lowercase()),
            None => None,
        };
        if let Some(cc) = &state {
            if !self.store.has_state(cc) {
                debug!(state = %cc, "unknown state filter");
                return Ok(Vec::new());
            }
        }

        let tokens = normalize(text);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let stop: Vec<bool> = tokens
            .iter()
            .map(|t| config.stop_words && self.stop_words.contains(&t.text))
            .collect();

        let windows = self.align(&tokens, &stop, config, state.as_deref());
        let mut best = best_per_location(windows, self.index, &stop);
        self.code_hits(&tokens, &stop, state.as_deref(), &mut best);
        apply_parent_context(self.store, &mut best, tokens.len());

        let mut results: Vec<SearchResult<'a>> = best
            .into_iter()
            .map(|(loc, c)| SearchResult {
                view: self.store.view(loc),
                score: c.score(),
                offset: tokens[c.start].start..tokens[c.start + c.len - 1].end,
                cost: c.cost,
                matched: c.matched,
            })
            .collect();

        results.sort_by(compare_results);
        results.truncate(config.limit);

        debug!(
            query = text,
            tokens = tokens.len(),
            stop_words = stop.iter().filter(|&&s| s).count(),
            results = results.len(),
            "search finished"
        );
        Ok(results)
    }

    /// Accumulate every window in which a phrase token lines up with a query
    /// token.
    fn align(
        &self,
        tokens: &[Token],
        stop: &[bool],
        config: &SearchConfig,
        state: Option<&str>,
    ) -> HashMap<(LocId, u32, usize), Window> {
        // term lookups scan the length buckets, so they run per token in
        // parallel; windows are then folded in token order
        let index = self.index;
        let lookups: Vec<Vec<TermMatch<'a>>> = tokens
            .par_iter()
            .zip(stop.par_iter())
            .map(|(token, &is_stop)| {
                let budget = if is_stop { 0 } else { config.max_edit_distance };
                index.lookup_terms(&token.text, budget, config.min_fuzzy_token_chars)
            })
            .collect();

        let mut windows: HashMap<(LocId, u32, usize), Window> = HashMap::new();
        for (i, matches) in lookups.into_iter().enumerate() {
            for m in matches {
                trace!(token = %tokens[i].text, term = m.term, distance = m.distance, "term hit");
                for p in m.postings {
                    let Some(start) = i.checked_sub(p.position as usize) else {
                        continue;
                    };
                    if let Some(cc) = state {
                        if self.store.location(p.loc).country_code() != cc {
                            continue;
                        }
                    }
                    let w = windows.entry((p.loc, p.word, start)).or_default();
                    w.matched += 1;
                    w.cost += m.distance;
                }
            }
        }
        windows
    }

    /// Exact code hits for short query tokens.
    fn code_hits(
        &self,
        tokens: &[Token],
        stop: &[bool],
        state: Option<&str>,
        best: &mut HashMap<LocId, Candidate>,
    ) {
        for (i, token) in tokens.iter().enumerate() {
            if stop[i] || !CODE_CHARS.contains(&token.text.len()) {
                continue;
            }
            for view in self.store.find_by_code(&token.text) {
                if state.is_some_and(|cc| view.country_code() != cc) {
                    continue;
                }
                let Some(pos) = view.codes().iter().position(|c| *c == token.text) else {
                    continue;
                };
                trace!(token = %token.text, key = view.key(), "code hit");
                keep(
                    best,
                    view.loc_id(),
                    Candidate {
                        cost: 0,
                        matched: Matched::Code(pos as u32),
                        start: i,
                        len: 1,
                        uncovered: tokens.len() - 1,
                    },
                );
            }
        }
    }
}

fn validate(text: &str, config: &SearchConfig) -> Result<()> {
    if config.limit == 0 {
        return Err(LocoError::InvalidArgument("limit must be at least 1".into()));
    }
    let chars = text.chars().count();
    if chars > config.max_query_chars {
        return Err(LocoError::InvalidArgument(format!(
            "query is {chars} characters, at most {} allowed",
            config.max_query_chars
        )));
    }
    if text.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        return Err(LocoError::InvalidArgument(
            "query contains control characters".into(),
        ));
    }
    Ok(())
}

/// Keep complete windows only and pick the best per location.
fn best_per_location(
    windows: HashMap<(LocId, u32, usize), Window>,
    index: &FuzzyIndex,
    stop: &[bool],
) -> HashMap<LocId, Candidate> {
    let token_count = stop.len();
    let mut best: HashMap<LocId, Candidate> = HashMap::new();

    for ((loc, word, start), w) in windows {
        let len = index.phrase_len(loc, word);
        if len == 0 || w.matched != len {
            continue;
        }
        let len = len as usize;
        if start + len > token_count {
            continue;
        }
        if len < token_count && stop[start..start + len].iter().all(|&s| s) {
            continue;
        }
        keep(
            &mut best,
            loc,
            Candidate {
                cost: w.cost,
                matched: Matched::Word(word),
                start,
                len,
                uncovered: token_count - len,
            },
        );
    }
    best
}

fn keep(best: &mut HashMap<LocId, Candidate>, loc: LocId, candidate: Candidate) {
    best.entry(loc)
        .and_modify(|c| {
            if candidate.rank() < c.rank() {
                *c = candidate;
            }
        })
        .or_insert(candidate);
}

/// Count the tokens of a matched parent as covered for its children.
///
/// Computed against the candidates as they stand, so the order in which
/// locations are visited does not matter.
fn apply_parent_context(
    store: &LocationStore,
    best: &mut HashMap<LocId, Candidate>,
    token_count: usize,
) {
    let updates: Vec<(LocId, usize)> = best
        .iter()
        .filter_map(|(&loc, c)| {
            let own = c.span();
            let location = store.location(loc);
            let parents: Vec<Range<usize>> = [location.subdiv, location.state]
                .into_iter()
                .flatten()
                .filter_map(|p| best.get(&p))
                .map(Candidate::span)
                .filter(|p| p.end <= own.start || own.end <= p.start)
                .collect();
            if parents.is_empty() {
                return None;
            }
            let mut covered = vec![false; token_count];
            for span in std::iter::once(own).chain(parents) {
                covered[span].fill(true);
            }
            Some((loc, covered.iter().filter(|&&c| !c).count()))
        })
        .collect();

    for (loc, uncovered) in updates {
        if let Some(c) = best.get_mut(&loc) {
            c.uncovered = uncovered;
        }
    }
}

fn score(cost: u32, matched: Matched, uncovered: usize) -> i64 {
    let rank = match matched {
        Matched::Word(word) => WORD_WEIGHT * (word as usize).min(CLAMP) as i64,
        Matched::Code(_) => CODE_RANK,
    };
    1 + COST_WEIGHT * i64::from(cost) + rank + uncovered.min(CLAMP) as i64
}

/// Score, then encoding priority, then key.
fn compare_results(a: &SearchResult<'_>, b: &SearchResult<'_>) -> Ordering {
    a.score
        .cmp(&b.score)
        .then_with(|| a.view.encoding_rank().cmp(&b.view.encoding_rank()))
        .then_with(|| a.view.key().cmp(b.view.key()))
}
