// crates/locodb-core/src/index.rs

//! Inverted index from normalized token to the phrases containing it.
//!
//! Every searchable word of every location is split into tokens; each
//! distinct token keeps a posting list of `(location, word, position)`.
//! Fuzzy lookup only compares against terms whose length is within the edit
//! budget of the query token, bucketed by length.

use crate::config::DEFAULT_MIN_FUZZY_TOKEN_CHARS;
use crate::model::LocId;
use crate::store::LocationStore;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// One occurrence of a term inside a location phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub loc: LocId,
    /// Index into the location's `words`.
    pub word: u32,
    /// Token position inside that word.
    pub position: u32,
}

#[derive(Debug)]
struct TermEntry {
    text: String,
    postings: Vec<Posting>,
}

/// A term within the edit budget of a query token.
#[derive(Debug, Clone, Copy)]
pub struct TermMatch<'a> {
    pub term: &'a str,
    pub distance: u32,
    pub postings: &'a [Posting],
}

#[derive(Debug, Default)]
pub struct FuzzyIndex {
    terms: Vec<TermEntry>,
    by_text: HashMap<String, usize>,
    by_len: BTreeMap<usize, Vec<usize>>,
    /// Token count of every word, per location.
    phrase_lens: Vec<Vec<u32>>,
}

impl FuzzyIndex {
    /// Index every word of every location in `store`.
    pub fn build(store: &LocationStore) -> Self {
        let mut index = Self::default();

        for view in store.iter() {
            let loc = view.loc_id();
            let mut lens = Vec::with_capacity(view.words().len());
            for (w, word) in view.words().iter().enumerate() {
                let mut count = 0u32;
                // words are already normalized phrases
                for (p, token) in word.split(' ').enumerate() {
                    index.insert(
                        token,
                        Posting {
                            loc,
                            word: w as u32,
                            position: p as u32,
                        },
                    );
                    count += 1;
                }
                lens.push(count);
            }
            debug_assert_eq!(loc.index(), index.phrase_lens.len());
            index.phrase_lens.push(lens);
        }
        index
    }

    fn insert(&mut self, token: &str, posting: Posting) {
        let id = match self.by_text.get(token) {
            Some(&id) => id,
            None => {
                let id = self.terms.len();
                self.terms.push(TermEntry {
                    text: token.to_string(),
                    postings: Vec::new(),
                });
                self.by_text.insert(token.to_string(), id);
                self.by_len.entry(token.len()).or_default().push(id);
                id
            }
        };
        self.terms[id].postings.push(posting);
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Token count of word `word` of `loc`.
    pub(crate) fn phrase_len(&self, loc: LocId, word: u32) -> u32 {
        self.phrase_lens
            .get(loc.index())
            .and_then(|lens| lens.get(word as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Every posting whose term is within `max_edit_distance` of `token`.
    pub fn lookup(&self, token: &str, max_edit_distance: u32) -> Vec<(Posting, u32)> {
        self.lookup_terms(token, max_edit_distance, DEFAULT_MIN_FUZZY_TOKEN_CHARS)
            .into_iter()
            .flat_map(|m| m.postings.iter().map(move |p| (*p, m.distance)))
            .collect()
    }

    /// Terms matching `token`: the exact term first, then fuzzy ones by term.
    ///
    /// Tokens shorter than `min_fuzzy_chars`, on either side, only match
    /// exactly.
    pub fn lookup_terms(
        &self,
        token: &str,
        max_edit_distance: u32,
        min_fuzzy_chars: usize,
    ) -> Vec<TermMatch<'_>> {
        let mut out = Vec::new();
        if let Some(&id) = self.by_text.get(token) {
            out.push(self.term_match(id, 0));
        }
        if max_edit_distance == 0 || token.len() < min_fuzzy_chars {
            return out;
        }

        let max = max_edit_distance as usize;
        let lo = token.len().saturating_sub(max).max(min_fuzzy_chars);
        let hi = token.len() + max;
        for ids in self.by_len.range(lo..=hi).map(|(_, ids)| ids) {
            for &id in ids {
                let term = &self.terms[id].text;
                if term == token {
                    continue;
                }
                let distance = strsim::levenshtein(token, term);
                if distance <= max {
                    out.push(self.term_match(id, distance as u32));
                }
            }
        }
        trace!(token, candidates = out.len(), "term lookup");
        out
    }

    fn term_match(&self, id: usize, distance: u32) -> TermMatch<'_> {
        let entry = &self.terms[id];
        TermMatch {
            term: &entry.text,
            distance,
            postings: &entry.postings,
        }
    }
}
