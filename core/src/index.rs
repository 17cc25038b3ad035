use crate::error::Result;
use crate::search::{top5_search, top_k_search};
use crate::source::TokenSource;
use crate::tokenizer::{get_keyword, StopWords};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A keyword's occurrence count in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub document: String,
    pub frequency: u32,
}

impl Occurrence {
    pub fn new(document: impl Into<String>, frequency: u32) -> Self {
        Self { document: document.into(), frequency }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.document, self.frequency)
    }
}

/// Move the last element of `occs` into place so the whole list is ordered by
/// descending frequency. Elements `0..n-1` must already be ordered.
///
/// The position is found by binary search over `0..=n-2`; an equal frequency
/// stops the search and the new occurrence goes in front of the one it matched.
/// Returns the midpoints probed, in order, or `None` when `n <= 1` and no search
/// is needed.
pub fn insert_last_occurrence(occs: &mut Vec<Occurrence>) -> Option<Vec<usize>> {
    if occs.len() <= 1 {
        return None;
    }
    let last = occs.len() - 1;
    let freq = occs[last].frequency;

    let mut probes = Vec::new();
    // half-open [lo, hi) over the sorted prefix
    let mut lo = 0usize;
    let mut hi = last;
    let mut mid = (lo + hi - 1) / 2;
    while lo < hi {
        mid = (lo + hi - 1) / 2;
        probes.push(mid);
        let pivot = occs[mid].frequency;
        if freq < pivot {
            lo = mid + 1;
        } else if freq > pivot {
            hi = mid;
        } else {
            break;
        }
    }

    let at = if freq < occs[mid].frequency { mid + 1 } else { mid };
    let occ = occs.remove(last);
    occs.insert(at, occ);
    Some(probes)
}

/// Accumulates documents into an index. Consumed by [`IndexBuilder::finish`],
/// after which the index can no longer change.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    keywords: HashMap<String, Vec<Occurrence>>,
    stop_words: StopWords,
    documents: Vec<String>,
    seen: HashSet<String>,
}

impl IndexBuilder {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Count the keywords among one document's raw tokens.
    pub fn load_keywords<I>(&self, document: &str, tokens: I) -> HashMap<String, Occurrence>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut kws: HashMap<String, Occurrence> = HashMap::new();
        for tok in tokens {
            let Some(kw) = get_keyword(tok.as_ref(), &self.stop_words) else { continue };
            kws.entry(kw)
                .and_modify(|occ| occ.frequency += 1)
                .or_insert_with(|| Occurrence::new(document, 1));
        }
        kws
    }

    /// Fetch a document's tokens from `source` and count its keywords.
    pub fn load_document<S>(&self, source: &S, document: &str) -> Result<HashMap<String, Occurrence>>
    where
        S: TokenSource + ?Sized,
    {
        let tokens = source.tokens(document)?;
        Ok(self.load_keywords(document, &tokens))
    }

    /// Fold one document's keyword counts into the index.
    pub fn merge_keywords(&mut self, kws: HashMap<String, Occurrence>) {
        for (kw, occ) in kws {
            match self.keywords.get_mut(&kw) {
                Some(occs) => {
                    occs.push(occ);
                    insert_last_occurrence(occs);
                }
                None => {
                    self.keywords.insert(kw, vec![occ]);
                }
            }
        }
    }

    /// Load and merge `document`. A document already indexed is skipped and
    /// `false` returned.
    pub fn add_document<S>(&mut self, source: &S, document: &str) -> Result<bool>
    where
        S: TokenSource + ?Sized,
    {
        if self.seen.contains(document) {
            tracing::warn!(document, "document listed more than once, skipping");
            return Ok(false);
        }
        let kws = self.load_document(source, document)?;
        tracing::debug!(document, keywords = kws.len(), "loaded document");
        self.merge_keywords(kws);
        self.seen.insert(document.to_string());
        self.documents.push(document.to_string());
        Ok(true)
    }

    pub fn finish(self) -> Index {
        tracing::info!(documents = self.documents.len(), keywords = self.keywords.len(), "index built");
        Index { keywords: self.keywords, stop_words: self.stop_words, documents: self.documents }
    }
}

/// A completed keyword index. Read-only; share it freely across threads.
#[derive(Debug, Default)]
pub struct Index {
    keywords: HashMap<String, Vec<Occurrence>>,
    stop_words: StopWords,
    documents: Vec<String>,
}

impl Index {
    pub fn builder(stop_words: StopWords) -> IndexBuilder { IndexBuilder::new(stop_words) }

    /// Occurrences of `keyword`, highest frequency first.
    pub fn occurrences(&self, keyword: &str) -> Option<&[Occurrence]> {
        self.keywords.get(keyword).map(Vec::as_slice)
    }

    /// Normalize a raw token against this index's noise words.
    pub fn keyword(&self, token: &str) -> Option<String> {
        get_keyword(token, &self.stop_words)
    }

    /// All keywords in lexical order.
    pub fn keywords(&self) -> Vec<&str> {
        let mut kws: Vec<&str> = self.keywords.keys().map(String::as_str).collect();
        kws.sort_unstable();
        kws
    }

    /// Indexed documents in build order.
    pub fn documents(&self) -> &[String] { &self.documents }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize { self.keywords.len() }

    pub fn is_empty(&self) -> bool { self.keywords.is_empty() }

    pub fn top5_search(&self, kw1: &str, kw2: &str) -> Option<Vec<String>> {
        top5_search(self, kw1, kw2)
    }

    pub fn top_k_search(&self, kw1: &str, kw2: &str, k: usize) -> Option<Vec<String>> {
        top_k_search(self, kw1, kw2, k)
    }

    /// Normalize two raw words and run the top-5 query. A word that is not a
    /// keyword contributes nothing.
    pub fn search_words(&self, word1: &str, word2: &str) -> Option<Vec<String>> {
        let kw1 = self.keyword(word1).unwrap_or_default();
        let kw2 = self.keyword(word2).unwrap_or_default();
        top5_search(self, &kw1, &kw2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn occs(freqs: &[u32]) -> Vec<Occurrence> {
        freqs.iter().enumerate().map(|(i, &f)| Occurrence::new(format!("d{i}"), f)).collect()
    }

    fn freqs(occs: &[Occurrence]) -> Vec<u32> {
        occs.iter().map(|o| o.frequency).collect()
    }

    #[test]
    fn single_element_needs_no_search() {
        let mut list = occs(&[3]);
        assert_eq!(insert_last_occurrence(&mut list), None);
        assert_eq!(list, occs(&[3]));
    }

    #[test]
    fn inserts_in_the_middle() {
        let mut list = occs(&[5, 3, 1, 4]);
        let probes = insert_last_occurrence(&mut list);
        assert_eq!(probes, Some(vec![1, 0]));
        assert_eq!(freqs(&list), vec![5, 4, 3, 1]);
        assert_eq!(list[1].document, "d3");
    }

    #[test]
    fn inserts_at_the_ends() {
        let mut tail = occs(&[5, 3, 1, 0]);
        assert_eq!(insert_last_occurrence(&mut tail), Some(vec![1, 2]));
        assert_eq!(freqs(&tail), vec![5, 3, 1, 0]);

        let mut head = occs(&[5, 3, 1, 6]);
        assert_eq!(insert_last_occurrence(&mut head), Some(vec![1, 0]));
        assert_eq!(freqs(&head), vec![6, 5, 3, 1]);
        assert_eq!(head[0].document, "d3");
    }

    #[test]
    fn equal_frequency_stops_at_midpoint() {
        let mut list = occs(&[9, 7, 5, 3, 1, 5]);
        assert_eq!(insert_last_occurrence(&mut list), Some(vec![2]));
        assert_eq!(freqs(&list), vec![9, 7, 5, 5, 3, 1]);
        assert_eq!(list[2].document, "d5");
        assert_eq!(list[3].document, "d2");
    }

    #[test]
    fn two_element_list_records_one_probe() {
        let mut list = occs(&[2, 4]);
        assert_eq!(insert_last_occurrence(&mut list), Some(vec![0]));
        assert_eq!(freqs(&list), vec![4, 2]);
    }

    #[test]
    fn load_keywords_counts_per_document() {
        let builder = IndexBuilder::new(StopWords::from_words(["the"]));
        let kws = builder.load_keywords("a.txt", ["The", "dog", "Dog.", "can't", "the", "bone!"]);
        assert_eq!(kws.len(), 2);
        assert_eq!(kws["dog"], Occurrence::new("a.txt", 2));
        assert_eq!(kws["bone"], Occurrence::new("a.txt", 1));
    }

    #[test]
    fn merge_keeps_lists_sorted() {
        let mut builder = IndexBuilder::new(StopWords::new());
        for (doc, text) in [("a", "x"), ("b", "x x x"), ("c", "x x"), ("d", "x x")] {
            let kws = builder.load_keywords(doc, text.split_whitespace());
            builder.merge_keywords(kws);
        }
        let index = builder.finish();
        let list = index.occurrences("x").unwrap();
        let docs: Vec<&str> = list.iter().map(|o| o.document.as_str()).collect();
        assert_eq!(docs, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn occurrence_display() {
        assert_eq!(Occurrence::new("doc1.txt", 4).to_string(), "(doc1.txt,4)");
    }

    proptest! {
        #[test]
        fn repeated_insertion_stays_sorted(input in prop::collection::vec(0u32..20, 1..60)) {
            let mut list: Vec<Occurrence> = Vec::new();
            for (i, f) in input.iter().enumerate() {
                list.push(Occurrence::new(format!("d{i}"), *f));
                let probes = insert_last_occurrence(&mut list);
                prop_assert_eq!(probes.is_none(), list.len() == 1);
                prop_assert!(list.windows(2).all(|w| w[0].frequency >= w[1].frequency));
            }
            prop_assert_eq!(list.len(), input.len());
        }

        #[test]
        fn probes_stay_in_sorted_prefix(input in prop::collection::vec(0u32..10, 2..40), extra in 0u32..10) {
            let mut list = occs(&input);
            list.sort_by(|a, b| b.frequency.cmp(&a.frequency));
            let n = list.len();
            list.push(Occurrence::new("new", extra));
            let probes = insert_last_occurrence(&mut list).unwrap();
            prop_assert!(!probes.is_empty());
            prop_assert!(probes.iter().all(|&p| p < n));
        }
    }
}
