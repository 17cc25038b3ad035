use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref NOISE_WORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Words excluded from indexing. Entries are case-folded on insertion so
/// lookups against lower-cased keywords always match.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// The built-in English noise-word list.
    pub fn english() -> Self {
        Self::from_words(NOISE_WORDS.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        Self { words }
    }

    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

/// Split text into raw whitespace-delimited tokens.
pub fn raw_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Normalize a raw token into a keyword.
///
/// Trailing non-letters are stripped; what remains must be non-empty and made
/// only of letters. The result is lower-cased and rejected if it is a noise word.
/// `"end..."` yields `end`, `"can't"` yields nothing. A single-character token
/// is taken as is, lower-cased, whether or not it is a letter.
///
/// Tokens whose lower-case form would not normalize to itself (`"İstanbul"`
/// lower-cases to a combining dot) are rejected.
pub fn get_keyword(token: &str, stop_words: &StopWords) -> Option<String> {
    let mut chars = token.chars();
    let keyword = match (chars.next(), chars.next()) {
        (None, _) => return None,
        (Some(_), None) => {
            let lower = token.to_lowercase();
            if lower.chars().count() != 1 {
                return None;
            }
            lower
        }
        _ => {
            let stem = token.trim_end_matches(|c: char| !c.is_alphabetic());
            if stem.is_empty() {
                return None;
            }
            let lower = stem.to_lowercase();
            if !lower.chars().all(char::is_alphabetic) {
                return None;
            }
            lower
        }
    };
    if keyword.to_lowercase() != keyword || stop_words.contains(&keyword) {
        return None;
    }
    Some(keyword)
}

/// Keywords of a text in order of appearance, duplicates included.
pub fn keywords<'a>(text: &'a str, stop_words: &'a StopWords) -> impl Iterator<Item = String> + 'a {
    raw_tokens(text).filter_map(move |tok| get_keyword(tok, stop_words))
}
