//! Keyword index over a fixed set of text documents, answering "kw1 or kw2"
//! queries with the five most frequent matches.

pub mod error;
pub mod index;
pub mod search;
pub mod source;
pub mod tokenizer;

pub use error::{Error, Result};
pub use index::{insert_last_occurrence, Index, IndexBuilder, Occurrence};
pub use search::{top5_search, top_k_search, TOP_K};
pub use source::{build, build_or_default, build_with_stop_words, FsTokenSource, TokenSource};
pub use tokenizer::{get_keyword, StopWords};
