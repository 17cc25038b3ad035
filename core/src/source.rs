use crate::error::{Error, Result};
use crate::index::{Index, IndexBuilder};
use crate::tokenizer::{raw_tokens, StopWords};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the raw tokens of a named document.
pub trait TokenSource {
    fn tokens(&self, document: &str) -> Result<Vec<String>>;
}

/// Reads documents from disk. Relative names resolve against `root`.
#[derive(Debug, Clone)]
pub struct FsTokenSource {
    root: PathBuf,
}

impl FsTokenSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn resolve(&self, document: &str) -> PathBuf {
        let p = Path::new(document);
        if p.is_absolute() { p.to_path_buf() } else { self.root.join(p) }
    }
}

impl TokenSource for FsTokenSource {
    fn tokens(&self, document: &str) -> Result<Vec<String>> {
        let path = self.resolve(document);
        let text = fs::read_to_string(&path).map_err(|e| Error::from_io(&path, e))?;
        Ok(raw_tokens(&text).map(str::to_owned).collect())
    }
}

/// Document name to document text, for building an index without touching disk.
impl TokenSource for HashMap<String, String> {
    fn tokens(&self, document: &str) -> Result<Vec<String>> {
        let text = self
            .get(document)
            .ok_or_else(|| Error::NotFound { path: PathBuf::from(document) })?;
        Ok(raw_tokens(text).map(str::to_owned).collect())
    }
}

/// Whitespace-separated words of a list file: document names or noise words.
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    Ok(raw_tokens(&text).map(str::to_owned).collect())
}

pub fn load_stop_words<P: AsRef<Path>>(path: P) -> Result<StopWords> {
    Ok(StopWords::from_words(read_word_list(path)?))
}

/// Index every document named in `docs_file`, excluding the words listed in
/// `noise_file`.
pub fn build<P, Q>(docs_file: P, noise_file: Q) -> Result<Index>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let stop_words = load_stop_words(noise_file)?;
    build_with_stop_words(docs_file, stop_words)
}

/// Like [`build`], falling back to the built-in English noise words when no
/// noise file is given.
pub fn build_or_default<P: AsRef<Path>>(docs_file: P, noise_file: Option<&Path>) -> Result<Index> {
    match noise_file {
        Some(noise) => build(docs_file, noise),
        None => build_with_stop_words(docs_file, StopWords::english()),
    }
}

pub fn build_with_stop_words<P: AsRef<Path>>(docs_file: P, stop_words: StopWords) -> Result<Index> {
    let docs_file = docs_file.as_ref();
    let documents = read_word_list(docs_file)?;
    let root = docs_file.parent().unwrap_or_else(|| Path::new(""));
    let source = FsTokenSource::new(root);
    tracing::info!(list = %docs_file.display(), documents = documents.len(), noise_words = stop_words.len(), "building index");
    build_from_source(&source, &documents, stop_words)
}

pub fn build_from_source<S>(source: &S, documents: &[String], stop_words: StopWords) -> Result<Index>
where
    S: TokenSource + ?Sized,
{
    let mut builder = IndexBuilder::new(stop_words);
    for doc in documents {
        builder.add_document(source, doc)?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_missing_document() {
        let source: HashMap<String, String> = HashMap::new();
        let err = source.tokens("nope.txt").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn duplicate_listing_indexed_once() {
        let mut source = HashMap::new();
        source.insert("a".to_string(), "fish fish".to_string());
        let docs = vec!["a".to_string(), "a".to_string()];
        let index = build_from_source(&source, &docs, StopWords::new()).unwrap();
        assert_eq!(index.documents(), &["a".to_string()]);
        assert_eq!(index.occurrences("fish").unwrap().len(), 1);
        assert_eq!(index.occurrences("fish").unwrap()[0].frequency, 2);
    }

    #[test]
    fn resolves_relative_to_root() {
        let source = FsTokenSource::new("/data/docs");
        assert_eq!(source.resolve("a.txt"), PathBuf::from("/data/docs/a.txt"));
        assert_eq!(source.resolve("/abs/b.txt"), PathBuf::from("/abs/b.txt"));
    }
}
