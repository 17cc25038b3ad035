use criterion::{criterion_group, criterion_main, Criterion};
use lse_core::source::build_from_source;
use lse_core::StopWords;
use std::collections::HashMap;

const WORDS: &[&str] = &["whale", "sea", "ship", "captain", "harpoon", "the", "of", "Ahab.", "white,", "can't"];

fn corpus(docs: usize) -> (HashMap<String, String>, Vec<String>) {
    let mut source = HashMap::new();
    let mut names = Vec::with_capacity(docs);
    for d in 0..docs {
        let text: Vec<&str> = (0..400).map(|i| WORDS[(i * 7 + d * 3 + i / (d + 1)) % WORDS.len()]).collect();
        let name = format!("doc{d}.txt");
        source.insert(name.clone(), text.join(" "));
        names.push(name);
    }
    (source, names)
}

fn bench_index(c: &mut Criterion) {
    let (source, names) = corpus(500);
    c.bench_function("build_500_docs", |b| {
        b.iter(|| build_from_source(&source, &names, StopWords::english()).unwrap())
    });
    let index = build_from_source(&source, &names, StopWords::english()).unwrap();
    c.bench_function("top5_search", |b| b.iter(|| index.top5_search("whale", "harpoon")));
}

criterion_group!(benches, bench_index);
criterion_main!(benches);
