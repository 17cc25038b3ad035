use crate::index::{Index, Occurrence};
use std::cmp::Ordering;

/// Result bound for [`top5_search`].
pub const TOP_K: usize = 5;

/// Documents containing `kw1` or `kw2`, at most five, highest frequency first.
/// Ties go to `kw1`. `None` when neither keyword is indexed.
pub fn top5_search(index: &Index, kw1: &str, kw2: &str) -> Option<Vec<String>> {
    top_k_search(index, kw1, kw2, TOP_K)
}

pub fn top_k_search(index: &Index, kw1: &str, kw2: &str, k: usize) -> Option<Vec<String>> {
    let (first, second) = (index.occurrences(kw1), index.occurrences(kw2));
    if first.is_none() && second.is_none() {
        return None;
    }
    let docs = merge_top_k(first.unwrap_or_default(), second.unwrap_or_default(), k);
    if docs.is_empty() {
        return None;
    }
    Some(docs)
}

/// Two-pointer merge of two descending occurrence lists into at most `k`
/// distinct document names. A document already taken is passed over, never
/// re-ranked.
pub fn merge_top_k(first: &[Occurrence], second: &[Occurrence], k: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(k.min(first.len() + second.len()));
    let (mut p1, mut p2) = (0usize, 0usize);

    while out.len() < k {
        match (first.get(p1), second.get(p2)) {
            (None, None) => break,
            (None, Some(b)) => {
                push_unique(&mut out, b);
                p2 += 1;
            }
            (Some(a), None) => {
                push_unique(&mut out, a);
                p1 += 1;
            }
            (Some(a), Some(b)) => match a.frequency.cmp(&b.frequency) {
                Ordering::Greater => {
                    push_unique(&mut out, a);
                    p1 += 1;
                }
                Ordering::Less => {
                    push_unique(&mut out, b);
                    p2 += 1;
                }
                Ordering::Equal => {
                    push_unique(&mut out, a);
                    p1 += 1;
                    if out.len() < k {
                        push_unique(&mut out, b);
                    }
                    p2 += 1;
                }
            },
        }
    }
    out
}

fn push_unique(out: &mut Vec<String>, occ: &Occurrence) {
    if !out.iter().any(|d| *d == occ.document) {
        out.push(occ.document.clone());
    }
}
