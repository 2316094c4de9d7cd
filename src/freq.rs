//! Frequency tables over tokens and n-grams, with deterministic ordering:
//! descending count, ties broken by first-seen order.

use ahash::AHashMap;

/// Token → count with first-seen insertion order retained.
#[derive(Default)]
pub struct FreqTable {
    counts: AHashMap<String, u64>,
    order: Vec<String>,
    total: u64,
}

impl FreqTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(c) => *c += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
                self.order.push(token.to_string());
            }
        }
        self.total += 1;
    }

    pub fn extend<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
        for t in tokens {
            self.add(t);
        }
    }

    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens counted (sum of all counts).
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The `n` most common tokens: descending count, first-seen tie order.
    /// The stable sort over the insertion-ordered token list gives the tie
    /// behavior directly.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .order
            .iter()
            .map(|t| (t.as_str(), self.counts[t]))
            .collect();
        entries.sort_by_key(|&(_, c)| std::cmp::Reverse(c));
        entries.truncate(n);
        entries
    }
}

/// Count contiguous n-grams over a token stream, joining tokens with a
/// single space. Windows never span the gaps between records — callers
/// build one table and feed it per-record token slices.
pub fn count_ngrams(table: &mut FreqTable, tokens: &[String], n: usize) {
    if n == 0 || tokens.len() < n {
        return;
    }
    for window in tokens.windows(n) {
        table.add(&window.join(" "));
    }
}
