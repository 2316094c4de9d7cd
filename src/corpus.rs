//! Per-month accumulation of tokens and raw text, plus the frequency
//! tables and matrices derived from them after ingestion completes.

use std::collections::BTreeMap;

use crate::date::YearMonth;
use crate::freq::{count_ngrams, FreqTable};
use crate::stopwords::StopwordSet;

/// One row of the per-month matrix over the corpus top words.
pub struct MatrixRow {
    pub month: YearMonth,
    /// Total filtered tokens in the month (the relative-frequency divisor).
    pub total: u64,
    /// Absolute count per top word, in the matrix's word order.
    pub counts: Vec<u64>,
}

/// Per-month relative-frequency / absolute-count matrix.
pub struct MonthlyMatrix {
    pub words: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

/// Month-bucketed token lists and text blobs for one subreddit's retained
/// records. Buckets are created on first sight and iterate in month order,
/// keeping every derived export deterministic.
#[derive(Default)]
pub struct MonthlyCorpus {
    words: BTreeMap<YearMonth, Vec<String>>,
    text: BTreeMap<YearMonth, String>,
    bigrams: FreqTable,
    trigrams: FreqTable,
}

impl MonthlyCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record's tokens into its month bucket and into the n-gram
    /// tables. N-gram windows are confined to the record: the stream is
    /// lowercased and filtered by the *generic* stopword list only, so
    /// multi-word domain phrases remain countable.
    pub fn add_record(&mut self, month: YearMonth, tokens: &[&str], stopwords: &StopwordSet) {
        let bucket = self.words.entry(month).or_default();
        bucket.extend(tokens.iter().map(|t| t.to_string()));

        let blob = self.text.entry(month).or_default();
        blob.push_str(&tokens.join(" "));
        // Record separator: a trailing space per record on top of the token
        // join, so non-empty records end with two spaces.
        if !tokens.is_empty() {
            blob.push(' ');
        }
        blob.push(' ');

        let ngram_stream: Vec<String> = tokens
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !stopwords.is_generic(t))
            .collect();
        count_ngrams(&mut self.bigrams, &ngram_stream, 2);
        count_ngrams(&mut self.trigrams, &ngram_stream, 3);
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Months present, in ascending order.
    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.words.keys().copied()
    }

    /// The month's accumulated raw-text blob.
    pub fn text(&self, month: YearMonth) -> Option<&str> {
        self.text.get(&month).map(|s| s.as_str())
    }

    /// Unigram table for one month: lowercased tokens with the combined
    /// (generic + domain) stopword set removed.
    pub fn monthly_table(&self, month: YearMonth, stopwords: &StopwordSet) -> FreqTable {
        let mut table = FreqTable::new();
        if let Some(words) = self.words.get(&month) {
            for w in words {
                let lower = w.to_lowercase();
                if !stopwords.is_stopword(&lower) {
                    table.add(&lower);
                }
            }
        }
        table
    }

    /// Whole-corpus unigram table: every month folded in ascending month
    /// order with the combined stopword set removed.
    pub fn corpus_table(&self, stopwords: &StopwordSet) -> FreqTable {
        let mut table = FreqTable::new();
        for words in self.words.values() {
            for w in words {
                let lower = w.to_lowercase();
                if !stopwords.is_stopword(&lower) {
                    table.add(&lower);
                }
            }
        }
        table
    }

    /// Per-month counts of the given top words (combined stopword filter,
    /// same token stream as [`monthly_table`](Self::monthly_table)).
    pub fn matrix(&self, top_words: &[String], stopwords: &StopwordSet) -> MonthlyMatrix {
        let mut rows = Vec::new();
        for (&month, _) in &self.words {
            let table = self.monthly_table(month, stopwords);
            let counts = top_words.iter().map(|w| table.count(w)).collect();
            rows.push(MatrixRow { month, total: table.total(), counts });
        }
        MonthlyMatrix { words: top_words.to_vec(), rows }
    }

    pub fn bigrams(&self) -> &FreqTable {
        &self.bigrams
    }
    pub fn trigrams(&self) -> &FreqTable {
        &self.trigrams
    }
}
