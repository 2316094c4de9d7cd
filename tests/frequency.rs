mod common;

use redsift::{count_ngrams, FreqTable, MonthlyCorpus, StopwordSet, YearMonth};

fn month(s: &str) -> YearMonth {
    s.parse().unwrap()
}

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn counts_sum_to_total() {
    let mut t = FreqTable::new();
    t.extend(["a", "b", "a", "c", "a"]);
    assert_eq!(t.total(), 5);
    assert_eq!(t.count("a"), 3);
    assert_eq!(t.count("b"), 1);
    assert_eq!(t.count("missing"), 0);
    let sum: u64 = t.most_common(usize::MAX).iter().map(|&(_, c)| c).sum();
    assert_eq!(sum, t.total());
}

#[test]
fn ties_keep_first_seen_order() {
    let mut t = FreqTable::new();
    t.extend(["b", "a", "a", "b", "c"]);
    assert_eq!(t.most_common(10), vec![("b", 2), ("a", 2), ("c", 1)]);
    assert_eq!(t.most_common(2), vec![("b", 2), ("a", 2)]);
}

#[test]
fn ngram_windows_stay_within_the_record() {
    let mut t = FreqTable::new();
    count_ngrams(&mut t, &toks(&["flat", "closure", "surgery"]), 2);
    assert_eq!(t.count("flat closure"), 1);
    assert_eq!(t.count("closure surgery"), 1);
    assert_eq!(t.total(), 2);

    // A second record never bridges into the first.
    count_ngrams(&mut t, &toks(&["went", "flat"]), 2);
    assert_eq!(t.count("surgery went"), 0);
    assert_eq!(t.count("went flat"), 1);

    // Too-short records contribute nothing.
    count_ngrams(&mut t, &toks(&["solo"]), 2);
    assert_eq!(t.total(), 3);
}

#[test]
fn trigram_counting_over_a_longer_record() {
    let mut t = FreqTable::new();
    count_ngrams(&mut t, &toks(&["a", "b", "c", "d"]), 3);
    assert_eq!(t.most_common(10), vec![("a b c", 1), ("b c d", 1)]);
}

#[test]
fn monthly_table_excludes_domain_terms_but_ngrams_keep_them() {
    let stopwords = StopwordSet::build(&["flat closure".to_string()], &[]);
    let mut corpus = MonthlyCorpus::new();
    let m = month("2012-03");
    let tokens = ["I", "chose", "flat", "closure", "surgery"];
    corpus.add_record(m, &tokens, &stopwords);

    // Unigrams: "i" is generic, "flat"/"closure" are domain terms.
    let table = corpus.monthly_table(m, &stopwords);
    assert_eq!(table.count("flat"), 0);
    assert_eq!(table.count("closure"), 0);
    assert_eq!(table.count("chose"), 1);
    assert_eq!(table.count("surgery"), 1);

    // Bigrams drop only generic words, so the domain phrase survives.
    assert_eq!(corpus.bigrams().count("flat closure"), 1);
    assert_eq!(corpus.bigrams().count("chose flat"), 1);
    assert_eq!(corpus.bigrams().count("i chose"), 0);
}

#[test]
fn corpus_table_folds_months_in_ascending_order() {
    let stopwords = StopwordSet::build(&[], &[]);
    let mut corpus = MonthlyCorpus::new();
    // Insert out of order; months() and the corpus fold are sorted.
    corpus.add_record(month("2013-01"), &["beta", "beta"], &stopwords);
    corpus.add_record(month("2012-11"), &["alpha"], &stopwords);

    let months: Vec<String> = corpus.months().map(|m| m.to_string()).collect();
    assert_eq!(months, ["2012-11", "2013-01"]);

    // First-seen order follows month order: alpha (2012-11) before beta.
    let table = corpus.corpus_table(&stopwords);
    assert_eq!(table.most_common(10), vec![("beta", 2), ("alpha", 1)]);
}

#[test]
fn monthly_text_blob_keeps_the_record_separator() {
    let stopwords = StopwordSet::build(&[], &[]);
    let mut corpus = MonthlyCorpus::new();
    let m = month("2012-03");
    corpus.add_record(m, &["one", "two"], &stopwords);
    corpus.add_record(m, &["three"], &stopwords);
    // Each record is followed by two spaces (token join plus separator).
    assert_eq!(corpus.text(m), Some("one two  three  "));
}

#[test]
fn matrix_rows_cover_every_month_with_zero_fills() {
    let stopwords = StopwordSet::build(&[], &[]);
    let mut corpus = MonthlyCorpus::new();
    corpus.add_record(month("2012-01"), &["alpha", "beta"], &stopwords);
    corpus.add_record(month("2012-02"), &["beta", "beta", "gamma"], &stopwords);

    let top = vec!["beta".to_string(), "alpha".to_string()];
    let matrix = corpus.matrix(&top, &stopwords);
    assert_eq!(matrix.words, top);
    assert_eq!(matrix.rows.len(), 2);

    assert_eq!(matrix.rows[0].month.to_string(), "2012-01");
    assert_eq!(matrix.rows[0].total, 2);
    assert_eq!(matrix.rows[0].counts, [1, 1]);

    assert_eq!(matrix.rows[1].month.to_string(), "2012-02");
    assert_eq!(matrix.rows[1].total, 3);
    assert_eq!(matrix.rows[1].counts, [2, 0]);
}
