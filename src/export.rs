//! Serialization of retained records and derived tables: CSV exports with
//! fixed column schemas, JSON snapshots keyed by full id, per-month text
//! corpora, and frequency-count CSVs.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::CommentSelection;
use crate::corpus::{MonthlyCorpus, MonthlyMatrix};
use crate::freq::FreqTable;
use crate::paths::OutputLayout;
use crate::records::{Comment, Submission};
use crate::stopwords::StopwordSet;
use crate::util::create_with_backoff;

/// Fixed submission export schema.
pub const SUBMISSION_COLUMNS: &[&str] = &[
    "subreddit", "type", "title", "author", "score", "selftext", "url", "id", "permalink",
    "created_utc", "date", "month",
];

/// Comment schema in keyword mode (no threading columns).
pub const COMMENT_COLUMNS_KEYWORD: &[&str] = &[
    "subreddit", "type", "author", "score", "body", "id", "permalink", "created_utc", "date",
];

/// Comment schema in thread-membership mode.
pub const COMMENT_COLUMNS_THREAD: &[&str] = &[
    "subreddit", "type", "author", "score", "body", "id", "parent_id", "submission_id",
    "submission_title", "permalink", "created_utc", "date",
];

fn csv_writer(path: &Path, write_buf: usize) -> Result<csv::Writer<BufWriter<std::fs::File>>> {
    let file = create_with_backoff(path, 16, 50).with_context(|| format!("create {}", path.display()))?;
    Ok(csv::Writer::from_writer(BufWriter::with_capacity(write_buf, file)))
}

pub fn write_submissions_csv(path: &Path, submissions: &[Submission], write_buf: usize) -> Result<()> {
    let mut w = csv_writer(path, write_buf)?;
    w.write_record(SUBMISSION_COLUMNS)?;
    for s in submissions {
        w.write_record([
            s.subreddit.as_str(),
            "submission",
            s.title.as_str(),
            s.author.as_str(),
            &s.score.to_string(),
            s.selftext.as_str(),
            s.url.as_str(),
            s.id.as_str(),
            s.permalink.as_str(),
            &s.created_utc.to_string(),
            s.date.as_str(),
            &s.month.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_comments_csv(
    path: &Path,
    comments: &[Comment],
    selection: CommentSelection,
    write_buf: usize,
) -> Result<()> {
    let mut w = csv_writer(path, write_buf)?;
    match selection {
        CommentSelection::Keywords => {
            w.write_record(COMMENT_COLUMNS_KEYWORD)?;
            for c in comments {
                w.write_record([
                    c.subreddit.as_str(),
                    "comment",
                    c.author.as_str(),
                    &c.score.to_string(),
                    c.body.as_str(),
                    c.id.as_str(),
                    c.permalink.as_str(),
                    &c.created_utc.to_string(),
                    c.date.as_str(),
                ])?;
            }
        }
        CommentSelection::ThreadMembership => {
            w.write_record(COMMENT_COLUMNS_THREAD)?;
            for c in comments {
                w.write_record([
                    c.subreddit.as_str(),
                    "comment",
                    c.author.as_str(),
                    &c.score.to_string(),
                    c.body.as_str(),
                    c.id.as_str(),
                    c.parent_id.as_str(),
                    c.submission_id.as_deref().unwrap_or(""),
                    c.submission_title.as_deref().unwrap_or(""),
                    c.permalink.as_str(),
                    &c.created_utc.to_string(),
                    c.date.as_str(),
                ])?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

/// JSON snapshot: `{ "<full id>": record, ... }`. serde_json's map sorts
/// keys, so snapshots are byte-stable across runs.
pub fn write_records_json<T: serde::Serialize>(
    path: &Path,
    records: impl Iterator<Item = (String, T)>,
    write_buf: usize,
) -> Result<()> {
    let mut map = serde_json::Map::new();
    for (id, rec) in records {
        map.insert(id, serde_json::to_value(rec)?);
    }
    let file = create_with_backoff(path, 16, 50).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::with_capacity(write_buf, file);
    serde_json::to_writer(&mut w, &Value::Object(map))?;
    w.flush()?;
    Ok(())
}

/// One plain-text corpus file per month.
pub fn write_monthly_texts(
    layout: &OutputLayout,
    subreddit: &str,
    corpus: &MonthlyCorpus,
    write_buf: usize,
) -> Result<()> {
    for month in corpus.months() {
        let path = layout.monthly_text(subreddit, &month.to_string());
        let file = create_with_backoff(&path, 16, 50).with_context(|| format!("create {}", path.display()))?;
        let mut w = BufWriter::with_capacity(write_buf, file);
        if let Some(text) = corpus.text(month) {
            w.write_all(text.as_bytes())?;
        }
        w.flush()?;
    }
    Ok(())
}

/// Per-month top-word tables: `word,count` rows, no header.
pub fn write_monthly_freq(
    layout: &OutputLayout,
    subreddit: &str,
    corpus: &MonthlyCorpus,
    stopwords: &StopwordSet,
    top_n: usize,
    write_buf: usize,
) -> Result<()> {
    for month in corpus.months() {
        let table = corpus.monthly_table(month, stopwords);
        let path = layout.monthly_freq_csv(subreddit, &month.to_string());
        let mut w = csv_writer(&path, write_buf)?;
        for (word, count) in table.most_common(top_n) {
            w.write_record([word, &count.to_string()])?;
        }
        w.flush()?;
    }
    Ok(())
}

fn relative(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0000000".to_string();
    }
    format!("{:.7}", count as f64 / total as f64)
}

/// Whole-corpus top words: `word,count,frequency` rows, no header.
pub fn write_corpus_freq(path: &Path, table: &FreqTable, top_n: usize, write_buf: usize) -> Result<()> {
    let total = table.total();
    let mut w = csv_writer(path, write_buf)?;
    for (word, count) in table.most_common(top_n) {
        w.write_record([word, &count.to_string(), &relative(count, total)])?;
    }
    w.flush()?;
    Ok(())
}

/// Per-month relative frequencies of the corpus top words:
/// `month,<w1>,...` header, one row per month.
pub fn write_monthly_freq_matrix(path: &Path, matrix: &MonthlyMatrix, write_buf: usize) -> Result<()> {
    let mut w = csv_writer(path, write_buf)?;
    let mut header = vec!["month".to_string()];
    header.extend(matrix.words.iter().cloned());
    w.write_record(&header)?;
    for row in &matrix.rows {
        let mut rec = vec![row.month.to_string()];
        rec.extend(row.counts.iter().map(|&c| relative(c, row.total)));
        w.write_record(&rec)?;
    }
    w.flush()?;
    Ok(())
}

/// Per-month absolute counts of the corpus top words:
/// `[month],[total words],<w1>,...` header, one row per month.
pub fn write_monthly_count_matrix(path: &Path, matrix: &MonthlyMatrix, write_buf: usize) -> Result<()> {
    let mut w = csv_writer(path, write_buf)?;
    let mut header = vec!["[month]".to_string(), "[total words]".to_string()];
    header.extend(matrix.words.iter().cloned());
    w.write_record(&header)?;
    for row in &matrix.rows {
        let mut rec = vec![row.month.to_string(), row.total.to_string()];
        rec.extend(row.counts.iter().map(|&c| c.to_string()));
        w.write_record(&rec)?;
    }
    w.flush()?;
    Ok(())
}

/// N-gram tables: `ngram,count` rows (tokens space-joined), no header.
pub fn write_ngram_csv(path: &Path, table: &FreqTable, top_n: usize, write_buf: usize) -> Result<()> {
    let mut w = csv_writer(path, write_buf)?;
    for (gram, count) in table.most_common(top_n) {
        w.write_record([gram, &count.to_string()])?;
    }
    w.flush()?;
    Ok(())
}
