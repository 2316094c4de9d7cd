#![allow(dead_code)]

use serde_json::json;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Write a plain JSONL dump containing the provided lines.
pub fn write_jsonl_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    for l in lines {
        writeln!(&mut f, "{}", l).unwrap();
    }
}

/// Write a zstd-compressed JSONL dump (the archive ships both forms).
pub fn write_zst_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Read a text file line-by-line into strings (skips empty lines).
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines().map(|l| l.unwrap()).filter(|s| !s.is_empty()).collect()
}

/// Read a whole file as bytes (for byte-for-byte determinism checks).
pub fn read_bytes(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap()
}

pub fn submission_lines() -> Vec<String> {
    vec![
        // s1 matches "autistic" in the title; Jan 2006.
        json!({
            "subreddit":"books", "title":"I think I am autistic", "selftext":"",
            "author":"u1", "score":5, "url":"http://example.com/s1", "id":"s1",
            "permalink":"/r/books/comments/s1", "created_utc":1136073600,
            "num_comments":3, "over_18":false
        })
        .to_string(),
        // s2 matches nothing; Feb 2006.
        json!({
            "subreddit":"books", "title":"Weekly reading thread", "selftext":"What are you reading?",
            "author":"u2", "score":40, "url":"http://example.com/s2", "id":"s2",
            "permalink":"/r/books/comments/s2", "created_utc":1138752000,
            "num_comments":1, "over_18":false
        })
        .to_string(),
    ]
}

pub fn comment_lines() -> Vec<String> {
    vec![
        // c1 replies to s1; keyword in body; permalink missing on purpose.
        json!({
            "subreddit":"books", "author":"u3", "score":2,
            "body":"Me too, AUTISTIC! Reading helped a lot.",
            "id":"c1", "parent_id":"t3_s1", "created_utc":1136074600
        })
        .to_string(),
        // c2 replies to c1; no keyword in body (kept only by thread membership).
        json!({
            "subreddit":"books", "author":"u4", "score":1,
            "body":"Thanks for sharing, that was helpful.",
            "id":"c2", "parent_id":"t1_c1", "permalink":"/r/books/comments/s1/c2",
            "created_utc":1136074700
        })
        .to_string(),
        // c3 replies to the unretained s2; "autist" must not match "autistic".
        json!({
            "subreddit":"books", "author":"u5", "score":0,
            "body":"An autist wrote this book.",
            "id":"c3", "parent_id":"t3_s2", "permalink":"/r/books/comments/s2/c3",
            "created_utc":1138752100
        })
        .to_string(),
    ]
}

/// Build a tiny corpus under a temp dir:
/// - `books_submissions.jsonl`: s1 (keyword match, Jan 2006), s2 (no match, Feb 2006)
/// - `books_comments.jsonl`: c1 → t3_s1 (keyword, no permalink),
///   c2 → t1_c1 (no keyword), c3 → t3_s2 (partial-word bait)
pub fn make_corpus_basic() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.into_path();
    write_jsonl_lines(&base.join("books_submissions.jsonl"), &submission_lines());
    write_jsonl_lines(&base.join("books_comments.jsonl"), &comment_lines());
    base
}

/// Same corpus but with the comments dump zstd-compressed.
pub fn make_corpus_zst_comments() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.into_path();
    write_jsonl_lines(&base.join("books_submissions.jsonl"), &submission_lines());
    write_zst_lines(&base.join("books_comments.zst"), &comment_lines());
    base
}
