use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Type of archive dump file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Submission,
    Comment,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Submission => "submissions",
            RecordKind::Comment => "comments",
        }
    }
}

/// One input file: a subreddit's submissions or comments dump.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub subreddit: String,
    pub kind: RecordKind,
    pub path: PathBuf,
}

/// Discovered dumps keyed by (subreddit, kind). When both a plain and a
/// compressed variant exist for the same key, the plain file wins (it sorts
/// first and we keep the first entry).
pub struct Discovered {
    map: BTreeMap<(String, &'static str), PathBuf>,
}

impl Discovered {
    pub fn get(&self, subreddit: &str, kind: RecordKind) -> Option<InputFile> {
        self.map
            .get(&(subreddit.to_string(), kind.as_str()))
            .map(|p| InputFile { subreddit: subreddit.to_string(), kind, path: p.clone() })
    }
}

/// Scan `base_dir` (non-recursively) for archive dumps named
/// `<subreddit>_submissions` / `<subreddit>_comments`, with an optional
/// `_sample` suffix and an optional `.jsonl` / `.zst` extension.
pub fn discover_inputs(base_dir: &Path, sample: bool) -> Discovered {
    let re = Regex::new(r"^(.+?)_(submissions|comments)(_sample)?(?:\.(jsonl|zst))?$").unwrap();
    let mut map = BTreeMap::new();
    if !base_dir.exists() {
        return Discovered { map };
    }
    let mut names: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(base_dir).min_depth(1).max_depth(1) {
        if let Ok(ent) = entry {
            if !ent.file_type().is_file() {
                continue;
            }
            if let Some(name) = ent.file_name().to_str() {
                names.push((name.to_string(), ent.path().to_path_buf()));
            }
        }
    }
    names.sort();
    for (name, path) in names {
        if let Some(caps) = re.captures(&name) {
            let is_sample = caps.get(3).is_some();
            if is_sample != sample {
                continue;
            }
            let sub = caps[1].to_lowercase();
            let kind = if &caps[2] == "submissions" { "submissions" } else { "comments" };
            map.entry((sub, kind)).or_insert(path);
        }
    }
    Discovered { map }
}

/// The fixed output directory tree. Mirrors the layout the exports expect:
/// `<root>/`, `<root>/monthly/`, `<root>/monthly/freq/`,
/// `<root>/freq-over-time/`.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    pub root: PathBuf,
}

impl OutputLayout {
    pub fn create(root: &Path) -> Result<Self> {
        let layout = Self { root: root.to_path_buf() };
        for dir in [layout.root.clone(), layout.monthly_dir(), layout.monthly_freq_dir(), layout.freq_over_time_dir()] {
            fs::create_dir_all(&dir).with_context(|| format!("create output dir {}", dir.display()))?;
        }
        Ok(layout)
    }

    pub fn monthly_dir(&self) -> PathBuf {
        self.root.join("monthly")
    }
    pub fn monthly_freq_dir(&self) -> PathBuf {
        self.monthly_dir().join("freq")
    }
    pub fn freq_over_time_dir(&self) -> PathBuf {
        self.root.join("freq-over-time")
    }

    pub fn records_csv(&self, subreddit: &str, kind: RecordKind) -> PathBuf {
        self.root.join(format!("{}_{}.csv", subreddit, kind.as_str()))
    }
    pub fn records_json(&self, subreddit: &str, kind: RecordKind) -> PathBuf {
        self.root.join(format!("{}_{}.json", subreddit, kind.as_str()))
    }
    pub fn grouped_csv(&self, subreddit: &str, kind: RecordKind, head: &str) -> PathBuf {
        self.root.join(format!("{}_{}_{}.csv", subreddit, kind.as_str(), head))
    }
    pub fn monthly_text(&self, subreddit: &str, month: &str) -> PathBuf {
        self.monthly_dir().join(format!("{subreddit}_{month}.txt"))
    }
    pub fn monthly_freq_csv(&self, subreddit: &str, month: &str) -> PathBuf {
        self.monthly_freq_dir().join(format!("{subreddit}_{month}.csv"))
    }
    pub fn corpus_freq_csv(&self, subreddit: &str) -> PathBuf {
        self.freq_over_time_dir().join(format!("{subreddit}_corpus_freq.csv"))
    }
    pub fn monthly_freq_matrix_csv(&self, subreddit: &str) -> PathBuf {
        self.freq_over_time_dir().join(format!("{subreddit}_monthly_freq.csv"))
    }
    pub fn monthly_count_matrix_csv(&self, subreddit: &str) -> PathBuf {
        self.freq_over_time_dir().join(format!("{subreddit}_monthly_count.csv"))
    }
    pub fn ngram_csv(&self, subreddit: &str, n: usize) -> PathBuf {
        let name = match n {
            2 => "bigrams",
            3 => "trigrams",
            _ => "ngrams",
        };
        self.freq_over_time_dir().join(format!("{subreddit}_{name}.csv"))
    }
}
