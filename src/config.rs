use std::path::{Path, PathBuf};

/// How comments are selected for retention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentSelection {
    /// Keep a comment iff its own body matches a keyword. No threading
    /// columns are produced.
    Keywords,
    /// Keep a comment iff its parent is a retained submission or an
    /// already-retained comment, and resolve its owning submission.
    ThreadMembership,
}

/// What to do with lines that fail to parse or lack required fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort the run with file/line context (recommended for archives
    /// you expect to be clean).
    Fail,
    /// Log a warning and drop the line.
    Skip,
}

/// What to do when thread reconstruction detects a chronology violation
/// (a parent-walk cycle).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderPolicy {
    /// Abort the run.
    Fail,
    /// Log a warning and drop the offending comment.
    Skip,
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct SiftOptions {
    pub base_dir: PathBuf,
    pub output_dir: PathBuf,
    pub subreddits: Vec<String>,          // normalized lowercase, no "r/"
    pub keywords: Vec<String>,            // matched whole-word against normalized text
    pub keyword_groups: Option<Vec<Vec<String>>>, // per-group export variant
    pub extra_stopwords: Vec<String>,     // domain terms beyond the keyword tokens
    pub comment_selection: CommentSelection,
    pub malformed: MalformedPolicy,
    pub order_policy: OrderPolicy,
    pub sample: bool,                     // read the *_sample input variants

    // frequency-table sizes
    pub top_corpus_words: usize,          // whole-corpus word,count,frequency rows
    pub top_matrix_words: usize,          // columns of the monthly matrices
    pub top_monthly_words: usize,         // rows of each per-month table
    pub top_ngrams: usize,                // rows of the bigram/trigram tables

    pub progress: bool,
    pub progress_label: Option<String>,

    // IO tuning
    pub read_buffer_bytes: usize,
    pub write_buffer_bytes: usize,
}

impl Default for SiftOptions {
    fn default() -> Self {
        let default_read = 256 * 1024;
        let default_write = 256 * 1024;

        Self {
            base_dir: PathBuf::from("./data"),
            output_dir: PathBuf::from("./output"),
            subreddits: Vec::new(),
            keywords: Vec::new(),
            keyword_groups: None,
            extra_stopwords: Vec::new(),
            comment_selection: CommentSelection::ThreadMembership,
            malformed: MalformedPolicy::Fail,
            order_policy: OrderPolicy::Skip,
            sample: false,

            top_corpus_words: 100,
            top_matrix_words: 20,
            top_monthly_words: 20,
            top_ngrams: 50,

            progress: true,
            progress_label: None,

            read_buffer_bytes: default_read,
            write_buffer_bytes: default_write,
        }
    }
}

impl SiftOptions {
    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = base_dir.as_ref().to_path_buf();
        self
    }
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_subreddits<I, S>(mut self, subs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subreddits = subs.into_iter().map(|s| normalize_subreddit(s.as_ref())).collect();
        self
    }
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_keyword_groups<I, G, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyword_groups = Some(
            groups
                .into_iter()
                .map(|g| g.into_iter().map(Into::into).collect())
                .collect(),
        );
        self
    }
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stopwords = words.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_comment_selection(mut self, sel: CommentSelection) -> Self {
        self.comment_selection = sel;
        self
    }
    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }
    pub fn with_order_policy(mut self, policy: OrderPolicy) -> Self {
        self.order_policy = policy;
        self
    }
    pub fn with_sample(mut self, yes: bool) -> Self {
        self.sample = yes;
        self
    }
    pub fn with_top_corpus_words(mut self, n: usize) -> Self {
        self.top_corpus_words = n.max(1);
        self
    }
    pub fn with_top_matrix_words(mut self, n: usize) -> Self {
        self.top_matrix_words = n.max(1);
        self
    }
    pub fn with_top_monthly_words(mut self, n: usize) -> Self {
        self.top_monthly_words = n.max(1);
        self
    }
    pub fn with_top_ngrams(mut self, n: usize) -> Self {
        self.top_ngrams = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }
}

/// Lowercase, trim, and strip a leading "r/" from a subreddit name.
pub fn normalize_subreddit(s: &str) -> String {
    let s = s.trim().to_lowercase();
    if let Some(rest) = s.strip_prefix("r/") {
        rest.to_string()
    } else {
        s
    }
}
