mod config;
mod corpus;
mod date;
mod export;
mod freq;
mod ingest;
mod jsonl;
mod paths;
mod pipeline;
mod progress;
mod records;
mod stopwords;
mod text;
mod threads;
mod util;

pub use crate::config::{CommentSelection, MalformedPolicy, OrderPolicy, SiftOptions};
pub use crate::date::{date_from_epoch, YearMonth};
pub use crate::pipeline::{RedditSift, SiftSummary, SubredditSummary};

pub use crate::corpus::{MonthlyCorpus, MonthlyMatrix};
pub use crate::freq::{count_ngrams, FreqTable};
pub use crate::records::{Comment, RawComment, RawSubmission, Submission, PERMALINK_SENTINEL};
pub use crate::stopwords::{StopwordSet, GENERIC_STOPWORDS};
pub use crate::text::{KeywordMatcher, TextNormalizer};
pub use crate::threads::{ChronologyViolation, Resolution, ThreadIndex};

// Expose the export schemas and writers so downstream analysis scripts can
// reproduce individual outputs without re-running the whole pipeline.
pub use crate::export::{
    write_comments_csv, write_corpus_freq, write_monthly_count_matrix, write_monthly_freq_matrix,
    write_ngram_csv, write_submissions_csv, COMMENT_COLUMNS_KEYWORD, COMMENT_COLUMNS_THREAD,
    SUBMISSION_COLUMNS,
};

// Expose input discovery and the output tree for tests and callers that
// stage their own files.
pub use crate::paths::{discover_inputs, InputFile, OutputLayout, RecordKind};
