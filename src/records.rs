//! Wire-format and retained record types.
//!
//! Raw records mirror the archive JSON; field presence and types drift
//! across archive eras (`created_utc` appears as int, float, or string;
//! `permalink` may be absent entirely). Retained records carry the derived
//! fields the exports need.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::date::{date_from_epoch, YearMonth};

/// Sentinel used when an archive record has no permalink field.
pub const PERMALINK_SENTINEL: &str = "NONE";

const REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Reddit thing-type prefix for submissions ("links").
pub const SUBMISSION_PREFIX: &str = "t3_";
/// Reddit thing-type prefix for comments.
pub const COMMENT_PREFIX: &str = "t1_";

/// `created_utc` drifts across archive eras: integer seconds, float
/// seconds, or a decimal string. All collapse to whole seconds.
fn epoch_seconds<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }
    match Raw::deserialize(de)? {
        Raw::Int(n) => Ok(n),
        Raw::Float(f) => Ok(f as i64),
        Raw::Text(s) => {
            // Some eras ship "1136073600.0".
            if let Ok(n) = s.parse::<i64>() {
                Ok(n)
            } else if let Ok(f) = s.parse::<f64>() {
                Ok(f as i64)
            } else {
                Err(D::Error::custom(format!("invalid created_utc: {s:?}")))
            }
        }
    }
}

/// A submission line as stored in the archive. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RawSubmission {
    pub subreddit: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub score: i64,
    pub url: String,
    pub id: String,
    pub permalink: Option<String>,
    #[serde(deserialize_with = "epoch_seconds")]
    pub created_utc: i64,
}

/// A comment line as stored in the archive. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RawComment {
    pub subreddit: String,
    pub author: String,
    pub score: i64,
    pub body: String,
    pub id: String,
    pub parent_id: String,
    pub permalink: Option<String>,
    #[serde(deserialize_with = "epoch_seconds")]
    pub created_utc: i64,
}

fn export_permalink(raw: Option<String>) -> String {
    match raw {
        Some(p) => format!("{REDDIT_BASE_URL}{p}"),
        None => PERMALINK_SENTINEL.to_string(),
    }
}

/// A retained submission with derived fields. `id` is the full
/// `t3_`-prefixed identifier.
#[derive(Clone, Debug, Serialize)]
pub struct Submission {
    pub subreddit: String,
    pub title: String,
    pub author: String,
    pub score: i64,
    pub selftext: String,
    pub url: String,
    pub id: String,
    pub permalink: String,
    pub created_utc: i64,
    pub date: String,
    pub month: YearMonth,
}

impl Submission {
    pub fn from_raw(raw: RawSubmission) -> Self {
        let ts = raw.created_utc;
        Self {
            subreddit: raw.subreddit,
            title: raw.title,
            author: raw.author,
            score: raw.score,
            selftext: raw.selftext,
            url: raw.url,
            id: format!("{SUBMISSION_PREFIX}{}", raw.id),
            permalink: export_permalink(raw.permalink),
            created_utc: ts,
            date: date_from_epoch(ts),
            month: YearMonth::from_epoch(ts),
        }
    }
}

/// A retained comment with derived fields. `id` is the full `t1_`-prefixed
/// identifier; `submission_id`/`submission_title` are populated only when
/// thread resolution is active.
#[derive(Clone, Debug, Serialize)]
pub struct Comment {
    pub subreddit: String,
    pub author: String,
    pub score: i64,
    pub body: String,
    pub id: String,
    pub parent_id: String,
    pub submission_id: Option<String>,
    pub submission_title: Option<String>,
    pub permalink: String,
    pub created_utc: i64,
    pub date: String,
    pub month: YearMonth,
}

impl Comment {
    pub fn from_raw(raw: RawComment) -> Self {
        let ts = raw.created_utc;
        Self {
            subreddit: raw.subreddit,
            author: raw.author,
            score: raw.score,
            body: raw.body,
            id: format!("{COMMENT_PREFIX}{}", raw.id),
            parent_id: raw.parent_id,
            submission_id: None,
            submission_title: None,
            permalink: export_permalink(raw.permalink),
            created_utc: ts,
            date: date_from_epoch(ts),
            month: YearMonth::from_epoch(ts),
        }
    }
}
