//! The single forward pass over one dump file: parse, filter, thread-link,
//! retain.

use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;

use ahash::AHashMap;

use crate::config::{MalformedPolicy, OrderPolicy};
use crate::jsonl::for_each_line_with_progress;
use crate::paths::InputFile;
use crate::records::{Comment, RawComment, RawSubmission, Submission};
use crate::text::{KeywordMatcher, TextNormalizer};
use crate::threads::{Resolution, ThreadIndex};

fn handle_malformed(
    policy: MalformedPolicy,
    input: &InputFile,
    line_no: u64,
    err: serde_json::Error,
) -> Result<()> {
    match policy {
        MalformedPolicy::Fail => Err(anyhow!(err))
            .with_context(|| format!("malformed record at {}:{}", input.path.display(), line_no)),
        MalformedPolicy::Skip => {
            tracing::warn!(path = %input.path.display(), line = line_no, error = %err, "skipping malformed record");
            Ok(())
        }
    }
}

/// Scan a submissions dump, retaining records whose normalized title or
/// selftext contains a keyword.
pub fn scan_submissions(
    input: &InputFile,
    matcher: &KeywordMatcher,
    normalizer: &TextNormalizer,
    malformed: MalformedPolicy,
    read_buf_bytes: usize,
    pb: Option<&ProgressBar>,
) -> Result<Vec<Submission>> {
    let mut kept = Vec::new();
    for_each_line_with_progress(
        &input.path,
        read_buf_bytes,
        |delta| {
            if let Some(pb) = pb {
                pb.inc(delta);
            }
        },
        &mut |line_no, line| {
            let raw: RawSubmission = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(e) => return handle_malformed(malformed, input, line_no, e),
            };
            let title = normalizer.normalize_padded(&raw.title);
            let selftext = normalizer.normalize_padded(&raw.selftext);
            if matcher.matches_normalized(&[&title, &selftext]) {
                kept.push(Submission::from_raw(raw));
            }
            Ok(())
        },
    )?;
    Ok(kept)
}

/// Scan a comments dump in keyword mode: a comment is retained iff its
/// normalized body contains a keyword. No thread resolution is performed.
pub fn scan_comments_keywords(
    input: &InputFile,
    matcher: &KeywordMatcher,
    normalizer: &TextNormalizer,
    malformed: MalformedPolicy,
    read_buf_bytes: usize,
    pb: Option<&ProgressBar>,
) -> Result<Vec<Comment>> {
    let mut kept = Vec::new();
    for_each_line_with_progress(
        &input.path,
        read_buf_bytes,
        |delta| {
            if let Some(pb) = pb {
                pb.inc(delta);
            }
        },
        &mut |line_no, line| {
            let raw: RawComment = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(e) => return handle_malformed(malformed, input, line_no, e),
            };
            let body = normalizer.normalize_padded(&raw.body);
            if matcher.matches_normalized(&[&body]) {
                kept.push(Comment::from_raw(raw));
            }
            Ok(())
        },
    )?;
    Ok(kept)
}

/// Scan a comments dump in thread-membership mode: a comment is retained
/// iff its parent is a retained submission or an already-retained comment.
/// Retained comments get their owning submission resolved and are indexed
/// so later comments can chain through them — this relies on the archive's
/// chronological ordering, with violations routed through `order_policy`.
pub fn scan_comments_thread(
    input: &InputFile,
    index: &mut ThreadIndex,
    submission_titles: &AHashMap<String, String>,
    malformed: MalformedPolicy,
    order_policy: OrderPolicy,
    read_buf_bytes: usize,
    pb: Option<&ProgressBar>,
) -> Result<Vec<Comment>> {
    let mut kept = Vec::new();
    for_each_line_with_progress(
        &input.path,
        read_buf_bytes,
        |delta| {
            if let Some(pb) = pb {
                pb.inc(delta);
            }
        },
        &mut |line_no, line| {
            let raw: RawComment = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(e) => return handle_malformed(malformed, input, line_no, e),
            };
            if !index.contains(&raw.parent_id) {
                return Ok(());
            }
            let mut comment = Comment::from_raw(raw);
            match index.resolve(&comment.parent_id) {
                Ok(Resolution::Submission(sid)) => {
                    comment.submission_title = submission_titles.get(&sid).cloned();
                    comment.submission_id = Some(sid);
                }
                Ok(Resolution::Unresolved) => {
                    // Parent passed the membership gate, so the chain can
                    // only dead-end if the index was built inconsistently.
                    tracing::warn!(id = %comment.id, "retained comment did not resolve to a submission");
                }
                Err(violation) => match order_policy {
                    OrderPolicy::Fail => {
                        return Err(anyhow!(violation)).with_context(|| {
                            format!("chronology violation at {}:{}", input.path.display(), line_no)
                        });
                    }
                    OrderPolicy::Skip => {
                        tracing::warn!(id = %comment.id, %violation, "dropping comment");
                        return Ok(());
                    }
                },
            }
            index.insert_comment(&comment.id, &comment.parent_id);
            kept.push(comment);
            Ok(())
        },
    )?;
    Ok(kept)
}
