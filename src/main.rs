use anyhow::Result;
use redsift::{CommentSelection, RedditSift};

// Configuration is edited here directly: the archive scans are one-off
// research runs, not a deployed tool.
const DATA_ROOT: &str = "./data";
const OUTPUT_ROOT: &str = "./output";
const SAMPLE: bool = false;

fn main() -> Result<()> {
    let subreddits = ["breastcancer"];
    let keywords = [
        "aesthetic closure",
        "goldilocks",
        "goldilock",
        "explant",
        "flat chest",
        "aesthetic flat",
        "going flat",
        "went flat",
        "stay flat",
        "flat closure",
        "flat ambassador",
        "flatties",
    ];
    let extra_stopwords = [
        "breast", "breasts", "cancer", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10",
    ];

    let summary = RedditSift::new()
        .base_dir(DATA_ROOT)
        .output_dir(OUTPUT_ROOT)
        .subreddits(subreddits)
        .keywords(keywords)
        .extra_stopwords(extra_stopwords)
        .comment_selection(CommentSelection::ThreadMembership)
        .sample(SAMPLE)
        .progress(true)
        .run()?;

    for s in &summary.subreddits {
        println!(
            "r/{}: kept {} submissions, {} comments across {} months",
            s.subreddit, s.submissions_kept, s.comments_kept, s.months
        );
    }
    Ok(())
}
