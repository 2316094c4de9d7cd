use anyhow::{anyhow, Context, Result};

use ahash::AHashMap;

use crate::config::{CommentSelection, MalformedPolicy, OrderPolicy, SiftOptions};
use crate::corpus::MonthlyCorpus;
use crate::date::YearMonth;
use crate::export;
use crate::ingest::{scan_comments_keywords, scan_comments_thread, scan_submissions};
use crate::paths::{discover_inputs, Discovered, InputFile, OutputLayout, RecordKind};
use crate::progress::{file_size, make_progress_bar_labeled};
use crate::records::{Comment, Submission};
use crate::stopwords::StopwordSet;
use crate::text::{KeywordMatcher, TextNormalizer};
use crate::threads::ThreadIndex;
use crate::util::init_tracing_once;

/// The pipeline entry point: configure with builder methods, then `run()`.
#[derive(Clone)]
pub struct RedditSift {
    pub(crate) opts: SiftOptions,
}

impl Default for RedditSift {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-subreddit retention counts, returned by `run()` for reporting.
#[derive(Debug)]
pub struct SubredditSummary {
    pub subreddit: String,
    pub submissions_kept: usize,
    pub comments_kept: usize,
    pub months: usize,
}

#[derive(Debug, Default)]
pub struct SiftSummary {
    pub subreddits: Vec<SubredditSummary>,
}

impl RedditSift {
    pub fn new() -> Self {
        Self { opts: SiftOptions::default() }
    }

    // -------- Builder methods --------
    pub fn base_dir(mut self, dir: impl AsRef<std::path::Path>) -> Self { self.opts = self.opts.with_base_dir(dir); self }
    pub fn output_dir(mut self, dir: impl AsRef<std::path::Path>) -> Self { self.opts = self.opts.with_output_dir(dir); self }
    pub fn subreddits<I, S>(mut self, subs: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> { self.opts = self.opts.with_subreddits(subs); self }
    pub fn keywords<I, S>(mut self, kws: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> { self.opts = self.opts.with_keywords(kws); self }
    pub fn keyword_groups<I, G, S>(mut self, groups: I) -> Self where I: IntoIterator<Item = G>, G: IntoIterator<Item = S>, S: Into<String> { self.opts = self.opts.with_keyword_groups(groups); self }
    pub fn extra_stopwords<I, S>(mut self, words: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> { self.opts = self.opts.with_extra_stopwords(words); self }
    pub fn comment_selection(mut self, sel: CommentSelection) -> Self { self.opts = self.opts.with_comment_selection(sel); self }
    pub fn malformed_policy(mut self, policy: MalformedPolicy) -> Self { self.opts = self.opts.with_malformed_policy(policy); self }
    pub fn order_policy(mut self, policy: OrderPolicy) -> Self { self.opts = self.opts.with_order_policy(policy); self }
    pub fn sample(mut self, yes: bool) -> Self { self.opts = self.opts.with_sample(yes); self }
    pub fn top_corpus_words(mut self, n: usize) -> Self { self.opts = self.opts.with_top_corpus_words(n); self }
    pub fn top_matrix_words(mut self, n: usize) -> Self { self.opts = self.opts.with_top_matrix_words(n); self }
    pub fn top_monthly_words(mut self, n: usize) -> Self { self.opts = self.opts.with_top_monthly_words(n); self }
    pub fn top_ngrams(mut self, n: usize) -> Self { self.opts = self.opts.with_top_ngrams(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self { self.opts = self.opts.with_io_buffers(read_bytes, write_bytes); self }

    /// Run the full pipeline: filter, thread-link, export, aggregate, for
    /// every configured subreddit.
    pub fn run(&self) -> Result<SiftSummary> {
        init_tracing_once();
        if self.opts.subreddits.is_empty() {
            return Err(anyhow!("at least one subreddit is required"));
        }
        if self.opts.keywords.is_empty() {
            return Err(anyhow!("at least one keyword is required"));
        }

        let layout = OutputLayout::create(&self.opts.output_dir)?;
        let discovered = discover_inputs(&self.opts.base_dir, self.opts.sample);

        let normalizer = TextNormalizer::new();
        let matcher = KeywordMatcher::new(&self.opts.keywords, &normalizer);
        let stopwords = StopwordSet::build(&self.opts.keywords, &self.opts.extra_stopwords);
        tracing::info!(domain_terms = ?stopwords.domain_terms(), "assembled stopword set");

        let mut summary = SiftSummary::default();
        for sub in &self.opts.subreddits {
            let s = self.run_subreddit(sub, &discovered, &layout, &normalizer, &matcher, &stopwords)?;
            tracing::info!(
                subreddit = %s.subreddit,
                submissions = s.submissions_kept,
                comments = s.comments_kept,
                months = s.months,
                "subreddit done"
            );
            summary.subreddits.push(s);
        }
        Ok(summary)
    }

    /// Grouped-scan variant: filter each subreddit once per keyword group
    /// and export one CSV pair per group, named after the group's first
    /// keyword. Keyword mode only; no threading or aggregation.
    pub fn run_keyword_groups(&self) -> Result<()> {
        init_tracing_once();
        let groups = self
            .opts
            .keyword_groups
            .as_ref()
            .ok_or_else(|| anyhow!("keyword groups are not configured"))?
            .clone();
        if self.opts.subreddits.is_empty() {
            return Err(anyhow!("at least one subreddit is required"));
        }

        let layout = OutputLayout::create(&self.opts.output_dir)?;
        let discovered = discover_inputs(&self.opts.base_dir, self.opts.sample);
        let normalizer = TextNormalizer::new();

        for sub in &self.opts.subreddits {
            let sub_input = self.require_input(&discovered, sub, RecordKind::Submission)?;
            let com_input = self.require_input(&discovered, sub, RecordKind::Comment)?;

            for group in &groups {
                let head = group
                    .first()
                    .map(|k| k.trim().split_whitespace().collect::<Vec<_>>().join("_"))
                    .unwrap_or_default();
                if head.is_empty() {
                    continue;
                }
                let matcher = KeywordMatcher::new(group, &normalizer);

                let pb = self.make_bar(&[&sub_input, &com_input], &format!("{sub} [{head}]"));
                let submissions = scan_submissions(
                    &sub_input, &matcher, &normalizer,
                    self.opts.malformed, self.opts.read_buffer_bytes, pb.as_ref(),
                )?;
                let comments = scan_comments_keywords(
                    &com_input, &matcher, &normalizer,
                    self.opts.malformed, self.opts.read_buffer_bytes, pb.as_ref(),
                )?;
                if let Some(pb) = pb {
                    pb.finish_with_message("done");
                }

                export::write_submissions_csv(
                    &layout.grouped_csv(sub, RecordKind::Submission, &head),
                    &submissions,
                    self.opts.write_buffer_bytes,
                )?;
                export::write_comments_csv(
                    &layout.grouped_csv(sub, RecordKind::Comment, &head),
                    &comments,
                    CommentSelection::Keywords,
                    self.opts.write_buffer_bytes,
                )?;
            }
        }
        Ok(())
    }

    fn require_input(&self, discovered: &Discovered, sub: &str, kind: RecordKind) -> Result<InputFile> {
        discovered.get(sub, kind).ok_or_else(|| {
            anyhow!(
                "no {} dump for r/{} under {}",
                kind.as_str(),
                sub,
                self.opts.base_dir.display()
            )
        })
    }

    fn make_bar(&self, inputs: &[&InputFile], label: &str) -> Option<indicatif::ProgressBar> {
        if !self.opts.progress {
            return None;
        }
        let total: u64 = inputs.iter().map(|i| file_size(&i.path)).sum();
        let label = match self.opts.progress_label.as_deref() {
            Some(l) => format!("{l} {label}"),
            None => label.to_string(),
        };
        Some(make_progress_bar_labeled(total, Some(&label)))
    }

    fn run_subreddit(
        &self,
        sub: &str,
        discovered: &Discovered,
        layout: &OutputLayout,
        normalizer: &TextNormalizer,
        matcher: &KeywordMatcher,
        stopwords: &StopwordSet,
    ) -> Result<SubredditSummary> {
        let sub_input = self.require_input(discovered, sub, RecordKind::Submission)?;
        let com_input = self.require_input(discovered, sub, RecordKind::Comment)?;
        let pb = self.make_bar(&[&sub_input, &com_input], sub);

        // ---- Pass 1: submissions ----
        let submissions = scan_submissions(
            &sub_input, matcher, normalizer,
            self.opts.malformed, self.opts.read_buffer_bytes, pb.as_ref(),
        )
        .with_context(|| format!("scanning {}", sub_input.path.display()))?;

        let mut index = ThreadIndex::new();
        let mut titles: AHashMap<String, String> = AHashMap::new();
        let mut months: AHashMap<String, YearMonth> = AHashMap::new();
        for s in &submissions {
            index.insert_submission(&s.id);
            titles.insert(s.id.clone(), s.title.clone());
            months.insert(s.id.clone(), s.month);
        }

        // ---- Pass 2: comments ----
        let comments = match self.opts.comment_selection {
            CommentSelection::Keywords => scan_comments_keywords(
                &com_input, matcher, normalizer,
                self.opts.malformed, self.opts.read_buffer_bytes, pb.as_ref(),
            ),
            CommentSelection::ThreadMembership => scan_comments_thread(
                &com_input, &mut index, &titles,
                self.opts.malformed, self.opts.order_policy,
                self.opts.read_buffer_bytes, pb.as_ref(),
            ),
        }
        .with_context(|| format!("scanning {}", com_input.path.display()))?;

        if let Some(pb) = pb {
            pb.finish_with_message(format!("{sub} done"));
        }

        // ---- Record exports ----
        export::write_submissions_csv(
            &layout.records_csv(sub, RecordKind::Submission),
            &submissions,
            self.opts.write_buffer_bytes,
        )?;
        export::write_records_json(
            &layout.records_json(sub, RecordKind::Submission),
            submissions.iter().map(|s| (s.id.clone(), s)),
            self.opts.write_buffer_bytes,
        )?;
        export::write_comments_csv(
            &layout.records_csv(sub, RecordKind::Comment),
            &comments,
            self.opts.comment_selection,
            self.opts.write_buffer_bytes,
        )?;
        export::write_records_json(
            &layout.records_json(sub, RecordKind::Comment),
            comments.iter().map(|c| (c.id.clone(), c)),
            self.opts.write_buffer_bytes,
        )?;

        // ---- Aggregation ----
        let corpus = self.build_corpus(&submissions, &comments, &months, normalizer, stopwords);

        export::write_monthly_texts(layout, sub, &corpus, self.opts.write_buffer_bytes)?;
        export::write_monthly_freq(
            layout, sub, &corpus, stopwords,
            self.opts.top_monthly_words, self.opts.write_buffer_bytes,
        )?;

        let corpus_table = corpus.corpus_table(stopwords);
        export::write_corpus_freq(
            &layout.corpus_freq_csv(sub),
            &corpus_table,
            self.opts.top_corpus_words,
            self.opts.write_buffer_bytes,
        )?;

        let top_words: Vec<String> = corpus_table
            .most_common(self.opts.top_matrix_words)
            .into_iter()
            .map(|(w, _)| w.to_string())
            .collect();
        let matrix = corpus.matrix(&top_words, stopwords);
        export::write_monthly_freq_matrix(
            &layout.monthly_freq_matrix_csv(sub),
            &matrix,
            self.opts.write_buffer_bytes,
        )?;
        export::write_monthly_count_matrix(
            &layout.monthly_count_matrix_csv(sub),
            &matrix,
            self.opts.write_buffer_bytes,
        )?;

        export::write_ngram_csv(
            &layout.ngram_csv(sub, 2),
            corpus.bigrams(),
            self.opts.top_ngrams,
            self.opts.write_buffer_bytes,
        )?;
        export::write_ngram_csv(
            &layout.ngram_csv(sub, 3),
            corpus.trigrams(),
            self.opts.top_ngrams,
            self.opts.write_buffer_bytes,
        )?;

        Ok(SubredditSummary {
            subreddit: sub.to_string(),
            submissions_kept: submissions.len(),
            comments_kept: comments.len(),
            months: corpus.months().count(),
        })
    }

    /// Bucket retained text by month. Submissions contribute title+selftext
    /// under their own month; comments contribute their body under the
    /// owning submission's month when threading resolved one (sparse-bucket
    /// avoidance), else their own month.
    fn build_corpus(
        &self,
        submissions: &[Submission],
        comments: &[Comment],
        submission_months: &AHashMap<String, YearMonth>,
        normalizer: &TextNormalizer,
        stopwords: &StopwordSet,
    ) -> MonthlyCorpus {
        let mut corpus = MonthlyCorpus::new();
        for s in submissions {
            let text = format!("{} {}", s.title, s.selftext);
            let tokens = normalizer.tokens(&text);
            corpus.add_record(s.month, &tokens, stopwords);
        }
        for c in comments {
            let month = c
                .submission_id
                .as_deref()
                .and_then(|sid| submission_months.get(sid).copied())
                .unwrap_or(c.month);
            let tokens = normalizer.tokens(&c.body);
            corpus.add_record(month, &tokens, stopwords);
        }
        corpus
    }
}
