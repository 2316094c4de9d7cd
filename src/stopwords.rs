//! Stopword assembly: a built-in generic English list unioned with the
//! run's domain-specific exclusion terms (keyword tokens plus configured
//! extras), deduplicated preserving first-seen order.

use ahash::AHashSet;

/// Generic English stopwords (the usual corpus-linguistics list).
pub const GENERIC_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// The combined stopword set for a run.
///
/// `domain` keeps the first-seen-ordered, deduplicated domain terms for
/// reporting; membership tests go through hashed sets.
pub struct StopwordSet {
    generic: AHashSet<String>,
    combined: AHashSet<String>,
    domain: Vec<String>,
}

impl StopwordSet {
    /// Assemble from the run's keywords and extra exclusion terms.
    ///
    /// Keywords are split on whitespace so multi-word keywords contribute
    /// their individual tokens, matching how the frequency stage sees text.
    /// Domain terms already present in the generic list are dropped from
    /// the reported domain list.
    pub fn build(keywords: &[String], extra: &[String]) -> Self {
        let generic: AHashSet<String> = GENERIC_STOPWORDS.iter().map(|s| s.to_string()).collect();

        let mut seen: AHashSet<String> = AHashSet::new();
        let mut domain: Vec<String> = Vec::new();
        let candidates = keywords
            .iter()
            .flat_map(|k| k.split_whitespace())
            .chain(extra.iter().map(|s| s.as_str()));
        for raw in candidates {
            let w = raw.to_lowercase();
            if w.is_empty() || generic.contains(&w) || seen.contains(&w) {
                continue;
            }
            seen.insert(w.clone());
            domain.push(w);
        }

        let mut combined = generic.clone();
        combined.extend(domain.iter().cloned());

        Self { generic, combined, domain }
    }

    /// Membership in the combined (generic + domain) set.
    pub fn is_stopword(&self, word_lower: &str) -> bool {
        self.combined.contains(word_lower)
    }

    /// Membership in the generic list only. The n-gram stream is filtered
    /// with this weaker test so multi-word domain phrases stay visible.
    pub fn is_generic(&self, word_lower: &str) -> bool {
        self.generic.contains(word_lower)
    }

    /// Deduplicated domain terms in first-seen order.
    pub fn domain_terms(&self) -> &[String] {
        &self.domain
    }
}
