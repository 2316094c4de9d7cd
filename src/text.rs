//! Text normalization, tokenization, and whole-word keyword matching.

use regex::Regex;

/// Compiled patterns for normalization and tokenization, built once per run.
pub struct TextNormalizer {
    non_word: Regex,
    word: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            // Underscore counts as punctuation for matching purposes.
            non_word: Regex::new(r"[\W_]+").unwrap(),
            word: Regex::new(r"\w+").unwrap(),
        }
    }

    /// Lowercase, collapse every non-alphanumeric run to a single space,
    /// and pad with exactly one leading and one trailing space. The padding
    /// lets whole-word keyword containment be tested as plain substring
    /// search without firing on partial words. Collapsed edges are trimmed
    /// first so leading/trailing punctuation or whitespace never doubles
    /// the pad ("Autism." and "AUTISM" normalize identically).
    pub fn normalize_padded(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let collapsed = self.non_word.replace_all(&lowered, " ");
        format!(" {} ", collapsed.trim())
    }

    /// Word-like tokens (alphanumeric/underscore runs), unmodified case.
    pub fn tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.word.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// A keyword list prepared for whole-word containment tests against
/// normalized text. Keywords themselves are normalized the same way the
/// haystack is, so multi-word and punctuated keywords match boundary-safely.
pub struct KeywordMatcher {
    padded: Vec<String>,
}

impl KeywordMatcher {
    pub fn new(keywords: &[String], normalizer: &TextNormalizer) -> Self {
        let padded = keywords
            .iter()
            .map(|k| normalizer.normalize_padded(k))
            .filter(|k| k.trim() != "")
            .collect();
        Self { padded }
    }

    pub fn is_empty(&self) -> bool {
        self.padded.is_empty()
    }

    /// True iff any keyword appears as a space-delimited substring of any
    /// of the already-normalized haystacks.
    pub fn matches_normalized(&self, haystacks: &[&str]) -> bool {
        self.padded
            .iter()
            .any(|kw| haystacks.iter().any(|h| h.contains(kw.as_str())))
    }

    /// Normalize `parts` and test each against the keyword list.
    pub fn matches(&self, parts: &[&str], normalizer: &TextNormalizer) -> bool {
        let normalized: Vec<String> = parts.iter().map(|p| normalizer.normalize_padded(p)).collect();
        let refs: Vec<&str> = normalized.iter().map(|s| s.as_str()).collect();
        self.matches_normalized(&refs)
    }
}
