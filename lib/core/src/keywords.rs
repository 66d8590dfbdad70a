//! Keyword extraction from transcripts
//!
//! Keywords are lower-cased content words. Sets are ordered so that anything
//! derived from them (shared interests, reason text) is deterministic.

use ahash::AHashSet;
use std::collections::BTreeSet;

/// Extracts a set of lower-cased keywords from free text
pub trait KeywordExtractor: Send + Sync {
    fn extract(&self, text: &str) -> BTreeSet<String>;
}

/// Greetings and filler that carry no interest signal
const FILLER_WORDS: &[&str] = &[
    "love", "like", "hello", "hi", "hey", "yes", "my", "name", "also", "the", "a", "an", "i",
];

/// Function words: pronouns, articles, conjunctions, prepositions, auxiliaries
const FUNCTION_WORDS: &[&str] = &[
    "me", "mine", "myself", "you", "your", "yours", "he", "him", "his", "she", "her", "hers",
    "it", "its", "we", "us", "our", "ours", "they", "them", "their", "theirs", "this", "that",
    "these", "those", "who", "whom", "whose", "which", "what", "and", "or", "but", "nor", "so",
    "yet", "if", "then", "than", "because", "as", "while", "of", "in", "on", "at", "to", "for",
    "from", "by", "with", "about", "into", "over", "under", "up", "down", "out", "off", "am",
    "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "not",
    "no", "very", "really", "just", "too", "all", "any", "some", "each", "every", "more",
    "most", "much", "many", "there", "here", "when", "where", "why", "how", "oh", "um", "uh",
    "okay", "ok", "well", "im", "dont", "thing", "things", "lot",
];

/// Lexical keyword extractor.
///
/// Splits on anything that is not an alphabetic character, lower-cases, and
/// drops short tokens and a fixed stopword list standing in for a
/// part-of-speech filter.
#[derive(Debug, Clone)]
pub struct LexicalKeywordExtractor {
    stop_words: AHashSet<String>,
    min_len: usize,
}

impl LexicalKeywordExtractor {
    pub fn new() -> Self {
        let stop_words = FILLER_WORDS
            .iter()
            .chain(FUNCTION_WORDS)
            .map(|w| w.to_string())
            .collect();
        Self {
            stop_words,
            min_len: 2,
        }
    }

    /// Add extra stopwords on top of the built-in list
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }
}

impl Default for LexicalKeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor for LexicalKeywordExtractor {
    fn extract(&self, text: &str) -> BTreeSet<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphabetic())
            .filter(|token| token.chars().count() >= self.min_len)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_extracts_content_words() {
        let extractor = LexicalKeywordExtractor::new();
        let kws = extractor.extract("I love hiking and cooking");
        assert_eq!(words(&kws), vec!["cooking", "hiking"]);
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let extractor = LexicalKeywordExtractor::new();
        let kws = extractor.extract("Hey! My name is Sam. Painting, JAZZ... and jazz.");
        assert_eq!(words(&kws), vec!["jazz", "painting", "sam"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(LexicalKeywordExtractor::new().extract("   ").is_empty());
    }

    #[test]
    fn test_extra_stop_words() {
        let extractor = LexicalKeywordExtractor::new().with_stop_words(["Enjoy"]);
        let kws = extractor.extract("I enjoy painting");
        assert_eq!(words(&kws), vec!["painting"]);
    }
}
