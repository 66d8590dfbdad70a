use ahash::AHashSet;
use serde::Serialize;
use std::collections::BTreeSet;

/// Generic affect words that say nothing about a shared interest
pub const DEFAULT_REASON_STOP_WORDS: &[&str] = &["love", "like", "fun"];

/// Reason given when no meaningful keyword is shared
pub const FALLBACK_REASON: &str = "Your vibes match with each other";

/// Shared keywords plus the sentence shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchExplanation {
    pub shared_keywords: Vec<String>,
    pub reason: String,
}

/// Explains a match from the keywords both users mentioned
#[derive(Debug, Clone)]
pub struct MatchReasonGenerator {
    stop_words: AHashSet<String>,
}

impl MatchReasonGenerator {
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Shared keywords come out in lexicographic order, so the reason text
    /// is stable for the same inputs.
    pub fn explain(&self, requester: &BTreeSet<String>, matched: &BTreeSet<String>) -> MatchExplanation {
        let shared_keywords: Vec<String> = requester
            .intersection(matched)
            .filter(|kw| !self.stop_words.contains(&kw.to_lowercase()))
            .cloned()
            .collect();

        let reason = if shared_keywords.is_empty() {
            FALLBACK_REASON.to_string()
        } else {
            format!("You both share an interest in {}", shared_keywords.join(", "))
        };

        MatchExplanation { shared_keywords, reason }
    }
}

impl Default for MatchReasonGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_REASON_STOP_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_shared_interests() {
        let generator = MatchReasonGenerator::default();
        let out = generator.explain(&set(&["hiking", "cooking", "love"]), &set(&["love", "hiking", "cooking"]));
        assert_eq!(out.shared_keywords, vec!["cooking", "hiking"]);
        assert_eq!(out.reason, "You both share an interest in cooking, hiking");
    }

    #[test]
    fn test_stop_words_ignore_case() {
        let generator = MatchReasonGenerator::default();
        let out = generator.explain(&set(&["LOVE", "Fun", "like"]), &set(&["LOVE", "Fun", "like"]));
        assert!(out.shared_keywords.is_empty());
        assert_eq!(out.reason, FALLBACK_REASON);
    }

    #[test]
    fn test_no_overlap_falls_back() {
        let generator = MatchReasonGenerator::default();
        let out = generator.explain(&set(&["hiking"]), &set(&["painting"]));
        assert!(out.shared_keywords.is_empty());
        assert_eq!(out.reason, FALLBACK_REASON);
    }

    #[test]
    fn test_custom_stop_words() {
        let generator = MatchReasonGenerator::new(["Hiking"]);
        let out = generator.explain(&set(&["hiking", "love"]), &set(&["hiking", "love"]));
        assert_eq!(out.shared_keywords, vec!["love"]);
    }
}
