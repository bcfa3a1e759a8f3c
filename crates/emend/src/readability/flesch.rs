//! Flesch-Kincaid Reading Ease.

use serde::{Deserialize, Serialize};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Word count and reading-ease score for a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityMetrics {
    /// Number of whitespace-separated words.
    pub word_count: usize,
    /// Flesch Reading Ease, rounded to one decimal. Not clamped.
    pub score: f64,
}

impl ReadabilityMetrics {
    /// Band the score falls in.
    pub fn level(&self) -> ReadingLevel {
        ReadingLevel::from_score(self.score)
    }
}

/// Raw counts the score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
}

impl TextStatistics {
    /// Count words, sentences and syllables in `text`.
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();

        let sentence_count = text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count();

        let syllable_count = words.iter().map(|w| count_syllables(w)).sum();

        Self {
            word_count: words.len(),
            sentence_count,
            syllable_count,
        }
    }

    /// Flesch Reading Ease for these counts, unrounded.
    ///
    /// Returns 0.0 when there are no words. A text with words but no
    /// sentence-ending punctuation counts as one sentence.
    pub fn reading_ease(&self) -> f64 {
        if self.word_count == 0 {
            return 0.0;
        }
        let words = self.word_count as f64;
        let sentences = self.sentence_count.max(1) as f64;
        let syllables = self.syllable_count as f64;

        206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)
    }
}

/// Qualitative band for a reading-ease score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLevel {
    VeryEasy,
    FairlyEasy,
    SomewhatDifficult,
    VeryDifficult,
}

impl ReadingLevel {
    /// Classify a reading-ease score.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ReadingLevel::VeryEasy
        } else if score >= 60.0 {
            ReadingLevel::FairlyEasy
        } else if score >= 30.0 {
            ReadingLevel::SomewhatDifficult
        } else {
            ReadingLevel::VeryDifficult
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ReadingLevel::VeryEasy => "Very easy to read",
            ReadingLevel::FairlyEasy => "Fairly easy to read",
            ReadingLevel::SomewhatDifficult => "Somewhat difficult to read",
            ReadingLevel::VeryDifficult => "Very difficult to read",
        }
    }
}

/// Estimate the syllables in a single word.
///
/// Words of three characters or fewer are one syllable. Longer words count one
/// syllable per run of vowels (`y` included), with a minimum of one.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }

    let mut count = 0;
    let mut prev_vowel = false;
    for c in word.chars() {
        let is_vowel = VOWELS.contains(&c);
        if is_vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = is_vowel;
    }

    count.max(1)
}

/// Compute word count and Flesch Reading Ease for `text`.
///
/// Empty or whitespace-only text yields `{ word_count: 0, score: 0.0 }`.
pub fn calculate_readability(text: &str) -> ReadabilityMetrics {
    if text.trim().is_empty() {
        return ReadabilityMetrics::default();
    }

    let stats = TextStatistics::from_text(text);

    ReadabilityMetrics {
        word_count: stats.word_count,
        score: round_one_decimal(stats.reading_ease()),
    }
}

/// Round to one decimal place, halves toward positive infinity.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(calculate_readability(""), ReadabilityMetrics::default());
        assert_eq!(calculate_readability("   \n\t "), ReadabilityMetrics::default());
    }

    #[test]
    fn test_two_sentences() {
        let text = "This is a simple sentence. Another sentence.";
        let stats = TextStatistics::from_text(text);
        assert_eq!(stats.word_count, 7);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.syllable_count, 14);

        let metrics = calculate_readability(text);
        assert_eq!(metrics.word_count, 7);
        assert!((metrics.score - 34.1).abs() < 1e-9, "got {}", metrics.score);
    }

    #[test]
    fn test_single_sentence() {
        let metrics = calculate_readability("The elephant is enormous.");
        assert_eq!(metrics.word_count, 4);
        assert!((metrics.score - 33.6).abs() < 1e-9, "got {}", metrics.score);
    }

    #[test]
    fn test_no_sentence_punctuation_counts_as_one() {
        let with = calculate_readability("The cat sat.");
        let without = calculate_readability("The cat sat");
        assert_eq!(with, without);
    }

    #[test]
    fn test_zero_sentences_guarded() {
        // Only punctuation: two words, no sentence text.
        let stats = TextStatistics::from_text("... !!!");
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.sentence_count, 0);

        let metrics = calculate_readability("... !!!");
        assert!(metrics.score.is_finite());
        assert!((metrics.score - 120.2).abs() < 1e-9, "got {}", metrics.score);
    }

    #[test]
    fn test_score_not_clamped() {
        let long = "Incomprehensibility notwithstanding, internationalization \
                    characteristically overcomplicates institutionalization";
        let metrics = calculate_readability(long);
        assert!(metrics.score < 0.0, "got {}", metrics.score);
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("a"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("this"), 1);
        assert_eq!(count_syllables("simple"), 2);
        assert_eq!(count_syllables("Another"), 3);
        assert_eq!(count_syllables("queue"), 1);
        assert_eq!(count_syllables("rhythm"), 1);
        // No vowels at all still floors at one.
        assert_eq!(count_syllables("shhh"), 1);
    }

    #[test]
    fn test_reading_levels() {
        assert_eq!(ReadingLevel::from_score(95.0), ReadingLevel::VeryEasy);
        assert_eq!(ReadingLevel::from_score(80.0), ReadingLevel::VeryEasy);
        assert_eq!(ReadingLevel::from_score(65.2), ReadingLevel::FairlyEasy);
        assert_eq!(ReadingLevel::from_score(34.1), ReadingLevel::SomewhatDifficult);
        assert_eq!(ReadingLevel::from_score(-12.0), ReadingLevel::VeryDifficult);
        assert_eq!(ReadingLevel::FairlyEasy.label(), "Fairly easy to read");
    }
}
