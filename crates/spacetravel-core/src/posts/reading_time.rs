//! Estimated reading time.

use super::ContentSection;

/// Average reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Count words by splitting on single spaces.
///
/// No normalization: consecutive spaces add empty words and an empty string
/// counts as one word.
pub fn count_words(text: &str) -> usize {
    text.split(' ').count()
}

/// Whole minutes needed to read `words` words, rounded up.
pub fn minutes_for(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

/// Total words over every section's heading and plain-text body.
pub fn total_words(sections: &[ContentSection]) -> usize {
    sections
        .iter()
        .map(|s| count_words(&s.heading) + count_words(&s.body.as_text()))
        .sum()
}

/// Reading time of a post, formatted as `<n> min`.
pub fn reading_time(sections: &[ContentSection]) -> String {
    format!("{} min", minutes_for(total_words(sections)))
}
