//! Long-Word Segmenter
//!
//! Approximate syllable boundaries from vowel/consonant transitions. This is
//! not a hyphenation dictionary, and its output must stay stable: a split goes
//! right after the consonant that ends a vowel run, once the current chunk has
//! at least three letters and at least two letters remain after the split.

/// Alphabetic runs of at least this many letters count as long words.
pub const LONG_WORD_MIN_LEN: usize = 8;

/// Chunks shorter than this are never cut off.
const MIN_CHUNK_LEN: usize = 3;

/// Letters that must remain after a split point.
const MIN_TAIL_LEN: usize = 2;

fn is_vowel(b: u8) -> bool {
    matches!(b.to_ascii_lowercase(), b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

/// Whether `word` is an ASCII-alphabetic run long enough to be segmented.
pub fn is_long_word(word: &str) -> bool {
    word.len() >= LONG_WORD_MIN_LEN && word.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Split `word` into chunks that concatenate back to `word`.
///
/// Short, non-alphabetic and vowel-less words come back as a single part.
pub fn segment(word: &str) -> Vec<&str> {
    if !is_long_word(word) || !word.bytes().any(is_vowel) {
        return vec![word];
    }

    let bytes = word.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..bytes.len() {
        let chunk_len = i + 1 - start;
        let vowel_to_consonant = is_vowel(bytes[i - 1]) && !is_vowel(bytes[i]);
        if vowel_to_consonant && chunk_len >= MIN_CHUNK_LEN && i + MIN_TAIL_LEN < bytes.len() {
            parts.push(&word[start..=i]);
            start = i + 1;
        }
    }

    if start < bytes.len() {
        parts.push(&word[start..]);
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extraordinary() {
        assert_eq!(segment("extraordinary"), vec!["extraor", "din", "ary"]);
    }

    #[test]
    fn test_known_splits() {
        assert_eq!(segment("understanding"), vec!["under", "stan", "ding"]);
        assert_eq!(segment("information"), vec!["infor", "mat", "ion"]);
        assert_eq!(segment("beautiful"), vec!["beaut", "iful"]);
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(segment("Extraordinary"), vec!["Extraor", "din", "ary"]);
    }

    #[test]
    fn test_unsplittable_words_are_single_part() {
        assert_eq!(segment("reading"), vec!["reading"]);
        assert_eq!(segment("bcdfghjkl"), vec!["bcdfghjkl"]);
        assert_eq!(segment("well-known"), vec!["well-known"]);
        assert_eq!(segment(""), vec![""]);
    }

    #[test]
    fn test_is_long_word() {
        assert!(is_long_word("elephant"));
        assert!(!is_long_word("giraffe"));
        assert!(!is_long_word("elephant1"));
    }

    proptest! {
        #[test]
        fn prop_parts_concatenate_to_word(word in "[A-Za-z]{1,40}") {
            let parts = segment(&word);
            prop_assert_eq!(parts.concat(), word.clone());
            prop_assert!(parts.iter().all(|p| !p.is_empty()));
            if word.len() < LONG_WORD_MIN_LEN {
                prop_assert_eq!(parts.len(), 1);
            }
            if parts.len() > 1 {
                prop_assert!(parts[parts.len() - 1].len() >= MIN_TAIL_LEN);
            }
        }

        #[test]
        fn prop_vowelless_words_are_unsplit(word in "[bcdfghjklmnpqrstvwxzBCDFGHJKLMNPQRSTVWXZ]{8,30}") {
            prop_assert_eq!(segment(&word), vec![word.as_str()]);
        }
    }
}
