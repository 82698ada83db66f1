use std::sync::LazyLock;

use regex::Regex;

/// Tokens of this many characters or fewer are dropped.
const MAX_DISCARDED_LEN: usize = 2;

static NON_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z\s]").expect("static regex is valid")
});

/// Split free text into lower-case word tokens.
///
/// The text is lower-cased, every character that is neither `a`–`z` nor
/// whitespace becomes a space, and the result is split on whitespace. Tokens
/// of two characters or fewer are discarded. No stemming or stop-word removal.
///
/// ```text
/// "Viral Pneumonia Outbreak"  ->  ["viral", "pneumonia", "outbreak"]
/// "COVID-19 in the U.S."      ->  ["covid", "the"]
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_LETTER
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|t| t.chars().count() > MAX_DISCARDED_LEN)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn splits_title_into_words() {
        assert_eq!(
            tokenize("Viral Pneumonia Outbreak"),
            vec!["viral", "pneumonia", "outbreak"]
        );
    }

    #[test]
    fn punctuation_and_digits_split_words() {
        assert_eq!(tokenize("COVID-19 in the U.S."), vec!["covid", "the"]);
        assert_eq!(tokenize("SARS-CoV-2: a review"), vec!["sars", "cov", "review"]);
    }

    #[test]
    fn non_ascii_letters_act_as_separators() {
        assert_eq!(tokenize("Études naïves"), vec!["tudes", "ves"]);
    }

    #[test]
    fn empty_and_short_inputs_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("a an of 42 --").is_empty());
    }

    proptest! {
        #[test]
        fn tokens_are_long_lowercase_ascii(text in "\\PC{0,80}") {
            for token in tokenize(&text) {
                prop_assert!(token.len() >= 3);
                prop_assert!(token.bytes().all(|b| b.is_ascii_lowercase()));
            }
        }

        #[test]
        fn tokenizing_joined_output_is_stable(text in "\\PC{0,80}") {
            let first = tokenize(&text);
            let second = tokenize(&first.join(" "));
            prop_assert_eq!(first, second);
        }
    }
}
