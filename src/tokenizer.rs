use std::collections::HashSet;

/// Characters deleted from raw text before stop-word filtering
pub const PUNCTUATION: &str = r#"!()-[]{};:'"\,<>./?@#$%^&*_~"#;

lazy_static::lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        [
            "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
            "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
            "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
            "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
            "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
            "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
            "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
            "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
            "against", "between", "into", "through", "during", "before", "after", "above",
            "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
            "again", "further", "then", "once", "here", "there", "when", "where", "why",
            "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
            "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
            "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
            "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn",
            "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
            "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
            "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
            "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
            "wouldn't",
        ]
        .iter()
        .copied()
        .collect()
    };
}

/// Turns raw document text into the cleaned, space-joined token stream
/// that the frequency recorder consumes.
///
/// Casing of retained tokens is preserved; only the stop-word membership
/// check is case-insensitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Delete every punctuation character, leaving word boundaries alone
    pub fn remove_punctuation(&self, text: &str) -> String {
        text.chars().filter(|c| !PUNCTUATION.contains(*c)).collect()
    }

    /// Drop stop words and rejoin the survivors with single spaces
    pub fn remove_stop_words(&self, text: &str) -> String {
        split_terms(text)
            .filter(|t| !is_stop_word(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Full cleaning pipeline. Punctuation goes first, so `don't` reaches
    /// the stop-word pass as `dont`.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.remove_punctuation(text);
        self.remove_stop_words(&text)
    }
}

/// Split on whitespace, counting the ASCII information separators
/// `\x1c`..=`\x1f` as whitespace too
pub fn split_terms(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
        .filter(|t| !t.is_empty())
}

pub fn is_stop_word(token: &str) -> bool {
    STOPWORDS.contains(token.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_removed() {
        let normalizer = Normalizer::new();
        assert_eq!(
            normalizer.normalize("The monkeys jump on the bed"),
            "monkeys jump bed"
        );
    }

    #[test]
    fn test_punctuation_removed() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("Hello, world!!!"), "Hello world");
        assert_eq!(
            normalizer.remove_punctuation(r#"a\b "c" (d) e-mail 3+4=7"#),
            "ab c d email 3+4=7"
        );
    }

    #[test]
    fn test_casing_preserved() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("THE Rust BOOK"), "Rust BOOK");
    }

    #[test]
    fn test_punctuation_before_stop_words() {
        let normalizer = Normalizer::new();
        // the apostrophe is gone before stop words are checked
        assert_eq!(normalizer.normalize("don't stop"), "dont stop");
        assert_eq!(normalizer.remove_stop_words("don't stop"), "stop");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("  sweet\n\tsugar   recipe "), "sweet sugar recipe");
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("!!! ... ---"), "");
    }

    #[test]
    fn test_information_separators_split() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("alpha\x1fbeta\x1cthe\x1dgamma"), "alpha beta gamma");
        assert_eq!(split_terms("a\x1e b").collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
