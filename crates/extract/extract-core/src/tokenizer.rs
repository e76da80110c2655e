//! Word tokenizer for posting text

/// Characters peeled from either end of a whitespace-delimited word
const EDGE_PUNCTUATION: &[char] = &[
    ',', '.', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'', '`',
];

/// Split text into word tokens.
///
/// Words are separated on Unicode whitespace, then leading and trailing
/// punctuation is stripped. Inner punctuation survives, so `node.js`,
/// `c++` and `ci/cd` stay whole while `python,` becomes `python`.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|word| word.trim_matches(EDGE_PUNCTUATION))
        .filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_whitespace() {
        let tokens: Vec<&str> = tokenize("python  and\tsql\nskills").collect();
        assert_eq!(tokens, vec!["python", "and", "sql", "skills"]);
    }

    #[test]
    fn test_strips_edge_punctuation() {
        let tokens: Vec<&str> = tokenize("(python), sql. \"aws\"!").collect();
        assert_eq!(tokens, vec!["python", "sql", "aws"]);
    }

    #[test]
    fn test_keeps_inner_punctuation() {
        let tokens: Vec<&str> = tokenize("node.js, c++ and ci/cd.").collect();
        assert_eq!(tokens, vec!["node.js", "c++", "and", "ci/cd"]);
    }

    #[test]
    fn test_punctuation_only_words_vanish() {
        assert_eq!(tokenize("... -- ,").collect::<Vec<_>>(), vec!["--"]);
        assert_eq!(tokenize("").count(), 0);
    }
}
