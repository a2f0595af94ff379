//! Symbolic sentence composition
//!
//! Stories never emit finished prose. They compose sentences out of phrase
//! keys, delimiters, and numeric parameters; the renderer resolves keys
//! against a dictionary and assembles the final string. This keeps every
//! classifier language-agnostic.

/// One element of a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A dictionary key to be resolved in the requested language
    Phrase(&'static str),
    /// Punctuation attached to the preceding token without a space
    Delimiter(&'static str),
    /// An inline percentage parameter, rendered as e.g. "80%"
    Percentage(i64),
}

/// An ordered token sequence; empty means the suppressed sentence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Create an empty (suppressed) sentence
    pub fn new() -> Self {
        Sentence::default()
    }

    /// Build a sentence from phrase keys only
    pub fn from_phrases(keys: &[&'static str]) -> Self {
        Sentence {
            tokens: keys.iter().copied().map(Token::Phrase).collect(),
        }
    }

    /// Append a token
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Append all tokens of another sentence
    pub fn extend(&mut self, other: Sentence) {
        self.tokens.extend(other.tokens);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// An ordered sequence of sentences; empty sentences contribute nothing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Create an empty paragraph
    pub fn new() -> Self {
        Paragraph::default()
    }

    /// Append a sentence; empty sentences are dropped
    pub fn push(&mut self, sentence: Sentence) {
        if !sentence.is_empty() {
            self.sentences.push(sentence);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_phrases() {
        let s = Sentence::from_phrases(&["mahdollisesti", "hallaa"]);
        assert_eq!(
            s.tokens(),
            &[Token::Phrase("mahdollisesti"), Token::Phrase("hallaa")]
        );
    }

    #[test]
    fn test_empty_sentence_dropped_from_paragraph() {
        let mut p = Paragraph::new();
        p.push(Sentence::new());
        assert!(p.is_empty());

        p.push(Sentence::from_phrases(&["hallaa"]));
        assert_eq!(p.sentences().len(), 1);
    }

    #[test]
    fn test_extend_concatenates_tokens() {
        let mut s = Sentence::from_phrases(&["rannikolla"]);
        s.extend(Sentence::from_phrases(&["hallaa"]));
        assert_eq!(s.tokens().len(), 2);
    }
}
