//! Sentence realization
//!
//! Resolves phrase keys against an injected dictionary and assembles the
//! final string: tokens joined with single spaces, delimiters attached
//! without a leading space, the first letter capitalized, a terminal
//! period on every non-empty sentence. The renderer is the only
//! component that ever sees language-specific text.

use anyhow::{anyhow, Result};

use crate::dictionary::Dictionary;
use crate::phrase::{Paragraph, Sentence, Token};

pub struct Renderer<'a> {
    dict: &'a dyn Dictionary,
}

impl<'a> Renderer<'a> {
    pub fn new(dict: &'a dyn Dictionary) -> Self {
        Renderer { dict }
    }

    pub fn language(&self) -> &str {
        self.dict.language()
    }

    /// Render one sentence; the empty sentence renders as ""
    pub fn render_sentence(&self, sentence: &Sentence) -> Result<String> {
        let mut out = String::new();
        for token in sentence.tokens() {
            match token {
                Token::Phrase(key) => {
                    let phrase = self.dict.lookup(key).ok_or_else(|| {
                        anyhow!(
                            "no translation for phrase '{}' in language '{}'",
                            key,
                            self.dict.language()
                        )
                    })?;
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(phrase);
                }
                Token::Delimiter(d) => out.push_str(d),
                Token::Percentage(n) => {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(&format!("{}%", n));
                }
            }
        }
        if out.is_empty() {
            return Ok(out);
        }
        Ok(finish_sentence(&out))
    }

    /// Render a paragraph; sentences joined with single spaces
    pub fn render_paragraph(&self, paragraph: &Paragraph) -> Result<String> {
        let mut parts = Vec::with_capacity(paragraph.sentences().len());
        for sentence in paragraph.sentences() {
            let rendered = self.render_sentence(sentence)?;
            if !rendered.is_empty() {
                parts.push(rendered);
            }
        }
        Ok(parts.join(" "))
    }
}

/// Capitalize the first letter and terminate with a period
fn finish_sentence(body: &str) -> String {
    let mut chars = body.chars();
    let mut out = match chars.next() {
        Some(first) => {
            let mut s: String = first.to_uppercase().collect();
            s.push_str(chars.as_str());
            s
        }
        None => String::new(),
    };
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}
