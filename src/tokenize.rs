/*! Tokenized documents and the tokenizer boundary.

A [Document] is the ordered list of [Token]s of one input line.
Tokenizers implement [Tokenizer]; [WordBoundaryTokenizer] splits on Unicode word boundaries (UAX #29)
and is used when nothing more specific is available.

Raw input goes through [prepare_lines] before being tokenized.
!*/
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::lang::LanguageTag;

/// Lines of this length (in chars) or longer are skipped.
pub const MAX_LINE_LENGTH: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Is the token followed by whitespace in the source text?
    pub space_after: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, space_after: bool) -> Self {
        Self {
            text: text.into(),
            space_after,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    tokens: Vec<Token>,
}

impl Document {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Text of the document, with single spaces where tokens were separated by whitespace.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for token in &self.tokens {
            text.push_str(&token.text);
            if token.space_after {
                text.push(' ');
            }
        }
        text.truncate(text.trim_end().len());
        text
    }
}

/// Splits raw text into tokens.
pub trait Tokenizer {
    fn tokenize(&self, text: &str, language: &LanguageTag) -> Document;
}

/// Language-independent tokenizer on Unicode word boundaries.
///
/// Whitespace is not kept as tokens but sets [Token::space_after] on the preceding token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBoundaryTokenizer;

impl Tokenizer for WordBoundaryTokenizer {
    fn tokenize(&self, text: &str, _language: &LanguageTag) -> Document {
        let mut tokens: Vec<Token> = Vec::new();
        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                if let Some(last) = tokens.last_mut() {
                    last.space_after = true;
                }
            } else {
                tokens.push(Token::new(segment, false));
            }
        }
        Document::new(tokens)
    }
}

/// Clean a single raw line. Returns `None` for lines to skip (empty or too long).
///
/// `repair` decodes HTML entities (`&amp;`, `&#x27;`...), which is how most broken text in crawled data shows up.
pub fn prepare_line(line: &str, max_line_length: usize, repair: bool) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.chars().count() >= max_line_length {
        return None;
    }

    let line = if repair {
        html_escape::decode_html_entities(line)
    } else {
        Cow::Borrowed(line)
    };

    Some(line.replace('\n', " "))
}

/// Lazily apply [prepare_line] to a stream of lines, dropping skipped ones.
pub fn prepare_lines<I, S>(
    lines: I,
    max_line_length: usize,
    repair: bool,
) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(move |line| prepare_line(line.as_ref(), max_line_length, repair))
}
