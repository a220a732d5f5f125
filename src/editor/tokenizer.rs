//! # Word Tokenizer
//!
//! Splits text into alternating word and whitespace tokens. Whitespace runs are
//! kept as tokens of their own, so concatenating the token texts always gives
//! back the input byte for byte.
//!
//! ## Usage
//!
//! ```rust
//! use postcraft::editor::tokenizer::{detokenize, tokenize};
//!
//! let tokens = tokenize("I  love AI");
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["I", "  ", "love", " ", "AI"]);
//! assert_eq!(detokenize(&tokens), "I  love AI");
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Whether a token is a word or a whitespace run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Word,
    Whitespace,
}

/// A single token and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Exact source text of the token
    pub text: String,
    /// Word or whitespace
    pub kind: TokenKind,
    /// Byte offset of the token in the source text
    pub start: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, start: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            start,
        }
    }

    /// Byte offset one past the end of the token
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Byte range of the token in the source text
    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Tokens are compared by text only; positions differ between documents
    pub fn same_text(&self, other: &Token) -> bool {
        self.text == other.text
    }
}

/// Split `text` into word and whitespace tokens
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_kind: Option<TokenKind> = None;

    for (offset, ch) in text.char_indices() {
        let kind = if ch.is_whitespace() {
            TokenKind::Whitespace
        } else {
            TokenKind::Word
        };

        match run_kind {
            Some(current) if current == kind => {}
            Some(current) => {
                tokens.push(Token::new(&text[run_start..offset], current, run_start));
                run_start = offset;
                run_kind = Some(kind);
            }
            None => run_kind = Some(kind),
        }
    }

    if let Some(kind) = run_kind {
        tokens.push(Token::new(&text[run_start..], kind, run_start));
    }

    tokens
}

/// Concatenate token texts back into a string
pub fn detokenize(tokens: &[Token]) -> String {
    let capacity: usize = tokens.iter().map(|t| t.text.len()).sum();
    tokens.iter().fold(String::with_capacity(capacity), |mut out, token| {
        out.push_str(&token.text);
        out
    })
}

/// Number of word tokens in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
