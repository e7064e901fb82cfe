// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Word tokenization and positional addressing.
//!
//! A line is split into alternating `Word` and `Separator` tokens. Concatenating the
//! tokens in order reproduces the input exactly, which is what lets the renderer and
//! the export collaborator regenerate identical word addresses from plain text.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::address::{Language, WordAddress};
use super::ids::LineId;

/// ASCII letters and digits, Latin-1 Supplement letters `À`–`ÿ`, and apostrophes
/// (straight, right and left single quotes). Characters outside this class
/// (combining marks, other scripts) are separators.
pub const DEFAULT_WORD_CLASS: &str = "[A-Za-z0-9À-ÿ'’‘]";

/// Any Unicode letter, combining mark or number, plus the apostrophes.
pub const UNICODE_WORD_CLASS: &str = r"[\p{L}\p{M}\p{N}'’‘]";

#[derive(Debug, Error)]
pub enum WordClassError {
    #[error("invalid word character class '{class}': {source}")]
    InvalidPattern {
        class: String,
        #[source]
        source: regex::Error,
    },
}

/// The set of characters that make up a word token.
///
/// This is a configuration point: the default matches Latin-1 text, and
/// [`WordClass::unicode_letters`] widens it to every script.
#[derive(Debug, Clone)]
pub struct WordClass {
    class: String,
    regex: Regex,
}

impl WordClass {
    /// Builds a word class from a single regex character class such as `[a-z]`.
    pub fn new(class: impl Into<String>) -> Result<Self, WordClassError> {
        let class = class.into();
        let regex = Regex::new(&format!("(?:{class})+"))
            .map_err(|source| WordClassError::InvalidPattern { class: class.clone(), source })?;
        Ok(Self { class, regex })
    }

    pub fn unicode_letters() -> Self {
        static UNICODE: OnceLock<WordClass> = OnceLock::new();
        UNICODE
            .get_or_init(|| {
                WordClass::new(UNICODE_WORD_CLASS).expect("static word class")
            })
            .clone()
    }

    pub fn class(&self) -> &str {
        &self.class
    }
}

impl Default for WordClass {
    fn default() -> Self {
        static DEFAULT: OnceLock<WordClass> = OnceLock::new();
        DEFAULT
            .get_or_init(|| {
                WordClass::new(DEFAULT_WORD_CLASS).expect("static word class")
            })
            .clone()
    }
}

impl PartialEq for WordClass {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Separator,
}

/// A slice of a line's text. `span` is the byte range in the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
    span: Range<usize>,
}

impl<'a> Token<'a> {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Splits `text` into maximal word runs and the separators between them.
///
/// No empty tokens are produced; empty input yields no tokens.
pub fn tokenize<'a>(text: &'a str, class: &WordClass) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    for found in class.regex.find_iter(text) {
        if found.start() == found.end() {
            continue;
        }
        if found.start() > cursor {
            tokens.push(Token {
                kind: TokenKind::Separator,
                text: &text[cursor..found.start()],
                span: cursor..found.start(),
            });
        }
        tokens.push(Token { kind: TokenKind::Word, text: found.as_str(), span: found.range() });
        cursor = found.end();
    }
    if cursor < text.len() {
        tokens.push(Token {
            kind: TokenKind::Separator,
            text: &text[cursor..],
            span: cursor..text.len(),
        });
    }
    tokens
}

/// Assigns a [`WordAddress`] to every word token, returning `(token_index, address)`
/// pairs in token order. Word indices are `0, 1, 2, ...` without gaps.
pub fn assign_addresses(
    tokens: &[Token<'_>],
    line_id: &LineId,
    language: Language,
) -> Vec<(usize, WordAddress)> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_word())
        .enumerate()
        .map(|(word_index, (token_index, _))| {
            (token_index, WordAddress::new(line_id.clone(), language, word_index))
        })
        .collect()
}

pub fn word_count(text: &str, class: &WordClass) -> usize {
    class.regex.find_iter(text).filter(|m| m.start() != m.end()).count()
}

/// Returns the text of the `word_index`-th word, if the line has that many words.
pub fn word_at<'a>(text: &'a str, class: &WordClass, word_index: usize) -> Option<&'a str> {
    class.regex.find_iter(text).filter(|m| m.start() != m.end()).nth(word_index).map(|m| m.as_str())
}
