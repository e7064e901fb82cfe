// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ids::{IdError, LineId};

/// Which side of an aligned sentence pair a word lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    French,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::French, Language::English];

    pub fn code(self) -> &'static str {
        match self {
            Self::French => "fr",
            Self::English => "en",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::French => Self::English,
            Self::English => Self::French,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fr" => Ok(Self::French),
            "en" => Ok(Self::English),
            other => Err(ParseAddressError::UnknownLanguage(other.to_owned())),
        }
    }
}

/// Identity of a single word occurrence: `(line, language, word index)`.
///
/// The index is positional: it counts word tokens only, in reading order. Any
/// edit that inserts or removes a word on a line shifts the index of every
/// later word on that line, so groups, connectors, highlights and links that
/// point past the edit silently drift onto different words. Editing line text
/// does not rewrite stored addresses.
///
/// Canonical key format: `w:<line_id>/<lang>/<index>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordAddress {
    line_id: LineId,
    language: Language,
    word_index: usize,
}

impl WordAddress {
    pub fn new(line_id: LineId, language: Language, word_index: usize) -> Self {
        Self { line_id, language, word_index }
    }

    pub fn line_id(&self) -> &LineId {
        &self.line_id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    /// True when both addresses sit on the same line in the same language.
    pub fn same_run(&self, other: &WordAddress) -> bool {
        self.line_id == other.line_id && self.language == other.language
    }

    pub fn parse(input: &str) -> Result<Self, ParseAddressError> {
        const PREFIX: &str = "w:";
        let rest = input.strip_prefix(PREFIX).ok_or(ParseAddressError::MissingPrefix)?;

        let (line_str, remainder) =
            rest.split_once('/').ok_or(ParseAddressError::MissingLanguage)?;
        if line_str.is_empty() {
            return Err(ParseAddressError::MissingLineId);
        }
        let line_id =
            LineId::new(line_str.to_owned()).map_err(ParseAddressError::InvalidLineId)?;

        let (lang_str, index_str) =
            remainder.split_once('/').ok_or(ParseAddressError::MissingIndex)?;
        let language = lang_str.parse::<Language>()?;

        if index_str.is_empty() {
            return Err(ParseAddressError::MissingIndex);
        }
        // `usize::from_str` accepts a leading '+', which would break key round-trips.
        if !index_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAddressError::InvalidIndex(index_str.to_owned()));
        }
        let word_index = index_str
            .parse::<usize>()
            .map_err(|_| ParseAddressError::InvalidIndex(index_str.to_owned()))?;

        Ok(Self { line_id, language, word_index })
    }
}

impl fmt::Display for WordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut index = itoa::Buffer::new();
        write!(f, "w:{}/{}/{}", self.line_id, self.language, index.format(self.word_index))
    }
}

impl FromStr for WordAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAddressError {
    #[error("word address must start with 'w:'")]
    MissingPrefix,
    #[error("word address is missing line id")]
    MissingLineId,
    #[error("word address is missing language")]
    MissingLanguage,
    #[error("word address is missing word index")]
    MissingIndex,
    #[error("invalid line id: {0}")]
    InvalidLineId(#[source] IdError),
    #[error("unknown language '{0}' (expected 'fr' or 'en')")]
    UnknownLanguage(String),
    #[error("invalid word index '{0}'")]
    InvalidIndex(String),
}
