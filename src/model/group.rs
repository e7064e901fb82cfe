// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

use super::address::WordAddress;

/// CSS-style color string (`#c0392b`, `rgb(...)`, named colors). Not validated.
pub type Color = SmolStr;

/// Grammatical role a word group is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GrammaticalRole {
    Subject,
    Verb,
    DirectObject,
    IndirectObject,
    Article,
    Noun,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Complement,
    /// User-defined role; the group's label names it.
    Custom,
}

impl GrammaticalRole {
    pub const ALL: [GrammaticalRole; 13] = [
        Self::Subject,
        Self::Verb,
        Self::DirectObject,
        Self::IndirectObject,
        Self::Article,
        Self::Noun,
        Self::Adjective,
        Self::Adverb,
        Self::Pronoun,
        Self::Preposition,
        Self::Conjunction,
        Self::Complement,
        Self::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Verb => "verb",
            Self::DirectObject => "direct_object",
            Self::IndirectObject => "indirect_object",
            Self::Article => "article",
            Self::Noun => "noun",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Pronoun => "pronoun",
            Self::Preposition => "preposition",
            Self::Conjunction => "conjunction",
            Self::Complement => "complement",
            Self::Custom => "custom",
        }
    }

    /// Palette color used when a group is created without an explicit one.
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Subject => "#2563eb",
            Self::Verb => "#dc2626",
            Self::DirectObject => "#16a34a",
            Self::IndirectObject => "#0d9488",
            Self::Article => "#9333ea",
            Self::Noun => "#1d4ed8",
            Self::Adjective => "#ea580c",
            Self::Adverb => "#ca8a04",
            Self::Pronoun => "#db2777",
            Self::Preposition => "#4b5563",
            Self::Conjunction => "#78716c",
            Self::Complement => "#0891b2",
            Self::Custom => "#6b7280",
        }
    }
}

impl fmt::Display for GrammaticalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grammatical role '{0}'")]
pub struct ParseRoleError(pub String);

impl FromStr for GrammaticalRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("word group must contain at least one word")]
    Empty,
    #[error("word group mixes lines or languages ({first} and {other})")]
    MixedRun { first: WordAddress, other: WordAddress },
    #[error("word group is not contiguous (gap after word {after})")]
    NotContiguous { after: usize },
}

/// A contiguous run of words on one line and language, tagged with a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGroup {
    addresses: BTreeSet<WordAddress>,
    role: GrammaticalRole,
    color: Color,
    label: Option<String>,
}

impl WordGroup {
    pub fn new(
        addresses: BTreeSet<WordAddress>,
        role: GrammaticalRole,
        color: impl Into<Color>,
        label: Option<String>,
    ) -> Result<Self, GroupError> {
        validate_run(&addresses)?;
        Ok(Self { addresses, role, color: color.into(), label })
    }

    /// Group colored with the role's palette color.
    pub fn with_role(
        addresses: BTreeSet<WordAddress>,
        role: GrammaticalRole,
    ) -> Result<Self, GroupError> {
        Self::new(addresses, role, role.default_color(), None)
    }

    pub fn addresses(&self) -> &BTreeSet<WordAddress> {
        &self.addresses
    }

    pub fn contains(&self, address: &WordAddress) -> bool {
        self.addresses.contains(address)
    }

    pub fn intersects(&self, addresses: &BTreeSet<WordAddress>) -> bool {
        if self.addresses.len() <= addresses.len() {
            self.addresses.iter().any(|a| addresses.contains(a))
        } else {
            addresses.iter().any(|a| self.addresses.contains(a))
        }
    }

    /// First address of the run. Groups are never empty.
    pub fn first(&self) -> Option<&WordAddress> {
        self.addresses.first()
    }

    pub fn role(&self) -> GrammaticalRole {
        self.role
    }

    pub fn set_role(&mut self, role: GrammaticalRole) {
        self.role = role;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.color = color.into();
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<&str>) {
        self.label = label.map(ToOwned::to_owned);
    }
}

/// Checks that `addresses` is non-empty, on a single line+language, and gap-free.
pub fn validate_run(addresses: &BTreeSet<WordAddress>) -> Result<(), GroupError> {
    let mut iter = addresses.iter();
    let Some(first) = iter.next() else {
        return Err(GroupError::Empty);
    };
    let mut previous = first.word_index();
    for address in iter {
        if !address.same_run(first) {
            return Err(GroupError::MixedRun { first: first.clone(), other: address.clone() });
        }
        // BTreeSet order is (line, language, index), so within one run indices ascend.
        if address.word_index() != previous + 1 {
            return Err(GroupError::NotContiguous { after: previous });
        }
        previous = address.word_index();
    }
    Ok(())
}
