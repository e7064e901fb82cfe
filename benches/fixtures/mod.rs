// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::collections::{BTreeMap, BTreeSet};

use interlinea::layout::Rect;
use interlinea::model::{
    Connector, ConnectorId, Document, GrammaticalRole, GroupId, Language, Line, LineId, Page,
    PageId, WordAddress, WordGroup,
};

const FRENCH: &str = "Le petit chat noir dort tranquillement sur le canapé du salon.";
const ENGLISH: &str = "The little black cat sleeps peacefully on the living room sofa.";
const WORDS_PER_LINE: usize = 11;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn lines(self) -> usize {
        match self {
            Self::Small => 4,
            Self::Medium => 40,
            Self::Large => 400,
        }
    }
}

fn line_id(index: usize) -> LineId {
    LineId::new(format!("l{index:04}")).expect("line id")
}

fn address(line: usize, language: Language, word: usize) -> WordAddress {
    WordAddress::new(line_id(line), language, word)
}

/// Pages of 20 lines. Every line has two French and two English groups of two words
/// and one connector per language pair.
pub fn document(case: Case) -> Document {
    let mut document = Document::default();
    let lines = case.lines();
    for page_index in 0..lines.div_ceil(20) {
        let mut page = Page::new(PageId::new(format!("p{page_index:03}")).expect("page id"));
        for line in (page_index * 20)..((page_index + 1) * 20).min(lines) {
            page.lines_mut().push(Line::new(line_id(line), FRENCH, ENGLISH));
        }
        document.pages_mut().push(page);
    }

    for line in 0..lines {
        for language in Language::ALL {
            for (slot, start) in [(0usize, 0usize), (1, 3)] {
                let addresses: BTreeSet<_> =
                    (start..start + 2).map(|word| address(line, language, word)).collect();
                let group = WordGroup::with_role(addresses, GrammaticalRole::Noun).expect("group");
                let id = format!("g{line:04}-{}-{slot}", language.code());
                document.groups_mut().insert(GroupId::new(id).expect("group id"), group);
            }
        }
        let connector = Connector::new(
            [address(line, Language::French, 0), address(line, Language::French, 3)].into(),
            [address(line, Language::English, 0), address(line, Language::English, 3)].into(),
        );
        let id = ConnectorId::new(format!("c{line:04}")).expect("connector id");
        document.connectors_mut().insert(id, connector);
    }
    document
}

/// A word rectangle for every word: 60px columns, 48px per line, English 20px below.
pub fn anchors(case: Case) -> BTreeMap<WordAddress, Rect> {
    let mut out = BTreeMap::new();
    for line in 0..case.lines() {
        for language in Language::ALL {
            let y = line as f64 * 48.0 + if language == Language::English { 20.0 } else { 0.0 };
            for word in 0..WORDS_PER_LINE {
                let rect = Rect::from_origin_size(word as f64 * 60.0, y, 52.0, 16.0);
                out.insert(address(line, language, word), rect);
            }
        }
    }
    out
}
