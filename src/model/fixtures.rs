// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use super::address::{Language, WordAddress};
use super::document::{Document, Line, Page};
use super::ids::{GroupId, LineId, PageId};

pub(crate) fn line_id(value: &str) -> LineId {
    LineId::new(value).expect("line id")
}

pub(crate) fn group_id(value: &str) -> GroupId {
    GroupId::new(value).expect("group id")
}

pub(crate) fn fr(line: &str, index: usize) -> WordAddress {
    WordAddress::new(line_id(line), Language::French, index)
}

pub(crate) fn en(line: &str, index: usize) -> WordAddress {
    WordAddress::new(line_id(line), Language::English, index)
}

pub(crate) fn set<const N: usize>(addresses: [WordAddress; N]) -> BTreeSet<WordAddress> {
    addresses.into_iter().collect()
}

/// One page, two aligned lines:
/// - `l1`: "Le chat dort." / "The cat sleeps."
/// - `l2`: "Il pleut depuis hier." / "It has been raining since yesterday."
pub(crate) fn le_chat_dort() -> Document {
    let mut document = Document::default();
    let mut page = Page::new(PageId::new("p1").expect("page id"));
    page.lines_mut().push(Line::new(line_id("l1"), "Le chat dort.", "The cat sleeps."));
    page.lines_mut().push(Line::new(
        line_id("l2"),
        "Il pleut depuis hier.",
        "It has been raining since yesterday.",
    ));
    document.pages_mut().push(page);
    document
}
