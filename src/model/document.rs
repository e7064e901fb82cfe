// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use super::address::{Language, WordAddress};
use super::connector::Connector;
use super::group::{Color, WordGroup};
use super::ids::{ConnectorId, GroupId, HighlightId, LineId, LinkId, NoteId, PageId};
use super::tokenize::{word_count, WordClass};

/// One aligned sentence pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    line_id: LineId,
    french: String,
    english: String,
}

impl Line {
    pub fn new(line_id: LineId, french: impl Into<String>, english: impl Into<String>) -> Self {
        Self { line_id, french: french.into(), english: english.into() }
    }

    pub fn line_id(&self) -> &LineId {
        &self.line_id
    }

    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::French => &self.french,
            Language::English => &self.english,
        }
    }

    pub fn set_text(&mut self, language: Language, text: impl Into<String>) {
        match language {
            Language::French => self.french = text.into(),
            Language::English => self.english = text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    page_id: PageId,
    lines: Vec<Line>,
}

impl Page {
    pub fn new(page_id: PageId) -> Self {
        Self { page_id, lines: Vec::new() }
    }

    pub fn page_id(&self) -> &PageId {
        &self.page_id
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut Vec<Line> {
        &mut self.lines
    }
}

/// Marginal note attached to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarNote {
    line_id: LineId,
    text: String,
}

impl SidebarNote {
    pub fn new(line_id: LineId, text: impl Into<String>) -> Self {
        Self { line_id, text: text.into() }
    }

    pub fn line_id(&self) -> &LineId {
        &self.line_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Background highlight over arbitrary words (not necessarily contiguous).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    addresses: BTreeSet<WordAddress>,
    color: Color,
}

impl Highlight {
    pub fn new(addresses: BTreeSet<WordAddress>, color: impl Into<Color>) -> Self {
        Self { addresses, color: color.into() }
    }

    pub fn addresses(&self) -> &BTreeSet<WordAddress> {
        &self.addresses
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Alignment between French words and their English counterparts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedPair {
    french: BTreeSet<WordAddress>,
    english: BTreeSet<WordAddress>,
}

impl LinkedPair {
    pub fn new(french: BTreeSet<WordAddress>, english: BTreeSet<WordAddress>) -> Self {
        Self { french, english }
    }

    pub fn french(&self) -> &BTreeSet<WordAddress> {
        &self.french
    }

    pub fn english(&self) -> &BTreeSet<WordAddress> {
        &self.english
    }

    pub fn addresses(&self) -> impl Iterator<Item = &WordAddress> {
        self.french.iter().chain(self.english.iter())
    }
}

/// The mutable, undoable part of a project.
///
/// Cloning a document is a full deep copy; history snapshots rely on that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pages: Vec<Page>,
    groups: BTreeMap<GroupId, WordGroup>,
    connectors: BTreeMap<ConnectorId, Connector>,
    notes: BTreeMap<NoteId, SidebarNote>,
    highlights: BTreeMap<HighlightId, Highlight>,
    links: BTreeMap<LinkId, LinkedPair>,
}

impl Document {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut Vec<Page> {
        &mut self.pages
    }

    pub fn groups(&self) -> &BTreeMap<GroupId, WordGroup> {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut BTreeMap<GroupId, WordGroup> {
        &mut self.groups
    }

    pub fn connectors(&self) -> &BTreeMap<ConnectorId, Connector> {
        &self.connectors
    }

    pub fn connectors_mut(&mut self) -> &mut BTreeMap<ConnectorId, Connector> {
        &mut self.connectors
    }

    pub fn notes(&self) -> &BTreeMap<NoteId, SidebarNote> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut BTreeMap<NoteId, SidebarNote> {
        &mut self.notes
    }

    pub fn highlights(&self) -> &BTreeMap<HighlightId, Highlight> {
        &self.highlights
    }

    pub fn highlights_mut(&mut self) -> &mut BTreeMap<HighlightId, Highlight> {
        &mut self.highlights
    }

    pub fn links(&self) -> &BTreeMap<LinkId, LinkedPair> {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut BTreeMap<LinkId, LinkedPair> {
        &mut self.links
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }

    pub fn line(&self, line_id: &LineId) -> Option<&Line> {
        self.lines().find(|line| line.line_id() == line_id)
    }

    pub fn line_mut(&mut self, line_id: &LineId) -> Option<&mut Line> {
        self.pages
            .iter_mut()
            .flat_map(|page| page.lines.iter_mut())
            .find(|line| line.line_id() == line_id)
    }

    pub fn page(&self, page_id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|page| page.page_id() == page_id)
    }

    pub fn page_mut(&mut self, page_id: &PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.page_id() == page_id)
    }

    /// True when the address points at a word that exists in the current line text.
    pub fn address_exists(&self, address: &WordAddress, class: &WordClass) -> bool {
        self.line(address.line_id())
            .map(|line| address.word_index() < word_count(line.text(address.language()), class))
            .unwrap_or(false)
    }

    /// Groups that contain at least one of `addresses`, in group id order.
    pub fn groups_covering<'a>(
        &'a self,
        addresses: &'a BTreeSet<WordAddress>,
    ) -> impl Iterator<Item = (&'a GroupId, &'a WordGroup)> + 'a {
        self.groups.iter().filter(move |(_, group)| group.intersects(addresses))
    }

    /// Groups containing `address`, in group id order.
    pub fn groups_at<'a>(
        &'a self,
        address: &'a WordAddress,
    ) -> impl Iterator<Item = (&'a GroupId, &'a WordGroup)> + 'a {
        self.groups.iter().filter(move |(_, group)| group.contains(address))
    }

    /// Every word address stored anywhere in the document.
    pub fn referenced_addresses(&self) -> impl Iterator<Item = &WordAddress> {
        let groups = self.groups.values().flat_map(|group| group.addresses());
        let connectors =
            self.connectors.values().flat_map(|c| c.sources().iter().chain(c.targets()));
        let highlights = self.highlights.values().flat_map(|highlight| highlight.addresses());
        let links = self.links.values().flat_map(|link| link.addresses());
        groups.chain(connectors).chain(highlights).chain(links)
    }

    /// Stored addresses that no longer point at a word, typically after line text edits.
    pub fn dangling_addresses(&self, class: &WordClass) -> BTreeSet<WordAddress> {
        self.referenced_addresses()
            .filter(|address| !self.address_exists(address, class))
            .cloned()
            .collect()
    }
}
