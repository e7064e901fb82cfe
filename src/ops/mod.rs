// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for documents.
//!
//! Ops are applied atomically against a working copy and produce a minimal delta that
//! the UI can use to refresh derived state (token decorations, connector paths).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use crate::model::{
    Color, Connector, ConnectorId, Document, GrammaticalRole, GroupError, GroupId,
    HeadShape, Highlight, HighlightId, Language, Line, LineId, LinkId, LinkedPair, NoteId, Page,
    PageId, SidebarNote, StrokeStyle, WordAddress, WordClass, WordGroup, word_count,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AddPage {
        page_id: PageId,
        /// Insert position; `None` appends.
        index: Option<usize>,
    },
    RemovePage {
        page_id: PageId,
    },
    AddLine {
        page_id: PageId,
        line_id: LineId,
        french: String,
        english: String,
        index: Option<usize>,
    },
    SetLineText {
        line_id: LineId,
        language: Language,
        text: String,
    },
    RemoveLine {
        line_id: LineId,
    },
    AddGroup {
        group_id: GroupId,
        addresses: BTreeSet<WordAddress>,
        role: GrammaticalRole,
        color: Option<Color>,
        label: Option<String>,
    },
    UpdateGroup {
        group_id: GroupId,
        patch: GroupPatch,
    },
    RemoveGroup {
        group_id: GroupId,
    },
    AddConnector {
        connector_id: ConnectorId,
        connector: Connector,
    },
    UpdateConnector {
        connector_id: ConnectorId,
        patch: ConnectorPatch,
    },
    RemoveConnector {
        connector_id: ConnectorId,
    },
    AddNote {
        note_id: NoteId,
        line_id: LineId,
        text: String,
    },
    SetNoteText {
        note_id: NoteId,
        text: String,
    },
    RemoveNote {
        note_id: NoteId,
    },
    AddHighlight {
        highlight_id: HighlightId,
        addresses: BTreeSet<WordAddress>,
        color: Color,
    },
    RemoveHighlight {
        highlight_id: HighlightId,
    },
    AddLink {
        link_id: LinkId,
        french: BTreeSet<WordAddress>,
        english: BTreeSet<WordAddress>,
    },
    RemoveLink {
        link_id: LinkId,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub role: Option<GrammaticalRole>,
    pub color: Option<Color>,
    /// `Some(None)` clears the label.
    pub label: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorPatch {
    pub sources: Option<BTreeSet<WordAddress>>,
    pub targets: Option<BTreeSet<WordAddress>>,
    pub style: Option<StrokeStyle>,
    pub head: Option<HeadShape>,
    pub stroke_width: Option<f64>,
    pub color: Option<Color>,
    pub curvature: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Page,
    Line,
    Group,
    Connector,
    Note,
    Highlight,
    Link,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Page => "page",
            Self::Line => "line",
            Self::Group => "group",
            Self::Connector => "connector",
            Self::Note => "note",
            Self::Highlight => "highlight",
            Self::Link => "link",
        })
    }
}

/// A reference to one keyed document object, used in deltas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub kind: ObjectKind,
    pub id: String,
}

impl ObjectKey {
    fn new(kind: ObjectKind, id: impl fmt::Display) -> Self {
        Self { kind, id: id.to_string() }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which objects changed as the result of applying ops.
///
/// Reports only added/removed/updated keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ObjectKey>,
    pub removed: Vec<ObjectKey>,
    pub updated: Vec<ObjectKey>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<ObjectKey>,
    removed: BTreeSet<ObjectKey>,
    updated: BTreeSet<ObjectKey>,
}

impl DeltaBuilder {
    fn record_added(&mut self, key: ObjectKey) {
        // Re-adding something removed earlier in the same batch is an update.
        if self.removed.remove(&key) {
            self.updated.insert(key);
            return;
        }
        self.updated.remove(&key);
        self.added.insert(key);
    }

    fn record_removed(&mut self, key: ObjectKey) {
        self.updated.remove(&key);
        if self.added.remove(&key) {
            return;
        }
        self.removed.insert(key);
    }

    fn record_updated(&mut self, key: ObjectKey) {
        if self.added.contains(&key) || self.removed.contains(&key) {
            return;
        }
        self.updated.insert(key);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("{kind} already exists (id={id})")]
    AlreadyExists { kind: ObjectKind, id: String },
    #[error("{kind} not found (id={id})")]
    NotFound { kind: ObjectKind, id: String },
    #[error("invalid word group {group_id}: {source}")]
    InvalidGroup {
        group_id: GroupId,
        #[source]
        source: GroupError,
    },
    #[error("link {link_id} expects {expected} words but got {address}")]
    LanguageMismatch { link_id: LinkId, expected: Language, address: WordAddress },
}

impl ApplyError {
    fn not_found(kind: ObjectKind, id: impl fmt::Display) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }

    fn already_exists(kind: ObjectKind, id: impl fmt::Display) -> Self {
        Self::AlreadyExists { kind, id: id.to_string() }
    }
}

/// Applies `ops` in order. Either every op applies or the document is left untouched.
///
/// References to words that do not exist in the current line text are dropped; an op
/// left with nothing to reference is a no-op rather than an error.
pub fn apply_ops(
    document: &mut Document,
    ops: &[Op],
    class: &WordClass,
) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult { applied: 0, delta: Delta::default() });
    }

    let mut working = document.clone();
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_op(&mut working, op, class, &mut delta)?;
    }

    *document = working;
    let delta = delta.finish();
    debug!(
        ops = ops.len(),
        added = delta.added.len(),
        removed = delta.removed.len(),
        updated = delta.updated.len(),
        "applied document ops"
    );
    Ok(ApplyResult { applied: ops.len(), delta })
}

// Extracted per-op implementation and cascade helpers.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
