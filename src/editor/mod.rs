// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing session: a document, its undo history and transient UI state.
//!
//! Every mutation goes through [`Editor::apply`], which snapshots the pre-image into the
//! history only when the ops succeed and change something. Selection and tool mode are
//! not part of the document and survive undo/redo untouched.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::config::EditorConfig;
use crate::history::History;
use crate::model::{
    Connector, ConnectorId, Document, GrammaticalRole, GroupId, WordAddress, WordClass,
    WordClassError,
};
use crate::ops::{apply_ops, ApplyError, ApplyResult, Op};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToolMode {
    #[default]
    Select,
    Group,
    Connect,
    Highlight,
    Link,
    Note,
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "select",
            Self::Group => "group",
            Self::Connect => "connect",
            Self::Highlight => "highlight",
            Self::Link => "link",
            Self::Note => "note",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    history: History<Document>,
    class: WordClass,
    selection: BTreeSet<WordAddress>,
    tool: ToolMode,
}

impl Editor {
    pub fn new(document: Document, config: &EditorConfig) -> Result<Self, WordClassError> {
        Ok(Self {
            document,
            history: History::with_capacity(config.history.capacity),
            class: config.word_class()?,
            selection: BTreeSet::new(),
            tool: ToolMode::default(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History<Document> {
        &self.history
    }

    pub fn word_class(&self) -> &WordClass {
        &self.class
    }

    /// Replaces the document (e.g. after opening a file) and forgets all history.
    pub fn load_document(&mut self, document: Document) {
        self.document = document;
        self.history.clear();
        self.selection.clear();
    }

    /// Applies `ops` atomically and records an undo step when anything changed.
    pub fn apply(&mut self, ops: &[Op]) -> Result<ApplyResult, ApplyError> {
        let mut next = self.document.clone();
        let result = apply_ops(&mut next, ops, &self.class)?;
        if result.delta.is_empty() {
            debug!(ops = ops.len(), "ops changed nothing; no undo step");
            return Ok(result);
        }
        self.history.save(&self.document);
        self.document = next;
        Ok(result)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.document) {
            Some(previous) => {
                self.document = previous;
                debug!(cursor = ?self.history.cursor(), "undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.document = next;
                debug!(cursor = ?self.history.cursor(), "redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn selection(&self) -> &BTreeSet<WordAddress> {
        &self.selection
    }

    /// Adds or removes `address` from the selection. Returns whether it is now selected.
    pub fn toggle_selection(&mut self, address: WordAddress) -> bool {
        if self.selection.remove(&address) {
            return false;
        }
        self.selection.insert(address);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
    }

    /// Turns the current selection into a group and clears the selection on success.
    pub fn group_selection(
        &mut self,
        group_id: GroupId,
        role: GrammaticalRole,
    ) -> Result<ApplyResult, ApplyError> {
        let op = Op::AddGroup {
            group_id,
            addresses: self.selection.clone(),
            role,
            color: None,
            label: None,
        };
        let result = self.apply(std::slice::from_ref(&op))?;
        self.selection.clear();
        Ok(result)
    }

    /// Draws a connector from the current selection to `targets`.
    pub fn connect_selection(
        &mut self,
        connector_id: ConnectorId,
        targets: BTreeSet<WordAddress>,
    ) -> Result<ApplyResult, ApplyError> {
        let connector = Connector::new(self.selection.clone(), targets);
        let result = self.apply(&[Op::AddConnector { connector_id, connector }])?;
        self.selection.clear();
        Ok(result)
    }
}
