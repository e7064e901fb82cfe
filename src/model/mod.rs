// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A document holds pages of aligned French/English lines plus everything users attach
//! to words: groups, connectors, highlights, cross-language links and sidebar notes.
//! Words are referenced by positional [`WordAddress`]es derived from tokenization.

pub mod address;
pub mod connector;
pub mod document;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod group;
pub mod ids;
pub mod tokenize;

pub use address::{Language, ParseAddressError, WordAddress};
pub use connector::{clamp_curvature, Connector, HeadShape, ParseStyleError, StrokeStyle};
pub use document::{Document, Highlight, Line, LinkedPair, Page, SidebarNote};
pub use group::{validate_run, Color, GrammaticalRole, GroupError, ParseRoleError, WordGroup};
pub use ids::{
    ConnectorId, GroupId, HighlightId, Id, IdError, LineId, LinkId, NoteId, PageId,
};
pub use tokenize::{
    assign_addresses, tokenize, word_at, word_count, Token, TokenKind, WordClass,
    WordClassError, DEFAULT_WORD_CLASS, UNICODE_WORD_CLASS,
};
