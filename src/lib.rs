// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interlinea: the interaction core of a bilingual (French/English) interlinear editor.
//!
//! Lines are tokenized into positionally addressed words; users attach groups,
//! connectors, highlights, links and notes to those words. The crate computes connector
//! curves from on-screen word rectangles, keeps them fresh through a debounced recompute
//! loop, and provides a bounded undo/redo history over whole-document snapshots.

pub mod config;
pub mod editor;
pub mod format;
pub mod history;
pub mod layout;
pub mod logging;
pub mod model;
pub mod ops;
pub mod render;
