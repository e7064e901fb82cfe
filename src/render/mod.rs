// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering helpers for interlinear lines.
//!
//! Renderers (editor views, exporters) decorate tokens with group and highlight membership
//! from one place so that every output agrees on which words and separators are styled.

pub mod line;

pub use line::{bracket_groups, decorate_line, RenderedToken};
