// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Project file formats.

pub mod project_json;

pub use project_json::{
    from_json_str, load_project, project_json_schema, save_project, to_json_string, Project,
    ProjectFile, ProjectJsonError, PROJECT_FILE_VERSION,
};
