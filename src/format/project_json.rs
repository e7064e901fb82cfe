// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON project files.
//!
//! The on-disk shape is a set of plain DTOs (strings, numbers, maps keyed by id) so that
//! the file stays readable and a JSON Schema can be generated from it. Word references
//! use canonical address keys (`w:<line_id>/<lang>/<index>`). Loading validates ids,
//! address keys, group runs and link languages; it does not check that addresses still
//! point at existing words, since positional addresses may legitimately be stale.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::{
    Connector, Document, GroupError, Highlight, Id, IdError, Language, Line, LinkedPair, Page,
    ParseAddressError, SidebarNote, WordAddress, WordGroup,
};

pub const PROJECT_FILE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectFile {
    pub version: u32,
    pub name: String,
    pub document: DocumentJson,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentJson {
    #[serde(default)]
    pub pages: Vec<PageJson>,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupJson>,
    #[serde(default)]
    pub connectors: BTreeMap<String, ConnectorJson>,
    #[serde(default)]
    pub notes: BTreeMap<String, NoteJson>,
    #[serde(default)]
    pub highlights: BTreeMap<String, HighlightJson>,
    #[serde(default)]
    pub links: BTreeMap<String, LinkJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageJson {
    pub page_id: String,
    #[serde(default)]
    pub lines: Vec<LineJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineJson {
    pub line_id: String,
    #[serde(default)]
    pub french: String,
    #[serde(default)]
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GroupJson {
    pub addresses: Vec<String>,
    pub role: String,
    pub color: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectorJson {
    pub sources: Vec<String>,
    pub targets: Vec<String>,
    pub style: String,
    pub head: String,
    pub stroke_width: f64,
    pub color: String,
    pub curvature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NoteJson {
    pub line_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightJson {
    pub addresses: Vec<String>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LinkJson {
    pub french: Vec<String>,
    pub english: Vec<String>,
}

/// A project loaded back into the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub document: Document,
}

#[derive(Debug, Error)]
pub enum ProjectJsonError {
    #[error("project json is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unsupported project version {found} (expected {PROJECT_FILE_VERSION})")]
    UnsupportedVersion { found: u32 },
    #[error("invalid id in {field}: {value:?}")]
    InvalidId {
        field: &'static str,
        value: String,
        #[source]
        source: IdError,
    },
    #[error("invalid word address in {field}: {value:?}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        #[source]
        source: ParseAddressError,
    },
    #[error("invalid value in {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
    #[error("duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },
    #[error("{field} references unknown line {value}")]
    UnknownLine { field: &'static str, value: String },
    #[error("invalid group {group_id}: {source}")]
    InvalidGroup {
        group_id: String,
        #[source]
        source: GroupError,
    },
    #[error("link {link_id}: {address} is not a {expected} word")]
    LinkLanguage { link_id: String, expected: Language, address: String },
}

impl ProjectFile {
    pub fn from_document(name: impl Into<String>, document: &Document) -> Self {
        Self {
            version: PROJECT_FILE_VERSION,
            name: name.into(),
            document: document_to_json(document),
        }
    }

    pub fn into_project(self) -> Result<Project, ProjectJsonError> {
        if self.version != PROJECT_FILE_VERSION {
            return Err(ProjectJsonError::UnsupportedVersion { found: self.version });
        }
        let document = document_from_json(self.document)?;
        Ok(Project { name: self.name, document })
    }
}

pub fn to_json_string(name: &str, document: &Document) -> Result<String, ProjectJsonError> {
    Ok(serde_json::to_string_pretty(&ProjectFile::from_document(name, document))?)
}

pub fn from_json_str(input: &str) -> Result<Project, ProjectJsonError> {
    let file: ProjectFile = serde_json::from_str(input)?;
    file.into_project()
}

pub fn load_project(path: &Path) -> Result<Project, ProjectJsonError> {
    let input = fs::read_to_string(path)
        .map_err(|source| ProjectJsonError::Io { path: path.to_path_buf(), source })?;
    let project = from_json_str(&input)?;
    debug!(path = %path.display(), lines = project.document.lines().count(), "loaded project");
    Ok(project)
}

/// Writes to a sibling temp file and renames it into place.
pub fn save_project(path: &Path, name: &str, document: &Document) -> Result<(), ProjectJsonError> {
    let contents = to_json_string(name, document)?;
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| ProjectJsonError::Io { path, source }
    };

    let file_name = path.file_name().ok_or_else(|| ProjectJsonError::Io {
        path: path.to_path_buf(),
        source: io::Error::other("path has no file name"),
    })?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));
    fs::write(&tmp_path, contents).map_err(io_err(&tmp_path))?;
    fs::rename(&tmp_path, path).map_err(io_err(path))?;
    debug!(path = %path.display(), "saved project");
    Ok(())
}

/// JSON Schema of [`ProjectFile`].
pub fn project_json_schema() -> schemars::Schema {
    schemars::schema_for!(ProjectFile)
}

fn keys(addresses: &BTreeSet<WordAddress>) -> Vec<String> {
    addresses.iter().map(ToString::to_string).collect()
}

fn document_to_json(document: &Document) -> DocumentJson {
    DocumentJson {
        pages: document
            .pages()
            .iter()
            .map(|page| PageJson {
                page_id: page.page_id().to_string(),
                lines: page
                    .lines()
                    .iter()
                    .map(|line| LineJson {
                        line_id: line.line_id().to_string(),
                        french: line.text(Language::French).to_owned(),
                        english: line.text(Language::English).to_owned(),
                    })
                    .collect(),
            })
            .collect(),
        groups: document
            .groups()
            .iter()
            .map(|(id, group)| {
                let json = GroupJson {
                    addresses: keys(group.addresses()),
                    role: group.role().to_string(),
                    color: group.color().to_owned(),
                    label: group.label().map(ToOwned::to_owned),
                };
                (id.to_string(), json)
            })
            .collect(),
        connectors: document
            .connectors()
            .iter()
            .map(|(id, connector)| {
                let json = ConnectorJson {
                    sources: keys(connector.sources()),
                    targets: keys(connector.targets()),
                    style: connector.style().to_string(),
                    head: connector.head().to_string(),
                    stroke_width: connector.stroke_width(),
                    color: connector.color().to_owned(),
                    curvature: connector.curvature(),
                };
                (id.to_string(), json)
            })
            .collect(),
        notes: document
            .notes()
            .iter()
            .map(|(id, note)| {
                let json =
                    NoteJson { line_id: note.line_id().to_string(), text: note.text().to_owned() };
                (id.to_string(), json)
            })
            .collect(),
        highlights: document
            .highlights()
            .iter()
            .map(|(id, highlight)| {
                let json = HighlightJson {
                    addresses: keys(highlight.addresses()),
                    color: highlight.color().to_owned(),
                };
                (id.to_string(), json)
            })
            .collect(),
        links: document
            .links()
            .iter()
            .map(|(id, link)| {
                let json = LinkJson { french: keys(link.french()), english: keys(link.english()) };
                (id.to_string(), json)
            })
            .collect(),
    }
}

fn parse_id<T>(field: &'static str, value: String) -> Result<Id<T>, ProjectJsonError> {
    Id::new(value.clone()).map_err(|source| ProjectJsonError::InvalidId { field, value, source })
}

fn parse_addresses(
    field: &'static str,
    values: Vec<String>,
) -> Result<BTreeSet<WordAddress>, ProjectJsonError> {
    values
        .into_iter()
        .map(|value| {
            WordAddress::parse(&value)
                .map_err(|source| ProjectJsonError::InvalidAddress { field, value, source })
        })
        .collect()
}

fn parse_value<V: std::str::FromStr>(
    field: &'static str,
    value: String,
) -> Result<V, ProjectJsonError> {
    value.parse::<V>().map_err(|_| ProjectJsonError::InvalidValue { field, value })
}

fn document_from_json(json: DocumentJson) -> Result<Document, ProjectJsonError> {
    let mut document = Document::default();
    let mut page_ids = BTreeSet::new();
    let mut line_ids = BTreeSet::new();

    for page_json in json.pages {
        let page_id = parse_id("pages[].page_id", page_json.page_id)?;
        if !page_ids.insert(page_id.clone()) {
            let value = page_id.to_string();
            return Err(ProjectJsonError::Duplicate { field: "page_id", value });
        }
        let mut page = Page::new(page_id);
        for line_json in page_json.lines {
            let line_id = parse_id("pages[].lines[].line_id", line_json.line_id)?;
            if !line_ids.insert(line_id.clone()) {
                return Err(ProjectJsonError::Duplicate {
                    field: "line_id",
                    value: line_id.to_string(),
                });
            }
            page.lines_mut().push(Line::new(line_id, line_json.french, line_json.english));
        }
        document.pages_mut().push(page);
    }

    for (id, group_json) in json.groups {
        let group_id = parse_id("groups{}", id)?;
        let addresses = parse_addresses("groups{}.addresses", group_json.addresses)?;
        let role = parse_value("groups{}.role", group_json.role)?;
        let group = WordGroup::new(addresses, role, group_json.color, group_json.label).map_err(
            |source| ProjectJsonError::InvalidGroup { group_id: group_id.to_string(), source },
        )?;
        document.groups_mut().insert(group_id, group);
    }

    for (id, connector_json) in json.connectors {
        let connector_id = parse_id("connectors{}", id)?;
        let mut connector = Connector::new(
            parse_addresses("connectors{}.sources", connector_json.sources)?,
            parse_addresses("connectors{}.targets", connector_json.targets)?,
        )
        .with_style(parse_value("connectors{}.style", connector_json.style)?)
        .with_head(parse_value("connectors{}.head", connector_json.head)?)
        .with_curvature(connector_json.curvature);
        connector.set_stroke_width(connector_json.stroke_width);
        connector.set_color(connector_json.color);
        document.connectors_mut().insert(connector_id, connector);
    }

    for (id, note_json) in json.notes {
        let note_id = parse_id("notes{}", id)?;
        let line_id = parse_id("notes{}.line_id", note_json.line_id)?;
        if !line_ids.contains(&line_id) {
            return Err(ProjectJsonError::UnknownLine {
                field: "notes{}.line_id",
                value: line_id.to_string(),
            });
        }
        document.notes_mut().insert(note_id, SidebarNote::new(line_id, note_json.text));
    }

    for (id, highlight_json) in json.highlights {
        let highlight_id = parse_id("highlights{}", id)?;
        let addresses = parse_addresses("highlights{}.addresses", highlight_json.addresses)?;
        let highlight = Highlight::new(addresses, highlight_json.color);
        document.highlights_mut().insert(highlight_id, highlight);
    }

    for (id, link_json) in json.links {
        let link_id = parse_id("links{}", id)?;
        let french = parse_addresses("links{}.french", link_json.french)?;
        let english = parse_addresses("links{}.english", link_json.english)?;
        for (side, expected) in [(&french, Language::French), (&english, Language::English)] {
            if let Some(address) = side.iter().find(|a| a.language() != expected) {
                return Err(ProjectJsonError::LinkLanguage {
                    link_id: link_id.to_string(),
                    expected,
                    address: address.to_string(),
                });
            }
        }
        document.links_mut().insert(link_id, LinkedPair::new(french, english));
    }

    Ok(document)
}
