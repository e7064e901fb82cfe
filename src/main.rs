// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interlinea inspection CLI.
//!
//! Tokenizes text, checks project files, prints connector paths for a set of word
//! rectangles, and emits the project JSON Schema.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use interlinea::config::EditorConfig;
use interlinea::format::project_json::{load_project, project_json_schema};
use interlinea::layout::{route_connectors, GeometryConfig, Point, Rect, RouteContext, Viewport};
use interlinea::model::{assign_addresses, tokenize, Language, LineId, WordAddress, WordClass};
use interlinea::render::{bracket_groups, decorate_line};

#[derive(Debug, Parser)]
#[command(name = "interlinea", version, about = "Inspect interlinear projects")]
struct Cli {
    /// Editor config (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when INTERLINEA_LOG / RUST_LOG are unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split text into word and separator tokens with their addresses.
    Tokens {
        text: String,
        #[arg(long, value_enum, default_value_t = Lang::Fr)]
        language: Lang,
        #[arg(long, default_value = "line")]
        line_id: String,
    },
    /// Validate a project file and report stale word references.
    Check { project: PathBuf },
    /// Print every line with grouped words in brackets.
    Lines { project: PathBuf },
    /// Route connectors against word rectangles and print SVG paths.
    Paths {
        project: PathBuf,
        /// JSON object: address key -> [left, top, width, height].
        #[arg(long)]
        anchors: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        #[arg(long, default_value_t = 0.0)]
        origin_x: f64,
        #[arg(long, default_value_t = 0.0)]
        origin_y: f64,
    },
    /// Print the JSON Schema of project files.
    Schema,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Lang {
    Fr,
    En,
}

impl From<Lang> for Language {
    fn from(value: Lang) -> Self {
        match value {
            Lang::Fr => Language::French,
            Lang::En => Language::English,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    interlinea::logging::init_logging(&cli.log_level);

    let config = EditorConfig::resolve(cli.config.as_deref())
        .with_context(|| match &cli.config {
            Some(path) => format!("loading config {}", path.display()),
            None => "reading config overrides".to_owned(),
        })?;
    let class = config.word_class()?;
    debug!(word_class = class.class(), "config resolved");

    match cli.command {
        Command::Tokens { text, language, line_id } => {
            tokens(&text, language.into(), &line_id, &class)
        }
        Command::Check { project } => check(&project, &class),
        Command::Lines { project } => lines(&project, &class),
        Command::Paths { project, anchors, zoom, origin_x, origin_y } => {
            let viewport = Viewport::new(Point::new(origin_x, origin_y), zoom);
            paths(&project, &anchors, viewport, &config.geometry)
        }
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&project_json_schema())?;
            println!("{schema}");
            Ok(())
        }
    }
}

fn tokens(text: &str, language: Language, line_id: &str, class: &WordClass) -> Result<()> {
    let line_id = LineId::new(line_id).context("invalid line id")?;
    let tokens = tokenize(text, class);
    let mut addresses = assign_addresses(&tokens, &line_id, language).into_iter().peekable();
    for (index, token) in tokens.iter().enumerate() {
        let address = match addresses.peek() {
            Some((token_index, _)) if *token_index == index => addresses.next().map(|(_, a)| a),
            _ => None,
        };
        let kind = if token.is_word() { "word" } else { "sep" };
        match address {
            Some(address) => println!("{kind:<4} {:?} {address}", token.text()),
            None => println!("{kind:<4} {:?}", token.text()),
        }
    }
    Ok(())
}

fn check(project: &Path, class: &WordClass) -> Result<()> {
    let project = load_project(project)
        .with_context(|| format!("loading project {}", project.display()))?;
    let document = &project.document;
    println!(
        "{}: {} pages, {} lines, {} groups, {} connectors, {} highlights, {} links, {} notes",
        project.name,
        document.pages().len(),
        document.lines().count(),
        document.groups().len(),
        document.connectors().len(),
        document.highlights().len(),
        document.links().len(),
        document.notes().len(),
    );

    let dangling = document.dangling_addresses(class);
    if dangling.is_empty() {
        return Ok(());
    }
    for address in &dangling {
        println!("dangling {address}");
    }
    bail!("{} word reference(s) no longer match the line text", dangling.len())
}

fn lines(project: &Path, class: &WordClass) -> Result<()> {
    let project = load_project(project)
        .with_context(|| format!("loading project {}", project.display()))?;
    let document = &project.document;
    for line in document.lines() {
        for language in Language::ALL {
            let Some(tokens) = decorate_line(document, line.line_id(), language, class) else {
                continue;
            };
            println!("{} {language}: {}", line.line_id(), bracket_groups(&tokens));
        }
    }
    Ok(())
}

fn paths(
    project: &Path,
    anchors: &Path,
    viewport: Viewport,
    geometry: &GeometryConfig,
) -> Result<()> {
    let project = load_project(project)
        .with_context(|| format!("loading project {}", project.display()))?;
    let anchors = load_anchors(anchors)?;
    let cx = RouteContext { anchors: &anchors, viewport: &viewport, config: geometry };
    for routed in route_connectors(&project.document, cx) {
        println!(
            "{} {} -> {}: {}",
            routed.connector_id,
            routed.source_group,
            routed.target_group,
            routed.path.to_svg_path()
        );
    }
    Ok(())
}

fn load_anchors(path: &Path) -> Result<BTreeMap<WordAddress, Rect>> {
    let input =
        fs::read_to_string(path).with_context(|| format!("reading anchors {}", path.display()))?;
    let raw: BTreeMap<String, [f64; 4]> =
        serde_json::from_str(&input).context("anchors must map address keys to 4 numbers")?;
    raw.into_iter()
        .map(|(key, [left, top, width, height])| {
            let address = WordAddress::parse(&key).with_context(|| format!("anchor key {key}"))?;
            Ok((address, Rect::from_origin_size(left, top, width, height)))
        })
        .collect()
}
