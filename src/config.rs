// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor configuration.
//!
//! Every section is optional in the JSON file; missing fields take their defaults.
//! Environment variables override file values: `INTERLINEA_HISTORY_CAPACITY`,
//! `INTERLINEA_DEBOUNCE_MS`, `INTERLINEA_POLL_INTERVAL_MS` and `INTERLINEA_WORD_CLASS`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::history::DEFAULT_CAPACITY;
use crate::layout::{GeometryConfig, SyncConfig};
use crate::model::{WordClass, WordClassError, DEFAULT_WORD_CLASS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub history: HistoryConfig,
    pub geometry: GeometryConfig,
    pub sync: SyncConfig,
    pub tokenizer: TokenizerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Regex character class for one word character, e.g. `[A-Za-z]`.
    pub word_class: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { word_class: DEFAULT_WORD_CLASS.to_owned() }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    WordClass(#[from] WordClassError),
}

impl EditorConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.word_class()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&input)
    }

    /// Loads `path` when given, otherwise the defaults; then applies environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.word_class()?;
        Ok(config)
    }

    /// Applies `INTERLINEA_*` overrides from `lookup`. Unparseable numbers are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn number<T: std::str::FromStr>(key: &str, value: Option<String>) -> Option<T> {
            let value = value?;
            let parsed = value.trim().parse::<T>().ok();
            if parsed.is_none() {
                warn!(key, value = %value, "ignoring unparseable config override");
            }
            parsed
        }

        const CAPACITY: &str = "INTERLINEA_HISTORY_CAPACITY";
        const DEBOUNCE: &str = "INTERLINEA_DEBOUNCE_MS";
        const POLL: &str = "INTERLINEA_POLL_INTERVAL_MS";
        const WORD_CLASS: &str = "INTERLINEA_WORD_CLASS";

        if let Some(capacity) = number(CAPACITY, lookup(CAPACITY)) {
            self.history.capacity = capacity;
        }
        if let Some(debounce) = number(DEBOUNCE, lookup(DEBOUNCE)) {
            self.sync.debounce_ms = debounce;
        }
        if let Some(poll) = number(POLL, lookup(POLL)) {
            self.sync.poll_interval_ms = poll;
        }
        if let Some(class) = lookup(WORD_CLASS).filter(|class| !class.is_empty()) {
            self.tokenizer.word_class = class;
        }
        self
    }

    /// Compiles the configured word class.
    pub fn word_class(&self) -> Result<WordClass, WordClassError> {
        if self.tokenizer.word_class == DEFAULT_WORD_CLASS {
            return Ok(WordClass::default());
        }
        WordClass::new(self.tokenizer.word_class.clone())
    }
}
