// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flat-file storage for strategy YAML documents.
//!
//! Every strategy is one `.yml`/`.yaml` file directly inside the strategy
//! directory. File names coming from requests are checked (or sanitised,
//! for uploads) so that nothing outside that directory can be touched.

use crate::error::AppError;
use crate::models::StrategyConfig;
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;

static STRATEGY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("strategy name pattern is valid"));

/// Errors from strategy storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid strategy name: {0}")]
    InvalidName(String),

    #[error("Empty filename.")]
    EmptyFilename,

    #[error("Only YAML files are accepted.")]
    NotYaml,

    #[error("File is not valid YAML: {0}")]
    InvalidYaml(String),

    #[error("Strategy not found: {0}")]
    NotFound(String),

    #[error("Strategy I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => AppError::NotFound(format!("Strategy {name}")),
            StoreError::Io(e) => AppError::Storage(e.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

/// Whether `name` can be used as a new strategy's base name.
pub fn is_valid_strategy_name(name: &str) -> bool {
    STRATEGY_NAME.is_match(name)
}

/// Whether `name` has a YAML extension (case-insensitive).
pub fn is_yaml_filename(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".yml") || lower.ends_with(".yaml")
}

/// Reduce an uploaded filename to a safe, flat file name.
///
/// Path separators become spaces, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped and leading/trailing dots and
/// underscores are stripped. Returns `None` if nothing is left.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let spaced = raw.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Strategy files on disk.
#[derive(Debug, Clone)]
pub struct StrategyStore {
    dir: PathBuf,
}

impl StrategyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the strategy directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// File names of all strategies, sorted.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Write a new `<name>.yml` with default market settings.
    ///
    /// An existing file of the same name is replaced.
    pub async fn create(&self, name: &str, kind: &str) -> Result<String, StoreError> {
        if !is_valid_strategy_name(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let file_name = format!("{name}.yml");
        let yaml = serde_yaml::to_string(&StrategyConfig::new(kind))
            .map_err(|e| StoreError::InvalidYaml(e.to_string()))?;

        self.ensure_dir().await?;
        fs::write(self.dir.join(&file_name), yaml).await?;
        tracing::info!(file = %file_name, strategy = kind, "Strategy created");
        Ok(file_name)
    }

    /// Parse a stored strategy file.
    pub async fn read(&self, file_name: &str) -> Result<serde_yaml::Value, StoreError> {
        let path = self.existing_path(file_name)?;
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(file_name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        serde_yaml::from_str(&contents).map_err(|e| StoreError::InvalidYaml(e.to_string()))
    }

    /// Remove a stored strategy file.
    pub async fn delete(&self, file_name: &str) -> Result<(), StoreError> {
        let path = self.existing_path(file_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(file = %file_name, "Strategy deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(file_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save an uploaded strategy file, overwriting any file of the same name.
    ///
    /// Returns the sanitised file name it was stored under.
    pub async fn import(&self, raw_name: &str, contents: &[u8]) -> Result<String, StoreError> {
        if raw_name.trim().is_empty() {
            return Err(StoreError::EmptyFilename);
        }
        let file_name = sanitize_filename(raw_name).ok_or(StoreError::EmptyFilename)?;
        if !is_yaml_filename(&file_name) {
            return Err(StoreError::NotYaml);
        }

        serde_yaml::from_slice::<serde_yaml::Value>(contents)
            .map_err(|e| StoreError::InvalidYaml(e.to_string()))?;

        self.ensure_dir().await?;
        fs::write(self.dir.join(&file_name), contents).await?;
        tracing::info!(file = %file_name, bytes = contents.len(), "Strategy imported");
        Ok(file_name)
    }

    /// Path of an addressed strategy file, refusing anything that is not a
    /// plain YAML file name.
    fn existing_path(&self, file_name: &str) -> Result<PathBuf, StoreError> {
        if sanitize_filename(file_name).as_deref() != Some(file_name) {
            return Err(StoreError::InvalidName(file_name.to_string()));
        }
        if !is_yaml_filename(file_name) {
            return Err(StoreError::NotYaml);
        }
        Ok(self.dir.join(file_name))
    }
}
