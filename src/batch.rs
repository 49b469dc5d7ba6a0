//! One-shot processing of every Lottie asset in a directory.
//!
//! Each `lottie-*.json` file is read, transformed and written back on its own: a
//! failing file is recorded in the [`BatchReport`] and the batch moves on. Only an
//! unreadable directory stops the run.

use crate::error::{Result, ToolError};
use crate::lottie::{recolor, sanitize_with_stats};
use glob::Pattern;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File names picked up by the batch
pub const ASSET_PATTERN: &str = "lottie-*.json";

/// Transformation applied to every asset of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Drop text layers and font tables
    Clean,
    /// Force fills and strokes to opaque white
    Whiten,
}

impl Operation {
    /// Console line announcing a processed file
    pub fn success_message(&self, file_name: &str) -> String {
        match self {
            Operation::Clean => format!("Cleaned {}", file_name),
            Operation::Whiten => format!("Modernized {} (Whited-out)", file_name),
        }
    }
}

/// Knobs for a batch run
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Pretty-print the rewritten JSON instead of the compact default
    pub pretty: bool,
    /// Transform and serialize but leave the files untouched
    pub dry_run: bool,
}

/// Result for one asset file
#[derive(Debug)]
pub struct FileOutcome {
    pub file_name: String,
    pub path: PathBuf,
    pub result: Result<()>,
}

impl FileOutcome {
    /// Console line for this file
    pub fn message(&self, operation: Operation) -> String {
        match &self.result {
            Ok(()) => operation.success_message(&self.file_name),
            Err(e) => format!("Error processing {}: {}", self.file_name, e),
        }
    }
}

/// Everything a batch run did, in processing order
#[derive(Debug)]
pub struct BatchReport {
    pub operation: Operation,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }
}

/// Run an operation over every `lottie-*.json` file directly inside `dir`
///
/// Files are processed in file-name order. Per-file failures end up in the report.
///
/// # Errors
/// * `ToolError::DirectoryUnreadable` - `dir` cannot be listed
/// * `ToolError::InvalidPattern` - [`ASSET_PATTERN`] is not a valid glob
pub fn run(dir: &Path, operation: Operation, options: &BatchOptions) -> Result<BatchReport> {
    let assets = find_assets(dir)?;
    debug!(dir = %dir.display(), count = assets.len(), ?operation, "processing assets");

    let outcomes = assets
        .into_iter()
        .map(|path| {
            let result = process_file(&path, operation, options);
            let outcome = FileOutcome {
                file_name: file_name_of(&path),
                path,
                result,
            };
            if let Err(e) = &outcome.result {
                warn!(file = %outcome.path.display(), error = %e, "asset skipped");
            }
            outcome
        })
        .collect();

    Ok(BatchReport {
        operation,
        outcomes,
    })
}

/// List the asset files of a directory (non-recursive), sorted by file name
pub fn find_assets(dir: &Path) -> Result<Vec<PathBuf>> {
    let unreadable = |source| ToolError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };
    let pattern = asset_pattern()?;

    let mut assets = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches(name));
        if matches && path.is_file() {
            assets.push(path);
        }
    }

    assets.sort();
    Ok(assets)
}

/// Read, transform and write back a single asset
pub fn process_file(path: &Path, operation: Operation, options: &BatchOptions) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: JsonValue = serde_json::from_str(&text).map_err(|source| ToolError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let transformed = transform(doc, operation, path)?;

    let output = if options.pretty {
        serde_json::to_string_pretty(&transformed)
    } else {
        serde_json::to_string(&transformed)
    }
    .map_err(|source| ToolError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        file = %path.display(),
        bytes_before = text.len(),
        bytes_after = output.len(),
        dry_run = options.dry_run,
        "asset transformed"
    );

    if options.dry_run {
        return Ok(());
    }

    fs::write(path, output).map_err(|source| ToolError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn transform(doc: JsonValue, operation: Operation, path: &Path) -> Result<JsonValue> {
    match operation {
        Operation::Clean => {
            let (clean, stats) = sanitize_with_stats(doc);
            if stats.is_empty() {
                debug!(file = %path.display(), "nothing to remove");
            } else {
                debug!(
                    file = %path.display(),
                    text_layers = stats.text_layers,
                    font_tables = stats.font_tables,
                    nulls = stats.nulls,
                    "sanitized"
                );
            }
            clean.ok_or_else(|| ToolError::TextLayerRoot {
                path: path.to_path_buf(),
            })
        }
        Operation::Whiten => {
            let mut doc = doc;
            let colors = recolor(&mut doc);
            debug!(file = %path.display(), colors, "recolored");
            Ok(doc)
        }
    }
}

fn asset_pattern() -> Result<Pattern> {
    Ok(Pattern::new(ASSET_PATTERN)?)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
