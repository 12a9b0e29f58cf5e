// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use tracing::debug;

pub const DEFAULT_MAX_IMPORT_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Loaded { path: PathBuf, text: String },
    Failed { path: PathBuf, error: String },
}

impl ImportOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded { path, .. } | Self::Failed { path, .. } => path,
        }
    }

    /// File name for status lines, falling back to the full path.
    pub fn display_name(&self) -> String {
        let path = self.path();
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// Read `path` as UTF-8 text. Binary and oversized files are rejected.
pub fn import_text_file(path: &Path, max_bytes: u64) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open file {}", path.display()))?;
    let metadata = file
        .metadata()
        .with_context(|| format!("inspect file {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a regular file", path.display());
    }
    if metadata.len() > max_bytes {
        bail!(
            "{} is {} bytes; the import limit is {} bytes",
            path.display(),
            metadata.len(),
            max_bytes
        );
    }

    let bytes =
        read_capped(file, max_bytes).with_context(|| format!("read file {}", path.display()))?;
    let text = String::from_utf8(bytes).map_err(|_| {
        anyhow!(
            "{} is not a UTF-8 text file -- save it as .txt or .md and retry",
            path.display()
        )
    })?;
    Ok(text.strip_prefix('\u{feff}').map(str::to_owned).unwrap_or(text))
}

/// Read at most `max_bytes`; a reader with more than that is an error even
/// when its size was checked beforehand.
fn read_capped<R: Read>(reader: R, max_bytes: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        bail!("content grew past the import limit of {max_bytes} bytes");
    }
    Ok(bytes)
}

/// Read `path` on a worker thread and report the outcome on `tx`. A dropped
/// receiver means the widget is gone; the outcome is discarded.
pub fn spawn_text_import(
    path: PathBuf,
    max_bytes: u64,
    tx: Sender<ImportOutcome>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let outcome = match import_text_file(&path, max_bytes) {
            Ok(text) => ImportOutcome::Loaded { path, text },
            Err(error) => ImportOutcome::Failed {
                path,
                error: format!("{error:#}"),
            },
        };
        if tx.send(outcome).is_err() {
            debug!("import receiver dropped before the read finished");
        }
    })
}
