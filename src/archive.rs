//! Copyright © 2025-2026 Maren Holt. All Rights Reserved.
//!
//! This file is part of Tio.
//! The Tio project belongs to the Veldt Data Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Archive Builder
//!
//! Bundles an ordered list of files into one compressed ZIP archive. Each
//! input is stored under its base name with directory components stripped,
//! in the given order, and the installed progress sink is notified once per
//! file. Inputs are resolved before the destination is touched; a missing
//! input aborts the run with no archive written.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zip::write::{FileOptions, ZipWriter};

use crate::errors::{Result, TioError};
use crate::progress::{TioProgressCallback, TioProgressInfo};

/// Statistics about a completed archive run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TioArchiveStats {
    /// Number of entries written to the archive.
    pub files_added: usize,
    /// Size of the finished archive in bytes.
    pub bytes_written: usize,
}

/// Builds a single ZIP archive from a list of existing files.
pub struct TioArchiveBuilder {
    progress_callback: Option<TioProgressCallback>,
}

impl TioArchiveBuilder {
    /// Creates a builder with no progress sink installed.
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self {
            progress_callback: None,
        }
    }

    /// Installs a progress sink notified after each file is added.
    #[allow(non_snake_case)]
    pub fn with_progress(mut self, callback: TioProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Writes every input into `archive_path`, overwriting it if present.
    ///
    /// Entries keep their base names; duplicates are not deduplicated.
    /// Compression is the library default, deliberately not configurable.
    pub fn build(&self, inputs: &[PathBuf], archive_path: &Path) -> Result<TioArchiveStats> {
        for input in inputs {
            if !input.is_file() {
                return Err(TioError::Io(format!(
                    "input file not found: {}",
                    input.display()
                )));
            }
        }

        let file = File::create(archive_path)?;
        let mut archive = ZipWriter::new(BufWriter::new(file));

        for (index, input) in inputs.iter().enumerate() {
            let entry_name = input
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| {
                    TioError::validation(format!(
                        "input path has no usable file name: {}",
                        input.display()
                    ))
                })?;

            archive.start_file(entry_name, FileOptions::default())?;
            let mut source = File::open(input)?;
            std::io::copy(&mut source, &mut archive)?;

            log::debug!("added '{entry_name}' to '{}'", archive_path.display());
            self.report_progress(entry_name, index + 1, inputs.len());
        }

        archive.finish()?;

        let mut stats = TioArchiveStats {
            files_added: inputs.len(),
            bytes_written: 0,
        };
        if let Ok(metadata) = fs::metadata(archive_path) {
            stats.bytes_written = metadata.len() as usize;
        }

        Ok(stats)
    }

    fn report_progress(&self, entry_name: &str, items_done: usize, items_total: usize) {
        if let Some(callback) = &self.progress_callback {
            callback(TioProgressInfo {
                current_item: entry_name.to_string(),
                items_done,
                items_total: Some(items_total),
                bytes_written: 0,
            });
        }
    }
}

impl Default for TioArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
