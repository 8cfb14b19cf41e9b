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

//! # Host Parameter Boundary
//!
//! Plain request structures standing in for the host application's
//! parameter objects, validated before anything runs. Two host conventions
//! are quarantined here so the core never sees them:
//!
//! - the field-list widget hands over a semicolon-delimited string of
//!   `"name flags"` tokens; only the text before the first whitespace is
//!   the field name, and a lone `*` means every field;
//! - the default output path is derived from the table's display name
//!   inside a scratch directory the host supplies.
//!
//! The scratch directory and progress sink are explicit parameters, never
//! ambient state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::{TioArchiveBuilder, TioArchiveStats};
use crate::errors::{Result, TioError};
use crate::export::{TioCsvExporter, TioExporterConfig};
use crate::progress::TioProgressCallback;
use crate::table::TioTableSource;

/// Parses the UI widget's semicolon-delimited field tokens.
///
/// Each token is trimmed and cut at its first whitespace; empty tokens are
/// dropped. Returns `None` when the selection means "all fields": an empty
/// list or a `*` wildcard token.
pub fn parse_field_tokens(raw: &str) -> Option<Vec<String>> {
    let names: Vec<String> = raw
        .split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.split_whitespace().next())
        .map(str::to_string)
        .collect();

    if names.is_empty() || names.iter().any(|name| name == "*") {
        None
    } else {
        Some(names)
    }
}

/// Derives the default output path for a table inside the scratch folder.
///
/// Non-alphanumeric characters of the display name are mapped to `_` so
/// the result is always a plain file name.
pub fn default_output_path(scratch_dir: &Path, table_name: &str) -> PathBuf {
    let stem: String = table_name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() {
        "table".to_string()
    } else {
        stem
    };
    scratch_dir.join(format!("{stem}.csv"))
}

/// Validated parameters for one table export invocation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TioExportRequest {
    /// Output file; defaults to a scratch path derived from the table name.
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    /// Row predicate in the source's dialect.
    #[serde(default)]
    pub where_clause: Option<String>,
    /// Postfix clause in the source's dialect.
    #[serde(default)]
    pub postfix_clause: Option<String>,
    /// Raw field-list string as delivered by the UI widget.
    #[serde(default)]
    pub field_tokens: Option<String>,
}

/// Outcome of an export run, including the user-visible message state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TioExportSummary {
    /// Data rows written (header excluded).
    pub rows_written: usize,
    /// The file the export actually wrote to.
    pub output_path: PathBuf,
    /// True when zero rows were written; a warning, never an error.
    pub warning: bool,
}

impl TioExportSummary {
    /// The message the host surfaces to the user.
    pub fn message(&self) -> String {
        let file_name = self
            .output_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.output_path.display().to_string());
        format!("exported {} rows to '{}'", self.rows_written, file_name)
    }
}

impl TioExportRequest {
    /// Runs the export against `table`, resolving defaults from
    /// `scratch_dir`.
    ///
    /// Zero rows written is reported as a warning with the literal count
    /// and a successful summary; callers must not promote it to an error.
    pub fn run(
        &self,
        table: &dyn TioTableSource,
        scratch_dir: &Path,
    ) -> Result<TioExportSummary> {
        let output_path = self
            .output_path
            .clone()
            .unwrap_or_else(|| default_output_path(scratch_dir, table.name()));
        let field_names = self.field_tokens.as_deref().and_then(parse_field_tokens);

        let config = TioExporterConfig {
            field_names,
            where_clause: self.where_clause.clone(),
            postfix_clause: self.postfix_clause.clone(),
            ..Default::default()
        };
        let stats = TioCsvExporter::new()
            .with_config(config)
            .export(table, &output_path)?;

        let summary = TioExportSummary {
            rows_written: stats.rows_written,
            output_path,
            warning: stats.rows_written == 0,
        };
        if summary.warning {
            log::warn!("{}", summary.message());
        } else {
            log::info!("{}", summary.message());
        }

        Ok(summary)
    }
}

/// Validated parameters for one archive invocation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TioArchiveRequest {
    /// Files to bundle, in archive order.
    pub input_paths: Vec<PathBuf>,
    /// Destination archive, overwritten if present.
    pub archive_path: PathBuf,
}

impl TioArchiveRequest {
    /// Runs the archive build, forwarding per-file progress to `progress`.
    pub fn run(&self, progress: Option<TioProgressCallback>) -> Result<TioArchiveStats> {
        if self.input_paths.is_empty() {
            return Err(TioError::validation(
                "archive request requires at least one input file",
            ));
        }

        let mut builder = TioArchiveBuilder::new();
        if let Some(callback) = progress {
            builder = builder.with_progress(callback);
        }
        let stats = builder.build(&self.input_paths, &self.archive_path)?;

        log::info!(
            "archived {} files into '{}'",
            stats.files_added,
            self.archive_path.display()
        );
        Ok(stats)
    }
}
