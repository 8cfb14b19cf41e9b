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

//! # Table-to-CSV Exporter
//!
//! One pass, one cursor, one output file. The effective column list is
//! resolved once before the first record is written and never changes
//! mid-export. Quoting follows the standard CSV rule: a field containing
//! the delimiter, a double quote, or a line break is wrapped in double
//! quotes with embedded quotes doubled; everything else stays bare.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TioError};
use crate::progress::{TioProgressCallback, TioProgressInfo};
use crate::table::{TioQuery, TioSchema, TioTableSource};

/// Configuration for a single export run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TioExporterConfig {
    /// Columns to emit, in the given order. `None` (or an empty list)
    /// emits the full schema in declared order. Every name must exist in
    /// the table's schema.
    pub field_names: Option<Vec<String>>,
    /// Row predicate in the table source's native dialect, passed through
    /// untouched.
    pub where_clause: Option<String>,
    /// Postfix clause in the source's dialect (e.g. `ORDER BY …`), passed
    /// through untouched.
    pub postfix_clause: Option<String>,
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Rows between progress notifications; 0 disables them.
    pub progress_interval: usize,
}

impl Default for TioExporterConfig {
    fn default() -> Self {
        Self {
            field_names: None,
            where_clause: None,
            postfix_clause: None,
            delimiter: b',',
            progress_interval: 10_000,
        }
    }
}

/// Statistics about a completed export run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TioExportStats {
    /// Data rows written; the header record is not counted. Zero is a
    /// valid result and is the caller's cue to warn rather than fail.
    pub rows_written: usize,
    /// Size of the finished output file in bytes.
    pub bytes_written: usize,
    /// The effective column names, in emitted order.
    pub fields: Vec<String>,
}

/// Streams a table's rows into a delimited text file.
pub struct TioCsvExporter {
    config: TioExporterConfig,
    stats: TioExportStats,
    progress_callback: Option<TioProgressCallback>,
}

impl TioCsvExporter {
    /// Creates an exporter with default configuration.
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self {
            config: TioExporterConfig::default(),
            stats: TioExportStats::default(),
            progress_callback: None,
        }
    }

    /// Replaces the exporter configuration.
    #[allow(non_snake_case)]
    pub fn with_config(mut self, config: TioExporterConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs a progress sink notified every `progress_interval` rows.
    #[allow(non_snake_case)]
    pub fn with_progress(mut self, callback: TioProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Exports `table` to `path`, returning the run's statistics.
    ///
    /// Input-resolution failures (unknown field, invalid filter) surface
    /// before the output file is touched. The output is created if absent
    /// and truncated if present; on failure a partial file may remain. A
    /// row value without a text form aborts the run, it is never skipped.
    pub fn export(
        &mut self,
        table: &dyn TioTableSource,
        path: &Path,
    ) -> Result<TioExportStats> {
        self.stats = TioExportStats::default();

        let (fields, indices) = self.resolve_columns(table)?;
        let query = TioQuery {
            where_clause: self.config.where_clause.clone(),
            postfix_clause: self.config.postfix_clause.clone(),
        };
        let cursor = table.open_cursor(&query)?;

        let file = File::create(path)?;
        let mut writer = WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .from_writer(BufWriter::new(file));

        writer.write_record(&fields).map_err(_csv_err)?;

        let mut rows_written = 0usize;
        for row in cursor {
            let row = row?;
            let mut record = Vec::with_capacity(indices.len());
            for (position, &index) in indices.iter().enumerate() {
                let value = row.get(index).ok_or_else(|| {
                    TioError::schema(format!(
                        "row from '{}' is missing column '{}'",
                        table.name(),
                        fields[position]
                    ))
                })?;
                record.push(value.render(&fields[position])?);
            }
            writer.write_record(&record).map_err(_csv_err)?;
            rows_written += 1;

            if self.config.progress_interval > 0 && rows_written % self.config.progress_interval == 0
            {
                self.report_progress(table.name(), rows_written);
            }
        }

        writer.flush()?;
        drop(writer);

        self.stats.rows_written = rows_written;
        self.stats.fields = fields;
        if let Ok(metadata) = fs::metadata(path) {
            self.stats.bytes_written = metadata.len() as usize;
        }

        Ok(self.stats.clone())
    }

    /// Resolves the effective column list against the table's schema.
    fn resolve_columns(&self, table: &dyn TioTableSource) -> Result<(Vec<String>, Vec<usize>)> {
        let schema: &TioSchema = table.schema();
        match &self.config.field_names {
            Some(names) if !names.is_empty() => {
                let mut fields = Vec::with_capacity(names.len());
                let mut indices = Vec::with_capacity(names.len());
                for name in names {
                    let index = schema.index_of(name).ok_or_else(|| {
                        TioError::schema(format!(
                            "field '{}' does not exist in table '{}'",
                            name,
                            table.name()
                        ))
                    })?;
                    fields.push(name.clone());
                    indices.push(index);
                }
                Ok((fields, indices))
            }
            _ => Ok((schema.field_names(), (0..schema.len()).collect())),
        }
    }

    fn report_progress(&self, table_name: &str, rows_written: usize) {
        log::debug!("export of '{table_name}': {rows_written} rows written");
        if let Some(callback) = &self.progress_callback {
            callback(TioProgressInfo {
                current_item: table_name.to_string(),
                items_done: rows_written,
                items_total: None,
                bytes_written: 0,
            });
        }
    }
}

impl Default for TioCsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn _csv_err(err: csv::Error) -> TioError {
    TioError::Internal(format!("csv error: {err}"))
}
