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

//! # Tio Core Library
//!
//! Tio is a small export toolkit: it turns a table's rows into a delimited
//! text file and bundles lists of files into compressed archives. Both
//! operations are synchronous, single-threaded, single-invocation passes;
//! each owns its cursor and output handle for the duration of the run and
//! releases them on every exit path.
//!
//! ## Module Overview
//!
//! - **errors**: canonical error enumeration and `Result` alias
//! - **value**: typed field values and their canonical text forms
//! - **table**: the table-source seam (schema, query, cursor) and the
//!   in-memory reference source with its filter dialect
//! - **export**: the streaming table-to-CSV exporter
//! - **archive**: the ZIP archive builder
//! - **params**: host parameter boundary (field tokens, scratch paths,
//!   user-visible messages)
//! - **progress**: the explicit progress sink handed to long operations
//!
//! ## Error Handling
//!
//! All operations return `Result<T, TioError>`. Nothing is retried: any
//! failure aborts the invocation and is surfaced verbatim. The one
//! deliberate exception to "failure" is an export matching zero rows,
//! which succeeds with a warning carrying the literal count.

pub mod archive;
pub mod errors;
pub mod export;
pub mod params;
pub mod progress;
pub mod table;
pub mod value;

pub use errors::{Result, TioError};
pub use value::TioValue;

pub use table::{
    TioFieldSpec, TioFieldType, TioMemoryTable, TioQuery, TioRow, TioRowCursor, TioSchema,
    TioTableSource,
};

pub use archive::{TioArchiveBuilder, TioArchiveStats};
pub use export::{TioCsvExporter, TioExportStats, TioExporterConfig};
pub use params::{
    default_output_path, parse_field_tokens, TioArchiveRequest, TioExportRequest,
    TioExportSummary,
};
pub use progress::{TioProgressCallback, TioProgressInfo};
