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

//! # Tio Table Module
//!
//! This module defines the seam between the exporter and whatever provides
//! rows: a schema description, a pass-through query, and the
//! [`TioTableSource`] trait yielding forward-only, read-only cursors.
//!
//! The exporter never interprets the query clauses; they are carried to the
//! source verbatim and validated in the source's own dialect. The bundled
//! [`TioMemoryTable`](memory::TioMemoryTable) is the reference source used
//! by tests and embedders without a live host.

pub mod filter;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TioError};
use crate::value::TioValue;

pub use memory::TioMemoryTable;

/// Schema-declared type of a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TioFieldType {
    Text,
    Integer,
    Real,
    Date,
    Blob,
}

/// One column of a table schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TioFieldSpec {
    /// Column name, unique within the schema ignoring case.
    pub name: String,
    /// Declared value type.
    pub field_type: TioFieldType,
}

impl TioFieldSpec {
    pub fn new(name: impl Into<String>, field_type: TioFieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Ordered column list of a table.
///
/// Field names are matched ignoring case, the way host table systems
/// resolve them; the declared order is the order all-column exports emit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TioSchema {
    fields: Vec<TioFieldSpec>,
}

impl TioSchema {
    /// Builds a schema, rejecting duplicate names (case-insensitive).
    pub fn new(fields: Vec<TioFieldSpec>) -> Result<Self> {
        if fields.is_empty() {
            return Err(TioError::schema("schema requires at least one field"));
        }
        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.to_ascii_lowercase()) {
                return Err(TioError::schema(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }
        }
        Ok(Self { fields })
    }

    /// Columns in declared order.
    pub fn fields(&self) -> &[TioFieldSpec] {
        &self.fields
    }

    /// Declared column names, in order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.name.clone()).collect()
    }

    /// Position of a column by name, ignoring case.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| field.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Pass-through query handed to a table source when opening a cursor.
///
/// Both clauses are expressed in the source's native dialect. `where_clause`
/// is the row predicate; `postfix_clause` trails the selection (the memory
/// source accepts `ORDER BY <field> [ASC|DESC]`). The exporter forwards
/// them untouched and never re-filters or re-sorts.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TioQuery {
    pub where_clause: Option<String>,
    pub postfix_clause: Option<String>,
}

impl TioQuery {
    /// A query matching every row in source order.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_where(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    pub fn with_postfix(mut self, clause: impl Into<String>) -> Self {
        self.postfix_clause = Some(clause.into());
        self
    }
}

/// One record of a table: values in schema-declared column order.
pub type TioRow = Vec<TioValue>;

/// Forward-only, read-only iterator over a table's matching rows.
pub type TioRowCursor<'a> = Box<dyn Iterator<Item = Result<TioRow>> + 'a>;

/// A named, row-oriented data provider.
///
/// Implementations own filter validation: an expression that is not valid
/// in the source's dialect must fail `open_cursor` with a query error, never
/// be silently ignored. Cursors deliver rows in source order and do not
/// mutate the table.
pub trait TioTableSource {
    /// Display name, used for messages and default output paths.
    fn name(&self) -> &str;

    /// The table's declared schema.
    fn schema(&self) -> &TioSchema;

    /// Opens a forward-only cursor over the rows matching `query`.
    fn open_cursor(&self, query: &TioQuery) -> Result<TioRowCursor<'_>>;
}
