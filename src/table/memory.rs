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

//! # In-Memory Table Source
//!
//! Reference [`TioTableSource`] implementation backed by a `Vec` of rows.
//! It validates rows on insert against the declared schema and speaks the
//! dialect defined in [`filter`](super::filter) when cursors are opened.

use crate::errors::{Result, TioError};
use crate::table::filter::{TioFilterExpr, TioOrderBy};
use crate::table::{TioQuery, TioRow, TioRowCursor, TioSchema, TioTableSource};

/// A named table held fully in memory.
#[derive(Clone, Debug)]
pub struct TioMemoryTable {
    name: String,
    schema: TioSchema,
    rows: Vec<TioRow>,
}

impl TioMemoryTable {
    pub fn new(name: impl Into<String>, schema: TioSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            rows: Vec::new(),
        }
    }

    /// Appends a row after checking arity and per-column type agreement.
    ///
    /// `Null` is accepted in any column; any other value must match the
    /// column's declared type.
    pub fn push_row(&mut self, row: TioRow) -> Result<()> {
        if row.len() != self.schema.len() {
            return Err(TioError::schema(format!(
                "row has {} values but table '{}' declares {} fields",
                row.len(),
                self.name,
                self.schema.len()
            )));
        }
        for (value, field) in row.iter().zip(self.schema.fields()) {
            if !value.matches_type(field.field_type) {
                return Err(TioError::schema(format!(
                    "field '{}' expects {:?}, got {}",
                    field.name,
                    field.field_type,
                    value.type_name()
                )));
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style convenience over [`push_row`](Self::push_row).
    pub fn with_rows(mut self, rows: Vec<TioRow>) -> Result<Self> {
        for row in rows {
            self.push_row(row)?;
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TioTableSource for TioMemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &TioSchema {
        &self.schema
    }

    fn open_cursor(&self, query: &TioQuery) -> Result<TioRowCursor<'_>> {
        let predicate = query
            .where_clause
            .as_deref()
            .map(|expression| TioFilterExpr::parse(expression, &self.schema))
            .transpose()?;
        let ordering = query
            .postfix_clause
            .as_deref()
            .map(|clause| TioOrderBy::parse(clause, &self.schema))
            .transpose()?;

        let mut selected: Vec<TioRow> = self
            .rows
            .iter()
            .filter(|row| predicate.as_ref().map_or(true, |p| p.matches(row)))
            .cloned()
            .collect();
        if let Some(order) = ordering {
            order.apply(&mut selected);
        }

        Ok(Box::new(selected.into_iter().map(Ok)))
    }
}
