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

//! # Tio Value Module
//!
//! This module provides the typed field value carried by table rows and the
//! canonical text form every exported value is reduced to. The text form is
//! the one correctness-critical conversion in the toolkit: downstream
//! consumers parse the exported file as CSV, so a value either renders
//! deterministically or the whole export fails.

use std::cmp::Ordering;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TioError};
use crate::table::TioFieldType;

/// Canonical datetime text form used for rendered and parsed date values.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single typed field value within a table row.
///
/// `Null` is a first-class value: it is accepted in any column and renders
/// as an empty field. All other variants carry their schema-declared type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TioValue {
    /// Absent value, rendered as an empty field.
    Null,
    /// Free-form text.
    Text(String),
    /// 64-bit signed integer.
    Integer(i64),
    /// Double-precision float.
    Real(f64),
    /// Naive local datetime.
    Date(NaiveDateTime),
    /// Raw binary, rendered as standard base64.
    Blob(Vec<u8>),
}

impl TioValue {
    /// True when the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, TioValue::Null)
    }

    /// Short type tag used in schema mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            TioValue::Null => "null",
            TioValue::Text(_) => "text",
            TioValue::Integer(_) => "integer",
            TioValue::Real(_) => "real",
            TioValue::Date(_) => "date",
            TioValue::Blob(_) => "blob",
        }
    }

    /// Whether the value may be stored in a column of the given type.
    ///
    /// `Null` is accepted everywhere; every other variant must match the
    /// column's declared type exactly.
    pub fn matches_type(&self, field_type: TioFieldType) -> bool {
        match (self, field_type) {
            (TioValue::Null, _) => true,
            (TioValue::Text(_), TioFieldType::Text) => true,
            (TioValue::Integer(_), TioFieldType::Integer) => true,
            (TioValue::Real(_), TioFieldType::Real) => true,
            (TioValue::Date(_), TioFieldType::Date) => true,
            (TioValue::Blob(_), TioFieldType::Blob) => true,
            _ => false,
        }
    }

    /// Renders the value to its canonical text form.
    ///
    /// `Null` renders as the empty string, dates as `%Y-%m-%d %H:%M:%S`,
    /// blobs as standard base64. A non-finite real has no text form and
    /// fails with a render error carrying the field name; the caller must
    /// treat that as fatal rather than skip the row.
    pub fn render(&self, field: &str) -> Result<String> {
        match self {
            TioValue::Null => Ok(String::new()),
            TioValue::Text(text) => Ok(text.clone()),
            TioValue::Integer(value) => Ok(value.to_string()),
            TioValue::Real(value) => {
                if value.is_finite() {
                    Ok(value.to_string())
                } else {
                    Err(TioError::render(
                        field,
                        format!("non-finite number {value} has no text form"),
                    ))
                }
            }
            TioValue::Date(value) => Ok(value.format(DATE_FORMAT).to_string()),
            TioValue::Blob(bytes) => Ok(BASE64_STANDARD.encode(bytes)),
        }
    }

    /// Compares two values for filter evaluation and source-side ordering.
    ///
    /// Returns `None` when the comparison is undefined: any `Null` operand,
    /// or operands of incomparable types. Integers and reals compare
    /// numerically; a text operand compared against a date is parsed as
    /// `%Y-%m-%d %H:%M:%S` or `%Y-%m-%d` first.
    pub fn compare(&self, other: &TioValue) -> Option<Ordering> {
        match (self, other) {
            (TioValue::Null, _) | (_, TioValue::Null) => None,
            (TioValue::Text(a), TioValue::Text(b)) => Some(a.cmp(b)),
            (TioValue::Integer(a), TioValue::Integer(b)) => Some(a.cmp(b)),
            (TioValue::Integer(a), TioValue::Real(b)) => (*a as f64).partial_cmp(b),
            (TioValue::Real(a), TioValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (TioValue::Real(a), TioValue::Real(b)) => a.partial_cmp(b),
            (TioValue::Date(a), TioValue::Date(b)) => Some(a.cmp(b)),
            (TioValue::Date(a), TioValue::Text(b)) => _parse_datetime(b).map(|d| a.cmp(&d)),
            (TioValue::Text(a), TioValue::Date(b)) => _parse_datetime(a).map(|d| d.cmp(b)),
            (TioValue::Blob(a), TioValue::Blob(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for TioValue {
    fn from(value: &str) -> Self {
        TioValue::Text(value.to_string())
    }
}

impl From<String> for TioValue {
    fn from(value: String) -> Self {
        TioValue::Text(value)
    }
}

impl From<i64> for TioValue {
    fn from(value: i64) -> Self {
        TioValue::Integer(value)
    }
}

impl From<i32> for TioValue {
    fn from(value: i32) -> Self {
        TioValue::Integer(value as i64)
    }
}

impl From<f64> for TioValue {
    fn from(value: f64) -> Self {
        TioValue::Real(value)
    }
}

impl From<NaiveDateTime> for TioValue {
    fn from(value: NaiveDateTime) -> Self {
        TioValue::Date(value)
    }
}

impl From<Vec<u8>> for TioValue {
    fn from(value: Vec<u8>) -> Self {
        TioValue::Blob(value)
    }
}

impl<T: Into<TioValue>> From<Option<T>> for TioValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => TioValue::Null,
        }
    }
}

fn _parse_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DATE_FORMAT).ok().or_else(|| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}
