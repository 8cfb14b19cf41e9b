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

//! # Tio Error Module
//!
//! This module defines the error types and utilities used throughout the Tio
//! toolkit for consistent error handling and reporting.
//!
//! ## Error Handling Philosophy
//!
//! Tio uses a structured error approach with the following principles:
//!
//! - **Explicit Error Types**: Each error variant represents a specific
//!   category of failure, making it easier to handle errors appropriately
//! - **Context-Rich**: Errors include relevant context (field names, filter
//!   expressions, detailed messages) to aid debugging
//! - **Fail-Fast**: No error is caught and retried; every fatal condition
//!   aborts the current invocation and is surfaced verbatim to the caller
//! - **Serde Support**: Errors can be serialized/deserialized for logging
//!   and persistence
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors (unwritable output, missing archive input)
//! - **Schema**: Unknown field names and data-layout mismatches
//! - **Validation**: Input validation failures
//! - **Query**: Filter or postfix clauses invalid in the source's dialect
//! - **Render**: Field values without a canonical text form
//! - **Serde**: Serialization/deserialization errors
//! - **Zip**: ZIP archive operation errors
//! - **Internal**: Unexpected internal failures
//!
//! A degenerate-but-valid result (zero rows exported) is deliberately NOT an
//! error; callers surface it as a warning with the literal count.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zip::result::ZipError;

/// Convenience result type used throughout Tio.
///
/// This is a type alias for `std::result::Result<T, TioError>` that provides
/// a more concise way to write function signatures that return Tio errors.
pub type Result<T> = std::result::Result<T, TioError>;

/// Canonical error enumeration for Tio.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum TioError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Errors caused by unknown fields or incompatible data layout.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filter or postfix clauses rejected by the table source's dialect.
    #[error("query error in '{expression}': {message}")]
    Query { expression: String, message: String },

    /// Field values that cannot be rendered to their canonical text form.
    #[error("render error for field '{field}': {message}")]
    Render { field: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors originating from ZIP archive operations.
    #[error("zip error: {0}")]
    Zip(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for TioError {
    fn from(err: io::Error) -> Self {
        TioError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TioError {
    fn from(err: serde_json::Error) -> Self {
        TioError::Serde(err.to_string())
    }
}

impl From<ZipError> for TioError {
    fn from(err: ZipError) -> Self {
        TioError::Zip(err.to_string())
    }
}

impl TioError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        TioError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        TioError::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct query errors carrying the offending expression.
    pub fn query(expression: impl Into<String>, message: impl Into<String>) -> Self {
        TioError::Query {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Helper to construct render errors for a named field.
    pub fn render(field: impl Into<String>, message: impl Into<String>) -> Self {
        TioError::Render {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        TioError::Internal(message.into())
    }
}
