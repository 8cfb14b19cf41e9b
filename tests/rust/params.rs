//! Copyright © 2025 Maren Holt. All Rights Reserved.
//!
//! This file is part of Tio.
//! The Tio project belongs to the Veldt project team.
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

//! # Tio Parameter Boundary Tests
//!
//! Tests driving exports through the host-facing request structures:
//! UI field tokens, scratch-directory defaults, and the zero-rows warning.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test params
//! ```

use tempfile::tempdir;
use tiox::{
    TioError, TioExportRequest, TioFieldSpec, TioFieldType, TioMemoryTable, TioSchema, TioValue,
};

fn sites_table() -> TioMemoryTable {
    let schema = TioSchema::new(vec![
        TioFieldSpec::new("SiteId", TioFieldType::Integer),
        TioFieldSpec::new("SiteLocation", TioFieldType::Text),
    ])
    .unwrap();
    TioMemoryTable::new("Survey Sites", schema)
        .with_rows(vec![
            vec![1.into(), "Lake, North".into()],
            vec![2.into(), TioValue::Null],
        ])
        .unwrap()
}

/// The raw UI token string is cut down to bare field names.
#[test]
fn request_parses_ui_field_tokens() {
    let dir = tempdir().unwrap();
    let request = TioExportRequest {
        output_path: Some(dir.path().join("sites.csv")),
        field_tokens: Some("SiteId VISIBLE;SiteLocation HIDDEN".into()),
        ..Default::default()
    };

    let summary = request.run(&sites_table(), dir.path()).unwrap();
    assert_eq!(summary.rows_written, 2);
    assert!(!summary.warning);

    let content = std::fs::read_to_string(dir.path().join("sites.csv")).unwrap();
    assert!(content.starts_with("SiteId,SiteLocation\n"));
}

/// A `*` token selects every schema column.
#[test]
fn wildcard_token_selects_all_fields() {
    let dir = tempdir().unwrap();
    let request = TioExportRequest {
        output_path: Some(dir.path().join("sites.csv")),
        field_tokens: Some("*".into()),
        ..Default::default()
    };

    let summary = request.run(&sites_table(), dir.path()).unwrap();
    assert_eq!(summary.rows_written, 2);
    let content = std::fs::read_to_string(dir.path().join("sites.csv")).unwrap();
    assert!(content.starts_with("SiteId,SiteLocation\n"));
}

/// Without an explicit path, output lands in the scratch directory under
/// a name derived from the table's display name.
#[test]
fn default_path_derives_from_table_name() {
    let scratch = tempdir().unwrap();
    let request = TioExportRequest::default();

    let summary = request.run(&sites_table(), scratch.path()).unwrap();
    assert_eq!(summary.output_path, scratch.path().join("Survey_Sites.csv"));
    assert!(summary.output_path.exists());
    assert!(summary.message().contains("Survey_Sites.csv"));
    assert!(summary.message().contains("2 rows"));
}

/// Zero matching rows is success-with-warning carrying the literal count.
#[test]
fn zero_rows_is_a_warning_not_an_error() {
    let scratch = tempdir().unwrap();
    let request = TioExportRequest {
        where_clause: Some("SiteId > 100".into()),
        ..Default::default()
    };

    let summary = request.run(&sites_table(), scratch.path()).unwrap();
    assert_eq!(summary.rows_written, 0);
    assert!(summary.warning);
    assert!(summary.message().contains("exported 0 rows"));
}

/// Requests deserialize straight from the host's JSON parameter payload.
#[test]
fn request_deserializes_from_host_json() {
    let request: TioExportRequest = serde_json::from_str(
        r#"{"field_tokens": "SiteId VISIBLE;SiteLocation", "where_clause": "SiteId = 1"}"#,
    )
    .unwrap();

    let scratch = tempdir().unwrap();
    let summary = request.run(&sites_table(), scratch.path()).unwrap();
    assert_eq!(summary.rows_written, 1);
}

/// A token naming a field outside the schema is fatal.
#[test]
fn unknown_field_token_is_fatal() {
    let scratch = tempdir().unwrap();
    let request = TioExportRequest {
        field_tokens: Some("SiteId;Bogus".into()),
        ..Default::default()
    };

    let err = request.run(&sites_table(), scratch.path()).unwrap_err();
    assert!(matches!(err, TioError::Schema { .. }));
}
