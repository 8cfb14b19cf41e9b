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

//! # Tio Exporter Tests
//!
//! End-to-end tests for the table-to-CSV exporter: effective-column
//! resolution, escaping, row counting, and overwrite behavior.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test export
//! ```

use proptest::prelude::*;
use tempfile::tempdir;
use tiox::{
    TioCsvExporter, TioExporterConfig, TioFieldSpec, TioFieldType, TioMemoryTable, TioSchema,
    TioValue,
};

fn sites_table() -> TioMemoryTable {
    let schema = TioSchema::new(vec![
        TioFieldSpec::new("SiteId", TioFieldType::Integer),
        TioFieldSpec::new("SiteLocation", TioFieldType::Text),
        TioFieldSpec::new("Score", TioFieldType::Real),
    ])
    .unwrap();
    TioMemoryTable::new("Sites", schema)
        .with_rows(vec![
            vec![1.into(), "Lake, North".into(), 0.5.into()],
            vec![2.into(), TioValue::Null, 0.9.into()],
            vec![3.into(), "Ridge".into(), TioValue::Null],
        ])
        .unwrap()
}

/// The header carries exactly the requested fields, in the given order.
#[test]
fn header_equals_requested_subset_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("subset.csv");
    let config = TioExporterConfig {
        field_names: Some(vec!["SiteLocation".into(), "SiteId".into()]),
        ..Default::default()
    };

    let stats = TioCsvExporter::new()
        .with_config(config)
        .export(&sites_table(), &path)
        .unwrap();

    assert_eq!(stats.fields, vec!["SiteLocation", "SiteId"]);
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("SiteLocation,SiteId\n"));
    assert_eq!(stats.rows_written, 3);
}

/// Without a field list, every schema column is emitted in declared order.
#[test]
fn default_columns_follow_schema_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("all.csv");

    let stats = TioCsvExporter::new().export(&sites_table(), &path).unwrap();

    assert_eq!(stats.fields, vec!["SiteId", "SiteLocation", "Score"]);
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("SiteId,SiteLocation,Score\n"));
}

/// The two-row reference scenario, byte for byte.
#[test]
fn reference_scenario_is_byte_exact() {
    let schema = TioSchema::new(vec![
        TioFieldSpec::new("SiteId", TioFieldType::Integer),
        TioFieldSpec::new("SiteLocation", TioFieldType::Text),
    ])
    .unwrap();
    let table = TioMemoryTable::new("Sites", schema)
        .with_rows(vec![
            vec![1.into(), "Lake, North".into()],
            vec![2.into(), TioValue::Null],
        ])
        .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("sites.csv");
    let config = TioExporterConfig {
        field_names: Some(vec!["SiteId".into(), "SiteLocation".into()]),
        ..Default::default()
    };
    let stats = TioCsvExporter::new()
        .with_config(config)
        .export(&table, &path)
        .unwrap();

    assert_eq!(stats.rows_written, 2);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "SiteId,SiteLocation\n1,\"Lake, North\"\n2,\n"
    );
}

/// A filter matching nothing yields a header-only file and a zero count.
#[test]
fn empty_result_set_writes_header_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("none.csv");
    let config = TioExporterConfig {
        where_clause: Some("SiteId > 100".into()),
        ..Default::default()
    };

    let stats = TioCsvExporter::new()
        .with_config(config)
        .export(&sites_table(), &path)
        .unwrap();

    assert_eq!(stats.rows_written, 0);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "SiteId,SiteLocation,Score\n"
    );
}

/// Re-running to the same path truncates; no stale tail survives.
#[test]
fn rerun_overwrites_previous_longer_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sites.csv");

    TioCsvExporter::new().export(&sites_table(), &path).unwrap();
    let full = std::fs::read_to_string(&path).unwrap();

    let config = TioExporterConfig {
        where_clause: Some("SiteId = 1".into()),
        ..Default::default()
    };
    let stats = TioCsvExporter::new()
        .with_config(config)
        .export(&sites_table(), &path)
        .unwrap();

    assert_eq!(stats.rows_written, 1);
    let filtered = std::fs::read_to_string(&path).unwrap();
    assert!(filtered.len() < full.len());
    assert_eq!(filtered, "SiteId,SiteLocation,Score\n1,\"Lake, North\",0.5\n");
}

/// An invalid filter is a fatal query error, not an empty export.
#[test]
fn invalid_filter_syntax_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    let config = TioExporterConfig {
        where_clause: Some("SiteId LIKE 'x'".into()),
        ..Default::default()
    };

    let err = TioCsvExporter::new()
        .with_config(config)
        .export(&sites_table(), &path)
        .unwrap_err();
    assert!(err.to_string().starts_with("query error"));
    assert!(!path.exists());
}

/// The postfix clause reaches the source and orders the emitted rows.
#[test]
fn postfix_clause_orders_rows_source_side() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ordered.csv");
    let config = TioExporterConfig {
        field_names: Some(vec!["SiteId".into()]),
        postfix_clause: Some("ORDER BY SiteId DESC".into()),
        ..Default::default()
    };

    TioCsvExporter::new()
        .with_config(config)
        .export(&sites_table(), &path)
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "SiteId\n3\n2\n1\n");
}

proptest! {
    /// Whatever the field text contains, a standard CSV parser gets the
    /// original back: quoting and quote-doubling round-trip exactly.
    #[test]
    fn escaping_round_trips_through_csv_parser(
        values in prop::collection::vec(
            prop::string::string_regex(r#"[a-zA-Z0-9,"'\n ]{0,24}"#).unwrap(),
            1..8,
        )
    ) {
        let schema = TioSchema::new(vec![
            TioFieldSpec::new("Id", TioFieldType::Integer),
            TioFieldSpec::new("Payload", TioFieldType::Text),
        ])
        .unwrap();
        let mut table = TioMemoryTable::new("RoundTrip", schema);
        for (index, value) in values.iter().enumerate() {
            table
                .push_row(vec![(index as i64).into(), value.as_str().into()])
                .unwrap();
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.csv");
        let stats = TioCsvExporter::new().export(&table, &path).unwrap();
        prop_assert_eq!(stats.rows_written, values.len());

        let mut reader = csv::Reader::from_path(&path).unwrap();
        prop_assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["Id", "Payload"]
        );
        let records: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();
        prop_assert_eq!(records.len(), values.len());
        for (index, record) in records.iter().enumerate() {
            prop_assert_eq!(record.get(0).unwrap(), index.to_string().as_str());
            prop_assert_eq!(record.get(1).unwrap(), values[index].as_str());
        }
    }
}
