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

/// Progress sink installed by the host, invoked synchronously on the
/// calling thread. Passed explicitly to the operations rather than read
/// from ambient state so they stay testable without a live host.
pub type TioProgressCallback = Box<dyn Fn(TioProgressInfo) + Send + Sync>;

/// One progress notification.
///
/// The archive builder emits one per file added; the exporter emits one
/// every `progress_interval` rows. `items_total` is `None` when the total
/// is unknown up front (row cursors do not report a count).
#[derive(Clone, Debug)]
pub struct TioProgressInfo {
    /// File or table the operation is currently working through.
    pub current_item: String,
    /// Items completed so far (files added, rows written).
    pub items_done: usize,
    /// Total item count when known.
    pub items_total: Option<usize>,
    /// Bytes written to the output so far, when cheaply available.
    pub bytes_written: usize,
}
