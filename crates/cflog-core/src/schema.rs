// Dweve CFLog - CloudFront access log parser
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Static registry of log schemas.
//!
//! A schema is the ordered list of column names for one `(format, version)`
//! pair. Field `i` of a log line maps to column `i` of its schema, so column
//! order is part of the wire format.
//!
//! # Registered Schemas
//!
//! | Key            | Columns | Source                                   |
//! |----------------|---------|------------------------------------------|
//! | `web_v1.0`     | 33      | Web distribution standard logs           |
//! | `rtmp_v1.0`    | 17      | RTMP streaming distribution logs         |
//! | `kinesis_v1.0` | 40      | Real-time logs delivered through Kinesis |
//!
//! # Evolving Layouts
//!
//! Web logs gained nine columns in December 2019. The new columns were
//! appended, so older files (24 fields per line) still parse against
//! `web_v1.0`: zipping stops at the shorter side. When a format evolves, new
//! columns must only ever be appended; reordering or removing a column would
//! silently change the meaning of every existing log file.

use crate::error::{ParseError, ParseResult};
use crate::options::{schema_key, ParseOptions};

/// Number of web distribution columns logged before December 2019.
pub const WEB_V1_0_LEGACY_LEN: usize = 24;

static WEB_V1_0_COLUMNS: [&str; 33] = [
    "date",
    "time",
    "x-edge-location",
    "sc-bytes",
    "c-ip",
    "cs-method",
    "cs-host",
    "cs-uri-stem",
    "sc-status",
    "cs-referer",
    "cs-user-agent",
    "cs-uri-query",
    "cs-cookie",
    "x-edge-result-type",
    "x-edge-request-id",
    "x-host-header",
    "cs-protocol",
    "cs-bytes",
    "time-taken",
    "x-forwarded-for",
    "ssl-protocol",
    "ssl-cipher",
    "x-edge-response-result-type",
    "cs-protocol-version",
    // Appended 2019-12
    "fle-status",
    "fle-encrypted-fields",
    "c-port",
    "time-to-first-byte",
    "x-edge-detailed-result-type",
    "sc-content-type",
    "sc-content-len",
    "sc-range-start",
    "sc-range-end",
];

static RTMP_V1_0_COLUMNS: [&str; 17] = [
    "date",
    "time",
    "x-edge-location",
    "c-ip",
    "x-event",
    "sc-bytes",
    "x-cf-status",
    "x-cf-client-id",
    "cs-uri-stem",
    "cs-uri-query",
    "c-referrer",
    "x-page-url",
    "c-user-agent",
    "x-sname",
    "x-sname-query",
    "x-file-ext",
    "x-sid",
];

static KINESIS_V1_0_COLUMNS: [&str; 40] = [
    "timestamp",
    "c-ip",
    "time-to-first-byte",
    "sc-status",
    "sc-bytes",
    "cs-method",
    "cs-protocol",
    "cs-host",
    "cs-uri-stem",
    "cs-bytes",
    "x-edge-location",
    "x-edge-request-id",
    "x-host-header",
    "time-taken",
    "cs-protocol-version",
    "c-ip-version",
    "cs-user-agent",
    "cs-referer",
    "cs-cookie",
    "cs-uri-query",
    "x-edge-response-result-type",
    "x-forwarded-for",
    "ssl-protocol",
    "ssl-cipher",
    "x-edge-result-type",
    "fle-encrypted-fields",
    "fle-status",
    "sc-content-type",
    "sc-content-len",
    "sc-range-start",
    "sc-range-end",
    "c-port",
    "x-edge-detailed-result-type",
    "c-country",
    "cs-accept-encoding",
    "cs-accept",
    "cache-behavior-path-pattern",
    "cs-headers",
    "cs-header-names",
    "cs-headers-count",
];

static SCHEMAS: [Schema; 3] = [
    Schema {
        key: "web_v1.0",
        format: "web",
        version: "1.0",
        columns: &WEB_V1_0_COLUMNS,
    },
    Schema {
        key: "rtmp_v1.0",
        format: "rtmp",
        version: "1.0",
        columns: &RTMP_V1_0_COLUMNS,
    },
    Schema {
        key: "kinesis_v1.0",
        format: "kinesis",
        version: "1.0",
        columns: &KINESIS_V1_0_COLUMNS,
    },
];

/// Ordered column list for one `(format, version)` pair.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    key: &'static str,
    format: &'static str,
    version: &'static str,
    columns: &'static [&'static str],
}

impl Schema {
    /// Resolve parse options against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnrecognizedFormat`] when no schema is registered
    /// under the resolved key.
    pub fn resolve(options: &ParseOptions) -> ParseResult<&'static Schema> {
        let (format, version) = (options.resolved_format(), options.resolved_version());
        lookup(format, version).ok_or_else(|| ParseError::unrecognized(format, version))
    }

    /// Registry key, `"{format}_v{version}"`.
    #[inline]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Log format name.
    #[inline]
    pub fn format(&self) -> &'static str {
        self.format
    }

    /// Schema version.
    #[inline]
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Column names in field order.
    #[inline]
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Field position of a column, if the schema has it.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

/// Look up the schema registered for `(format, version)`.
///
/// # Examples
///
/// ```rust
/// use cflog_core::schema::lookup;
///
/// let schema = lookup("rtmp", "1.0").unwrap();
/// assert_eq!(schema.columns()[4], "x-event");
/// assert!(lookup("rtmp", "2.0").is_none());
/// ```
pub fn lookup(format: &str, version: &str) -> Option<&'static Schema> {
    let key = schema_key(format, version);
    SCHEMAS.iter().find(|schema| schema.key == key)
}

/// Web distribution columns as logged before December 2019.
///
/// Always a prefix of the `web_v1.0` column list.
pub fn web_v1_0_legacy_columns() -> &'static [&'static str] {
    &WEB_V1_0_COLUMNS[..WEB_V1_0_LEGACY_LEN]
}

/// All registered schemas, in registration order.
pub fn schemas() -> impl Iterator<Item = &'static Schema> {
    SCHEMAS.iter()
}
