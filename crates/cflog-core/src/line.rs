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

//! Single-line parsing.
//!
//! A log line is a sequence of tab-separated fields. Field `i` is decoded and
//! stored under column `i` of the schema; zipping stops at whichever side runs
//! out first.

use crate::decode::decode_field;
use crate::error::{ParseError, ParseResult};
use crate::options::ParseOptions;
use crate::record::Record;
use crate::schema::Schema;

/// Field separator.
pub const FIELD_SEPARATOR: char = '\t';

/// Comment line marker.
pub const COMMENT_PREFIX: char = '#';

/// Parse one log line.
///
/// Options are resolved against the defaults on every call. The line is not
/// checked for the comment or blank filters; use [`is_skipped`] (or the batch
/// and streaming APIs, which apply it) for that.
///
/// # Errors
///
/// - [`ParseError::UnrecognizedFormat`] if the options name no registered schema
/// - [`ParseError::Decode`] if any retained field fails to decode
///
/// # Examples
///
/// ```rust
/// use cflog_core::{parse_line, ParseOptions};
///
/// let options = ParseOptions::new().format("rtmp");
/// let record = parse_line("2010-03-12\t23:56:21\tSEA4\t192.0.2.222\tplay", &options).unwrap();
/// assert_eq!(record["x-event"], "play");
/// ```
pub fn parse_line(line: &str, options: &ParseOptions) -> ParseResult<Record> {
    let schema = Schema::resolve(options)?;
    zip_line(line, schema)
}

/// Split a line and zip its decoded fields against `schema`.
pub fn zip_line(line: &str, schema: &'static Schema) -> ParseResult<Record> {
    let columns = schema.columns();
    let mut record = Record::with_capacity(columns.len());

    for (&column, raw) in columns.iter().zip(line.split(FIELD_SEPARATOR)) {
        let value = decode_field(raw).map_err(|source| ParseError::Decode { column, source })?;
        record.push(column, value.into_owned());
    }

    Ok(record)
}

/// Returns true for lines the batch and streaming parsers exclude: empty lines
/// and `#` comments.
#[inline]
pub fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::lookup;

    fn web_line(fields: usize) -> String {
        (0..fields)
            .map(|i| format!("v{}", i))
            .collect::<Vec<_>>()
            .join("\t")
    }

    #[test]
    fn test_exact_width_line_fills_schema() {
        let schema = lookup("web", "1.0").unwrap();
        let record = zip_line(&web_line(schema.len()), schema).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), schema.columns());
    }

    #[test]
    fn test_short_line_yields_prefix() {
        let schema = lookup("rtmp", "1.0").unwrap();
        let record = zip_line(&web_line(3), schema).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("x-edge-location"), Some("v2"));
        assert!(!record.contains_key("c-ip"));
    }

    #[test]
    fn test_long_line_drops_trailing_fields() {
        let schema = lookup("rtmp", "1.0").unwrap();
        let record = zip_line(&web_line(20), schema).unwrap();
        assert_eq!(record.len(), 17);
        assert_eq!(record.get("x-sid"), Some("v16"));
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let schema = lookup("web", "1.0").unwrap();
        let record = zip_line("2014-05-23\t\tFRA2", schema).unwrap();
        assert_eq!(record.get("time"), Some(""));
        assert_eq!(record.get("x-edge-location"), Some("FRA2"));
    }

    #[test]
    fn test_fields_are_decoded() {
        let record = parse_line("d\tt\tl\t1\tip\tGET\th\t/a%2520b", &ParseOptions::new()).unwrap();
        assert_eq!(record.get("cs-uri-stem"), Some("/a b"));
    }

    #[test]
    fn test_unknown_format() {
        let err = parse_line("a\tb", &ParseOptions::new().format("not-valid")).unwrap_err();
        assert!(err.to_string().contains("not-valid"));
    }

    #[test]
    fn test_decode_failure_names_column() {
        let err = parse_line("2014-05-23\t%uDFFF", &ParseOptions::new()).unwrap_err();
        match err {
            ParseError::Decode { column, .. } => assert_eq!(column, "time"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_is_skipped() {
        assert!(is_skipped(""));
        assert!(is_skipped("#Version: 1.0"));
        assert!(!is_skipped(" #not a comment"));
        assert!(!is_skipped("2014-05-23"));
    }
}
