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

//! Property-based tests for decoding, schema zipping and stream reassembly.

use cflog_core::{decode_field, parse, schemas, zip_line, ParseOptions, Reassembler, Record};
use proptest::prelude::*;

fn stream_in_pieces(input: &[u8], cuts: &[usize]) -> Vec<Record> {
    let mut session = Reassembler::new(ParseOptions::new());
    let mut records = Vec::new();
    let mut start = 0;

    let mut points: Vec<usize> = cuts.iter().map(|c| c % (input.len() + 1)).collect();
    points.sort_unstable();

    for point in points {
        records.extend(session.push(&input[start..point]).unwrap());
        start = point;
    }
    records.extend(session.push(&input[start..]).unwrap());
    records.extend(session.finish().unwrap());
    records
}

/// A field value with no `%`, tab or newline.
fn plain_field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ./:;=&é€-]{0,20}"
}

/// A log made of data lines, comments and blank lines.
fn log_text() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        3 => prop::collection::vec(plain_field(), 1..8).prop_map(|fields| fields.join("\t")),
        1 => "#[a-zA-Z :]{0,20}",
        1 => Just(String::new()),
    ];
    (prop::collection::vec(line, 0..12), any::<bool>()).prop_map(|(lines, trailing)| {
        let mut text = lines.join("\n");
        if trailing {
            text.push('\n');
        }
        text
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: plain text decodes to itself.
    #[test]
    fn prop_plain_fields_decode_unchanged(value in plain_field()) {
        prop_assert_eq!(decode_field(&value).unwrap(), value.as_str());
    }

    /// Property: a space over-encoded as %2520 always decodes to a space.
    #[test]
    fn prop_over_encoded_space(a in plain_field(), b in plain_field()) {
        let raw = format!("{}%2520{}", a, b);
        let expected = format!("{} {}", a, b);
        prop_assert_eq!(decode_field(&raw).unwrap(), expected.as_str());
    }

    /// Property: `%XX` escapes decode to something for every byte value.
    #[test]
    fn prop_byte_escapes_never_fail(raw in "([a-z]|%[0-9A-Fa-f]{2}){0,16}") {
        prop_assert!(decode_field(&raw).is_ok());
    }

    /// Property: records hold exactly min(field_count, schema_len) columns, in order.
    #[test]
    fn prop_record_is_schema_prefix(field_count in 1usize..50) {
        for schema in schemas() {
            let line = (0..field_count).map(|i| i.to_string()).collect::<Vec<_>>().join("\t");
            let record = zip_line(&line, schema).unwrap();
            let expected = field_count.min(schema.len());

            prop_assert_eq!(record.len(), expected);
            prop_assert_eq!(record.keys().collect::<Vec<_>>(), &schema.columns()[..expected]);
        }
    }

    /// Property: comment and blank lines never produce records.
    #[test]
    fn prop_comments_never_emitted(log in log_text()) {
        let data_lines = log.split('\n').filter(|l| !l.is_empty() && !l.starts_with('#')).count();
        let records = parse(log.as_str(), &ParseOptions::new()).unwrap();
        prop_assert_eq!(records.len(), data_lines);
    }

    /// Property: streaming output does not depend on where the chunks are cut.
    #[test]
    fn prop_chunking_is_invisible(
        log in log_text(),
        cuts in prop::collection::vec(any::<usize>(), 0..8)
    ) {
        let expected = parse(log.as_str(), &ParseOptions::new()).unwrap();
        let streamed = stream_in_pieces(log.as_bytes(), &cuts);
        prop_assert_eq!(streamed, expected);
    }
}
