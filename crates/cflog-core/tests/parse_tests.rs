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

//! Integration tests for batch and single-line parsing against real log samples.

use cflog_core::{parse, parse_line, parse_with, schema, ParseError, ParseOptions};

const WEB_EXAMPLE: &str = include_str!("fixtures/web-1-0.txt");
const WEB_2019_12_EXAMPLE: &str = include_str!("fixtures/web-1-0-2019-12.txt");
const RTMP_EXAMPLE: &str = include_str!("fixtures/rtmp-1-0.txt");
const KINESIS_EXAMPLE: &str = include_str!("fixtures/kinesis-1-0.txt");

fn web() -> ParseOptions {
    ParseOptions::new().format("web")
}

// ==================== Format Coverage ====================

#[test]
fn test_parse_each_registered_format() {
    assert!(parse(WEB_EXAMPLE, &web()).is_ok());
    assert!(parse(WEB_2019_12_EXAMPLE, &web()).is_ok());
    assert!(parse(RTMP_EXAMPLE, &ParseOptions::new().format("rtmp")).is_ok());
    assert!(parse(KINESIS_EXAMPLE, &ParseOptions::new().format("kinesis")).is_ok());
}

#[test]
fn test_one_record_per_data_line() {
    assert_eq!(parse(WEB_EXAMPLE, &web()).unwrap().len(), 2);
    assert_eq!(parse(WEB_2019_12_EXAMPLE, &web()).unwrap().len(), 3);
    assert_eq!(
        parse(RTMP_EXAMPLE, &ParseOptions::new().format("rtmp")).unwrap().len(),
        6
    );
    assert_eq!(
        parse(KINESIS_EXAMPLE, &ParseOptions::new().format("kinesis")).unwrap().len(),
        1
    );
}

#[test]
fn test_defaults_to_web() {
    let records = parse(WEB_EXAMPLE, &ParseOptions::default()).unwrap();

    assert_eq!(records.len(), 2);
    // Pre-2019 files carry 24 fields, so only the legacy prefix is filled.
    assert_eq!(records[0].len(), 24);
    assert_eq!(
        records[0].keys().collect::<Vec<_>>(),
        schema::web_v1_0_legacy_columns()
    );
}

#[test]
fn test_unrecognized_format() {
    let err = parse(WEB_EXAMPLE, &ParseOptions::new().format("not-valid")).unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedFormat { ref format, .. } if format == "not-valid"));
    assert!(err.to_string().contains("Format not recognized: not-valid"));

    let err = parse_line("a\tb", &ParseOptions::new().format("not-valid")).unwrap_err();
    assert!(err.to_string().contains("not-valid"));
}

#[test]
fn test_unrecognized_version() {
    let err = parse(WEB_EXAMPLE, &web().version("2.0")).unwrap_err();
    assert_eq!(err, ParseError::unrecognized("web", "2.0"));
}

// ==================== Field Mapping ====================

#[test]
fn test_web_field_mapping() {
    let records = parse(WEB_EXAMPLE, &web()).unwrap();

    assert_eq!(records[0]["date"], "2014-05-23");
    assert_eq!(records[0]["x-edge-location"], "FRA2");
    assert_eq!(records[0]["cs-uri-stem"], "/view/my/file.html");
    assert_eq!(records[0]["x-edge-response-result-type"], "RefreshHit");
    assert_eq!(records[1]["x-edge-location"], "LAX1");
    assert_eq!(records[1]["cs-uri-stem"], "/soundtrack/happy.mp3");
    assert_eq!(records[1]["cs-uri-query"], "a=b&c=d");
}

#[test]
fn test_web_2019_12_field_mapping() {
    let records = parse(WEB_2019_12_EXAMPLE, &web()).unwrap();

    assert_eq!(records[0].len(), 33);
    assert_eq!(records[0]["x-edge-detailed-result-type"], "Hit");
    assert_eq!(records[0]["sc-content-type"], "text/html");
    assert_eq!(records[0]["sc-content-len"], "78");
    assert_eq!(records[2]["x-edge-result-type"], "Miss");
    assert_eq!(records[2]["sc-content-type"], "image/x-icon");
}

#[test]
fn test_rtmp_field_mapping() {
    let records = parse(RTMP_EXAMPLE, &ParseOptions::new().format("rtmp")).unwrap();

    assert_eq!(records[0]["date"], "2010-03-12");
    assert_eq!(records[0]["x-edge-location"], "SEA4");
    assert_eq!(records[1]["x-sname"], "myvideo");
    assert_eq!(records[1]["x-file-ext"], "flv");
    assert_eq!(records[4]["x-sid"], "2");
    assert_eq!(records[5]["x-event"], "disconnect");
    assert_eq!(records[0]["c-user-agent"], "LNX 10,0,32,18");
}

#[test]
fn test_kinesis_field_mapping() {
    let records = parse(KINESIS_EXAMPLE, &ParseOptions::new().format("kinesis")).unwrap();

    assert_eq!(records[0]["timestamp"], "1607374321.541");
    assert_eq!(records[0]["c-ip"], "127.0.0.1");
    assert_eq!(records[0]["time-to-first-byte"], "0.042");
    assert_eq!(records[0]["sc-status"], "200");
    assert_eq!(
        records[0]["cs-user-agent"],
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:83.0) Gecko/20100101 Firefox/83.0"
    );
    assert_eq!(records[0]["cs-accept-encoding"], "gzip, deflate, br");
    assert_eq!(records[0].len(), 40);
}

#[test]
fn test_decodes_over_encoded_fields() {
    let records = parse(WEB_EXAMPLE, &web()).unwrap();
    assert_eq!(
        records[0]["cs-user-agent"],
        "Mozilla/5.0 (iPhone; CPU iPhone OS 10_2_1 like Mac OS X) AppleWebKit/602.4.6 (KHTML, like Gecko) Version/10.0 Mobile/14D27 Safari/602.1"
    );
}

// ==================== Input Shapes ====================

#[test]
fn test_bytes_and_strings_agree() {
    let from_text = parse(WEB_EXAMPLE, &web()).unwrap();
    let from_bytes = parse(WEB_EXAMPLE.as_bytes(), &web()).unwrap();
    assert_eq!(from_text, from_bytes);
}

#[test]
fn test_line_sequence_input() {
    let lines: Vec<&str> = WEB_EXAMPLE.lines().collect();
    assert_eq!(parse(lines, &web()).unwrap().len(), 2);
}

#[test]
fn test_callback_delivery() {
    let delivered = parse_with(WEB_EXAMPLE.as_bytes(), &web(), |result| result.unwrap().len());
    assert_eq!(delivered, 2);
}

#[test]
fn test_callback_error_delivery() {
    let delivered = parse_with(WEB_EXAMPLE, &ParseOptions::new().format("not-valid"), |result| {
        match result {
            Ok(_) => None,
            Err(e) => Some(e),
        }
    });
    assert!(delivered.unwrap().is_unrecognized_format());
}

#[test]
fn test_comments_anywhere_are_skipped() {
    let log = "#a\n2014-05-23\tx\n#b\n\n2014-05-24\ty\n#c";
    let records = parse(log, &web()).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| !r["date"].starts_with('#')));
}

#[test]
fn test_single_line_api() {
    let line = WEB_EXAMPLE.lines().nth(2).unwrap();
    let record = parse_line(line, &ParseOptions::new()).unwrap();
    assert_eq!(record["date"], "2014-05-23");
    assert_eq!(record["sc-status"], "200");
}
