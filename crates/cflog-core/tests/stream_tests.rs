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

//! Integration tests for the streaming reassembler.

use cflog_core::{parse, Chunk, ChunkEncoding, ParseOptions, Reassembler, Record};

const WEB_EXAMPLE: &str = include_str!("fixtures/web-1-0.txt");
const RTMP_EXAMPLE: &str = include_str!("fixtures/rtmp-1-0.txt");

fn stream(input: &[u8], chunk_size: usize, options: ParseOptions) -> Vec<Record> {
    let mut session = Reassembler::new(options);
    let mut records = Vec::new();
    for chunk in input.chunks(chunk_size) {
        session.on_chunk(chunk, |r| records.push(r)).unwrap();
    }
    session.on_end(|r| records.push(r)).unwrap();
    records
}

#[test]
fn test_emits_each_line_of_log() {
    let records = stream(WEB_EXAMPLE.as_bytes(), 64, ParseOptions::new().format("web"));
    assert_eq!(records.len(), 2);
}

#[test]
fn test_stream_matches_batch_for_all_chunk_sizes() {
    let options = ParseOptions::new().format("rtmp");
    let expected = parse(RTMP_EXAMPLE, &options).unwrap();

    for chunk_size in 1..=RTMP_EXAMPLE.len() {
        let records = stream(RTMP_EXAMPLE.as_bytes(), chunk_size, options.clone());
        assert_eq!(records, expected, "chunk size {}", chunk_size);
    }
}

#[test]
fn test_unterminated_last_line_is_flushed() {
    let trimmed = WEB_EXAMPLE.trim_end_matches('\n');
    let records = stream(trimmed.as_bytes(), 100, ParseOptions::new());
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["x-edge-location"], "LAX1");
}

#[test]
fn test_emission_is_synchronous() {
    let mut session = Reassembler::new(ParseOptions::new());
    let newline = WEB_EXAMPLE.find("\n2014-05-23\t01:13:12").unwrap();

    let mut first = Vec::new();
    session.on_chunk(&WEB_EXAMPLE[..=newline], |r| first.push(r)).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0]["x-edge-location"], "FRA2");

    let mut rest = Vec::new();
    session.on_chunk(&WEB_EXAMPLE[newline + 1..], |r| rest.push(r)).unwrap();
    session.on_end(|r| rest.push(r)).unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(session.records_emitted(), 2);
}

#[test]
fn test_mixed_text_and_byte_chunks() {
    let (head, tail) = WEB_EXAMPLE.split_at(WEB_EXAMPLE.len() / 2);
    let mut session = Reassembler::new(ParseOptions::new());

    let mut records = session.push(Chunk::Text(head)).unwrap();
    records.extend(
        session
            .push(Chunk::Bytes(tail.as_bytes(), ChunkEncoding::Buffer))
            .unwrap(),
    );
    records.extend(session.finish().unwrap());

    assert_eq!(records, parse(WEB_EXAMPLE, &ParseOptions::new()).unwrap());
}

#[test]
fn test_finish_twice_emits_nothing_new() {
    let mut session = Reassembler::new(ParseOptions::new());
    session.push(WEB_EXAMPLE.trim_end_matches('\n')).unwrap();

    assert_eq!(session.finish().unwrap().len(), 1);
    assert!(session.finish().unwrap().is_empty());
    assert_eq!(session.records_emitted(), 2);
}
