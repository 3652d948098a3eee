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

//! CloudFront Access Log Parser
//!
//! This crate turns tab-delimited CloudFront access-log lines into field-named
//! [`Record`]s. It covers the whole path from raw bytes to records:
//!
//! - **Schema registry**: versioned column lists for web, RTMP and Kinesis
//!   real-time logs
//! - **Field decoding**: reverses CloudFront's layered percent escaping
//! - **Line parsing**: splits a line on tabs and zips it against a schema
//! - **Batch parsing**: whole strings, byte buffers or line sequences
//! - **Stream reassembly**: arbitrary chunks in, complete records out
//!
//! The crate performs no I/O. Adapters for `std::io::Read` and tokio's
//! `AsyncRead` live in `cflog-stream`.
//!
//! # Batch Parsing
//!
//! ```rust
//! use cflog_core::{parse, ParseOptions};
//!
//! let log = "#Version: 1.0\n\
//!            #Fields: date time x-edge-location\n\
//!            2014-05-23\t01:13:11\tFRA2\n";
//!
//! let records = parse(log, &ParseOptions::new()).unwrap();
//! assert_eq!(records[0]["date"], "2014-05-23");
//! assert_eq!(records[0]["x-edge-location"], "FRA2");
//! ```
//!
//! # Streaming
//!
//! ```rust
//! use cflog_core::{ParseOptions, Reassembler};
//!
//! let mut session = Reassembler::new(ParseOptions::new().format("rtmp"));
//! let mut events = Vec::new();
//!
//! for chunk in ["2010-03-12\t23:56:21\tSEA4\t192.0.2.222\tpl", "ay\n"] {
//!     session.on_chunk(chunk, |record| events.push(record["x-event"].clone())).unwrap();
//! }
//! session.on_end(|record| events.push(record["x-event"].clone())).unwrap();
//!
//! assert_eq!(events, ["play"]);
//! ```
//!
//! # Options
//!
//! [`ParseOptions`] selects the schema. Unset fields default to format `web`,
//! version `1.0` (see [`DEFAULTS`]). Unknown combinations fail with
//! [`ParseError::UnrecognizedFormat`].

mod batch;
mod decode;
mod error;
mod line;
mod options;
mod reassembler;
mod record;
pub mod schema;

pub use batch::{parse, parse_with, Input, LINE_SEPARATOR};
pub use decode::decode_field;
pub use error::{DecodeError, ParseError, ParseResult};
pub use line::{is_skipped, parse_line, zip_line, COMMENT_PREFIX, FIELD_SEPARATOR};
pub use options::{schema_key, Defaults, ParseOptions, DEFAULTS};
pub use reassembler::{Chunk, ChunkEncoding, Reassembler, SessionState};
pub use record::Record;
pub use schema::{lookup, schemas, Schema};
