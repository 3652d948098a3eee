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

//! Streaming CloudFront Log Readers
//!
//! This crate connects byte sources to the push-driven
//! [`Reassembler`](cflog_core::Reassembler) from `cflog-core`, yielding one
//! [`Record`] per log line without loading the whole log into memory.
//!
//! # Features
//!
//! - **Bounded Memory**: one read buffer plus the longest line
//! - **Iterator-based**: [`RecordReader`] implements `Iterator` (sync)
//! - **Async Support**: [`AsyncRecordReader`] over tokio's `AsyncRead` (feature `async`)
//! - **Line Length Protection**: unterminated lines are capped by
//!   [`ReaderConfig::max_line_length`]
//!
//! # Sync vs Async
//!
//! ## Synchronous API (default)
//!
//! ```rust,no_run
//! use cflog_core::ParseOptions;
//! use cflog_stream::RecordReader;
//! use std::fs::File;
//!
//! let file = File::open("E2EXAMPLE.2014-05-23-01.log").unwrap();
//! let reader = RecordReader::new(file, ParseOptions::new().format("web"));
//!
//! for record in reader {
//!     match record {
//!         Ok(record) => println!("{} {}", record["date"], record["cs-uri-stem"]),
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! ## Asynchronous API (feature = "async")
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use cflog_core::ParseOptions;
//! use cflog_stream::AsyncRecordReader;
//! use tokio::fs::File;
//!
//! let file = File::open("E2EXAMPLE.2014-05-23-01.log").await?;
//! let mut reader = AsyncRecordReader::new(file, ParseOptions::new());
//!
//! while let Some(record) = reader.next_record().await? {
//!     println!("{}", record["x-edge-location"]);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod pump;
mod reader;

#[cfg(feature = "async")]
mod async_reader;

pub use error::{StreamError, StreamResult};
pub use reader::{ReaderConfig, RecordReader};

#[cfg(feature = "async")]
pub use async_reader::AsyncRecordReader;

/// Re-export core types for convenience.
pub use cflog_core::{ChunkEncoding, ParseOptions, Record};
