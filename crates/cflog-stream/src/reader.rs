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

//! Blocking record reader.
//!
//! [`RecordReader`] pulls bytes from any [`Read`] source in fixed-size chunks,
//! feeds them through a [`Reassembler`](cflog_core::Reassembler) and yields
//! records one at a time. Memory use is bounded by the read buffer plus the
//! longest line.

use crate::error::{StreamError, StreamResult};
use crate::pump::RecordPump;
use cflog_core::{ChunkEncoding, ParseOptions, Record};
use std::io::{self, Read};

/// Configuration for record readers.
///
/// # Examples
///
/// ```rust
/// use cflog_stream::ReaderConfig;
///
/// let config = ReaderConfig {
///     buffer_size: 4096,
///     ..Default::default()
/// };
/// assert_eq!(config.max_line_length, 1_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Bytes requested from the source per read.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Maximum length in bytes of a line that has not been terminated yet.
    ///
    /// A line growing past this limit stops the reader with
    /// [`StreamError::LineTooLong`]. Protects against input that never
    /// contains a newline.
    ///
    /// Default: 1,000,000 bytes (1MB)
    pub max_line_length: usize,

    /// How the bytes read from the source are decoded.
    ///
    /// Default: UTF-8
    pub encoding: ChunkEncoding,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            max_line_length: 1_000_000,
            encoding: ChunkEncoding::Utf8,
        }
    }
}

/// Streaming record reader over a blocking byte source.
///
/// # Examples
///
/// ```rust
/// use cflog_core::ParseOptions;
/// use cflog_stream::RecordReader;
/// use std::io::Cursor;
///
/// let log = "#Version: 1.0\n2014-05-23\t01:13:11\tFRA2\n2014-05-23\t01:13:12\tLAX1";
/// let reader = RecordReader::new(Cursor::new(log), ParseOptions::new());
///
/// let locations: Vec<String> = reader
///     .map(|record| record.map(|r| r["x-edge-location"].clone()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(locations, ["FRA2", "LAX1"]);
/// ```
pub struct RecordReader<R: Read> {
    reader: R,
    pump: RecordPump,
    buffer: Vec<u8>,
    encoding: ChunkEncoding,
}

impl<R: Read> RecordReader<R> {
    /// Create a reader with default configuration.
    pub fn new(reader: R, options: ParseOptions) -> Self {
        Self::with_config(reader, options, ReaderConfig::default())
    }

    /// Create a reader with custom configuration.
    pub fn with_config(reader: R, options: ParseOptions, config: ReaderConfig) -> Self {
        Self {
            reader,
            pump: RecordPump::new(options, config.max_line_length),
            buffer: vec![0; config.buffer_size.max(1)],
            encoding: config.encoding,
        }
    }

    /// Options the reader parses with.
    #[inline]
    pub fn options(&self) -> &ParseOptions {
        self.pump.session().options()
    }

    /// Logical lines consumed so far, comments included.
    #[inline]
    pub fn lines_seen(&self) -> usize {
        self.pump.session().lines_seen()
    }

    /// Records handed out so far.
    #[inline]
    pub fn records_read(&self) -> usize {
        self.pump.records_read()
    }

    /// Recover the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` at end of input. After an error, records that were
    /// completed before the failing line are still returned first; once the
    /// error has been returned the reader yields `Ok(None)`, except after an
    /// I/O error, which may be retried.
    pub fn next_record(&mut self) -> StreamResult<Option<Record>> {
        loop {
            if let Some(item) = self.pump.next_ready() {
                return item.map(Some);
            }
            if self.pump.is_finished() {
                return Ok(None);
            }

            let n = match self.reader.read(&mut self.buffer) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Io(e)),
            };

            if n == 0 {
                self.pump.end();
            } else {
                self.pump.feed(&self.buffer[..n], self.encoding);
            }
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = StreamResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
