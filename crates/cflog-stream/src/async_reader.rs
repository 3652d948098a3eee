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

//! Async record reader.
//!
//! Mirrors [`RecordReader`](crate::RecordReader) over tokio's [`AsyncRead`].
//! Reads are awaited, so the reader never blocks the runtime; parsing itself
//! is synchronous and bounded by one chunk.
//!
//! # Examples
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use cflog_core::ParseOptions;
//! use cflog_stream::AsyncRecordReader;
//! use tokio::fs::File;
//!
//! let file = File::open("E2EXAMPLE.2014-05-23-01.log").await?;
//! let mut reader = AsyncRecordReader::new(file, ParseOptions::new());
//!
//! while let Some(record) = reader.next_record().await? {
//!     println!("{} {}", record["date"], record["cs-uri-stem"]);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{StreamError, StreamResult};
use crate::pump::RecordPump;
use crate::reader::ReaderConfig;
use cflog_core::{ChunkEncoding, ParseOptions, Record};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Streaming record reader over an async byte source.
pub struct AsyncRecordReader<R: AsyncRead + Unpin> {
    reader: R,
    pump: RecordPump,
    buffer: Vec<u8>,
    encoding: ChunkEncoding,
}

impl<R: AsyncRead + Unpin> AsyncRecordReader<R> {
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

    /// Read the next record. Same semantics as
    /// [`RecordReader::next_record`](crate::RecordReader::next_record).
    pub async fn next_record(&mut self) -> StreamResult<Option<Record>> {
        loop {
            if let Some(item) = self.pump.next_ready() {
                return item.map(Some);
            }
            if self.pump.is_finished() {
                return Ok(None);
            }

            let n = match self.reader.read(&mut self.buffer).await {
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

    /// Read every remaining record.
    pub async fn collect_records(&mut self) -> StreamResult<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record().await? {
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = "#Version: 1.0\n2014-05-23\t01:13:11\tFRA2\n2014-05-23\t01:13:12\tLAX1\n";

    #[tokio::test]
    async fn test_streaming_records() {
        let mut reader = AsyncRecordReader::new(Cursor::new(LOG), ParseOptions::new());

        let first = reader.next_record().await.unwrap().unwrap();
        assert_eq!(first["x-edge-location"], "FRA2");
        let second = reader.next_record().await.unwrap().unwrap();
        assert_eq!(second["x-edge-location"], "LAX1");
        assert!(reader.next_record().await.unwrap().is_none());
        assert_eq!(reader.records_read(), 2);
    }

    #[tokio::test]
    async fn test_tiny_buffer_matches_default() {
        let config = ReaderConfig {
            buffer_size: 3,
            ..Default::default()
        };
        let mut small = AsyncRecordReader::with_config(Cursor::new(LOG), ParseOptions::new(), config);
        let mut large = AsyncRecordReader::new(Cursor::new(LOG), ParseOptions::new());

        assert_eq!(
            small.collect_records().await.unwrap(),
            large.collect_records().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_format() {
        let options = ParseOptions::new().format("not-valid");
        let mut reader = AsyncRecordReader::new(Cursor::new(LOG), options);

        let err = reader.next_record().await.unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("not-valid"));
        assert!(reader.next_record().await.unwrap().is_none());
    }
}
