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

//! Push-driven line reassembly for chunked input.
//!
//! Log bytes arrive from I/O sources in chunks that have nothing to do with
//! line boundaries. A [`Reassembler`] holds the trailing, possibly incomplete,
//! line of everything it has seen (the *carry*), and parses a line only once
//! its terminating `\n` has arrived. The final unterminated line is parsed
//! when the stream ends.
//!
//! # Lifecycle
//!
//! ```text
//!   on_chunk* ──► Open ──on_end / error──► Closed
//! ```
//!
//! - [`on_chunk`](Reassembler::on_chunk) emits every line completed by the chunk
//! - [`on_end`](Reassembler::on_end) flushes the carry and closes the session;
//!   calling it again does nothing
//! - a parse error closes the session; records emitted before the error stay
//!   emitted, and later chunks are rejected with [`ParseError::SessionClosed`]
//!
//! Every chunk is converted to UTF-8 on arrival according to its own
//! [`ChunkEncoding`], so the carry always holds UTF-8 no matter how encodings
//! are mixed. It is held as bytes, so a multi-byte character split across two
//! chunks is reassembled before it is decoded. Output is therefore identical
//! no matter how the input is chunked.
//!
//! # Examples
//!
//! ```rust
//! use cflog_core::{ParseOptions, Reassembler};
//!
//! let mut session = Reassembler::new(ParseOptions::new());
//! let mut records = Vec::new();
//!
//! session.on_chunk("#Version: 1.0\n2014-05-23\t01:1", |r| records.push(r)).unwrap();
//! assert!(records.is_empty());
//!
//! session.on_chunk("3:11\tFRA2\n2014-05-23\t01:13:12\tLAX1", |r| records.push(r)).unwrap();
//! assert_eq!(records.len(), 1);
//!
//! session.on_end(|r| records.push(r)).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1]["x-edge-location"], "LAX1");
//! ```

use crate::batch::parse_logical_line;
use crate::error::{ParseError, ParseResult};
use crate::options::ParseOptions;
use crate::record::Record;
use crate::schema::Schema;
use memchr::memrchr;
use std::borrow::Cow;
use tracing::{debug, trace};

/// How the bytes of a chunk are turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChunkEncoding {
    /// UTF-8; invalid sequences become U+FFFD.
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is one character.
    Latin1,
    /// No decoding requested. Treated as UTF-8.
    Buffer,
}

impl ChunkEncoding {
    /// Re-encode a chunk as UTF-8 bytes.
    ///
    /// UTF-8 chunks pass through untouched, so a character split across two
    /// chunks is completed in the carry and validated once its line is whole.
    fn to_utf8(self, bytes: &[u8]) -> Cow<'_, [u8]> {
        match self {
            ChunkEncoding::Utf8 | ChunkEncoding::Buffer => Cow::Borrowed(bytes),
            ChunkEncoding::Latin1 => {
                let text: String = bytes.iter().map(|&b| char::from(b)).collect();
                Cow::Owned(text.into_bytes())
            }
        }
    }
}

/// One piece of a log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk<'a> {
    /// Text that is already decoded.
    Text(&'a str),
    /// Raw bytes with an encoding hint.
    Bytes(&'a [u8], ChunkEncoding),
}

impl<'a> From<&'a str> for Chunk<'a> {
    fn from(text: &'a str) -> Self {
        Chunk::Text(text)
    }
}

impl<'a> From<&'a String> for Chunk<'a> {
    fn from(text: &'a String) -> Self {
        Chunk::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Chunk<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Chunk::Bytes(bytes, ChunkEncoding::default())
    }
}

impl<'a> From<&'a Vec<u8>> for Chunk<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Chunk::Bytes(bytes, ChunkEncoding::default())
    }
}

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting chunks.
    Open,
    /// Flushed or failed. No further chunks are accepted.
    Closed,
}

/// Streaming line reassembler for one log stream.
///
/// Not meant to be shared between producers: chunks must be delivered in
/// stream order by a single caller.
#[derive(Debug)]
pub struct Reassembler {
    options: ParseOptions,
    schema: Option<&'static Schema>,
    carry: Vec<u8>,
    state: SessionState,
    lines_seen: usize,
    records_emitted: usize,
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl Reassembler {
    /// Open a session.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            schema: None,
            carry: Vec::new(),
            state: SessionState::Open,
            lines_seen: 0,
            records_emitted: 0,
        }
    }

    /// Options the session parses with.
    #[inline]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true once the session has been flushed or has failed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Bytes of the incomplete line carried into the next chunk.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.carry
    }

    /// Logical lines processed so far, comments and blank lines included.
    ///
    /// After a failure this is the 1-based number of the failing line.
    #[inline]
    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Records emitted so far.
    #[inline]
    pub fn records_emitted(&self) -> usize {
        self.records_emitted
    }

    /// Feed one chunk, emitting a record for every line it completes.
    ///
    /// # Errors
    ///
    /// - [`ParseError::SessionClosed`] if the session is already closed
    /// - any line-level error, which also closes the session
    pub fn on_chunk<'c, F>(&mut self, chunk: impl Into<Chunk<'c>>, mut emit: F) -> ParseResult<()>
    where
        F: FnMut(Record),
    {
        if self.is_closed() {
            return Err(ParseError::SessionClosed);
        }

        let bytes = match chunk.into() {
            Chunk::Text(text) => Cow::Borrowed(text.as_bytes()),
            Chunk::Bytes(bytes, encoding) => encoding.to_utf8(bytes),
        };
        trace!(bytes = bytes.len(), carried = self.carry.len(), "log chunk");

        let Some(last_newline) = memrchr(b'\n', &bytes) else {
            self.carry.extend_from_slice(&bytes);
            return Ok(());
        };

        let mut complete = std::mem::take(&mut self.carry);
        complete.extend_from_slice(&bytes[..last_newline]);
        self.carry.extend_from_slice(&bytes[last_newline + 1..]);

        for line in complete.split(|&b| b == b'\n') {
            self.process_line(line, &mut emit)?;
        }
        Ok(())
    }

    /// Flush the carried line and close the session.
    ///
    /// Does nothing if the session is already closed.
    ///
    /// # Errors
    ///
    /// Returns the line-level error of the carried line, if it fails to parse.
    pub fn on_end<F>(&mut self, mut emit: F) -> ParseResult<()>
    where
        F: FnMut(Record),
    {
        if self.is_closed() {
            return Ok(());
        }

        let carry = std::mem::take(&mut self.carry);
        if !carry.is_empty() {
            self.process_line(&carry, &mut emit)?;
        }

        self.state = SessionState::Closed;
        debug!(
            lines = self.lines_seen,
            records = self.records_emitted,
            "log stream closed"
        );
        Ok(())
    }

    /// Feed one chunk and collect the records it completes.
    pub fn push<'c>(&mut self, chunk: impl Into<Chunk<'c>>) -> ParseResult<Vec<Record>> {
        let mut records = Vec::new();
        self.on_chunk(chunk, |record| records.push(record))?;
        Ok(records)
    }

    /// Close the session and collect the record of the carried line, if any.
    pub fn finish(&mut self) -> ParseResult<Vec<Record>> {
        let mut records = Vec::new();
        self.on_end(|record| records.push(record))?;
        Ok(records)
    }

    fn process_line<F>(&mut self, raw: &[u8], emit: &mut F) -> ParseResult<()>
    where
        F: FnMut(Record),
    {
        self.lines_seen += 1;
        let line = String::from_utf8_lossy(raw);

        match parse_logical_line(&line, &self.options, &mut self.schema) {
            Ok(Some(record)) => {
                self.records_emitted += 1;
                emit(record);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                debug!(line = self.lines_seen, error = %e, "log stream failed");
                self.state = SessionState::Closed;
                self.carry.clear();
                Err(e)
            }
        }
    }
}
