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

//! Shared driver between the blocking and async readers.
//!
//! The reassembler pushes records through a callback; readers hand them out
//! one at a time. The pump queues what a chunk produced and holds back a
//! failure until every record emitted before it has been handed out.

use crate::error::StreamError;
use cflog_core::{Chunk, ChunkEncoding, ParseOptions, Reassembler, Record};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug)]
pub(crate) struct RecordPump {
    session: Reassembler,
    ready: VecDeque<Record>,
    failure: Option<StreamError>,
    finished: bool,
    max_line_length: usize,
    records_read: usize,
}

impl RecordPump {
    pub(crate) fn new(options: ParseOptions, max_line_length: usize) -> Self {
        Self {
            session: Reassembler::new(options),
            ready: VecDeque::new(),
            failure: None,
            finished: false,
            max_line_length,
            records_read: 0,
        }
    }

    pub(crate) fn session(&self) -> &Reassembler {
        &self.session
    }

    pub(crate) fn records_read(&self) -> usize {
        self.records_read
    }

    /// True once no further input will be consumed.
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn feed(&mut self, bytes: &[u8], encoding: ChunkEncoding) {
        let ready = &mut self.ready;
        let result = self
            .session
            .on_chunk(Chunk::Bytes(bytes, encoding), |record| ready.push_back(record));

        if let Err(e) = result {
            let line = self.session.lines_seen();
            self.fail(StreamError::parse(line, e));
        } else if self.session.pending().len() > self.max_line_length {
            let line = self.session.lines_seen() + 1;
            self.fail(StreamError::LineTooLong {
                line,
                limit: self.max_line_length,
            });
        }
    }

    pub(crate) fn end(&mut self) {
        let ready = &mut self.ready;
        if let Err(e) = self.session.on_end(|record| ready.push_back(record)) {
            let line = self.session.lines_seen();
            self.fail(StreamError::parse(line, e));
        }
        self.finished = true;
    }

    /// Next queued record, or the held-back failure once the queue is drained.
    pub(crate) fn next_ready(&mut self) -> Option<Result<Record, StreamError>> {
        if let Some(record) = self.ready.pop_front() {
            self.records_read += 1;
            return Some(Ok(record));
        }
        self.failure.take().map(Err)
    }

    fn fail(&mut self, error: StreamError) {
        debug!(error = %error, "log reader stopped");
        self.failure = Some(error);
        self.finished = true;
    }
}
