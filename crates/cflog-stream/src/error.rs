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

//! Error types for log stream readers.
//!
//! # Error Categories
//!
//! - **I/O Errors**: the byte source failed
//! - **Parse Errors**: a line could not be parsed; carries the 1-based line
//!   number within the stream
//! - **Line Length Errors**: an unterminated line grew past the configured limit
//!
//! # Examples
//!
//! ```rust
//! use cflog_core::ParseOptions;
//! use cflog_stream::{RecordReader, StreamError};
//! use std::io::Cursor;
//!
//! let input = "#Version: 1.0\nok\tline\n";
//! let reader = RecordReader::new(Cursor::new(input), ParseOptions::new().format("not-valid"));
//!
//! for record in reader {
//!     match record {
//!         Ok(record) => println!("{:?}", record),
//!         Err(StreamError::Parse { line, source }) => {
//!             assert_eq!(line, 2);
//!             assert!(source.is_unrecognized_format());
//!         }
//!         Err(e) => panic!("unexpected error: {}", e),
//!     }
//! }
//! ```

use cflog_core::ParseError;
use thiserror::Error;

/// Errors that can occur while streaming records from a reader.
#[derive(Error, Debug)]
pub enum StreamError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line failed to parse.
    #[error("Parse error at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    /// An unterminated line exceeded the configured maximum length.
    #[error("Line {line} exceeds maximum length of {limit} bytes")]
    LineTooLong { line: usize, limit: usize },
}

impl StreamError {
    /// Create a parse error.
    #[inline]
    pub fn parse(line: usize, source: ParseError) -> Self {
        Self::Parse { line, source }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } | Self::LineTooLong { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
