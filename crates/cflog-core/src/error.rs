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

//! Error types for log parsing.
//!
//! Every failure the core can raise is line-level: an unknown schema or a field
//! that cannot be decoded aborts the line being processed. Comment lines and
//! blank lines are never errors; they are filtered before parsing.
//!
//! # Error Categories
//!
//! - **Unrecognized format**: options resolve to a `(format, version)` pair
//!   with no registered schema
//! - **Decode failures**: a field's percent escapes produce invalid UTF-8
//! - **Closed sessions**: a chunk was pushed into a finished or failed stream
//!
//! # Examples
//!
//! ```rust
//! use cflog_core::{parse_line, ParseError, ParseOptions};
//!
//! let err = parse_line("a\tb", &ParseOptions::new().format("not-valid")).unwrap_err();
//! assert!(matches!(err, ParseError::UnrecognizedFormat { .. }));
//! assert!(err.to_string().contains("not-valid"));
//! ```

use thiserror::Error;

/// Errors raised while parsing log lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No schema is registered for the resolved `(format, version)` pair.
    #[error("Format not recognized: {format} (version {version})")]
    UnrecognizedFormat {
        /// The format that was requested.
        format: String,
        /// The version that was requested.
        version: String,
    },

    /// A field value could not be decoded.
    #[error("Failed to decode field '{column}': {source}")]
    Decode {
        /// Schema column the value was destined for.
        column: &'static str,
        /// Underlying decoder failure.
        #[source]
        source: DecodeError,
    },

    /// A chunk was pushed into a stream that already finished or failed.
    #[error("Stream session is closed")]
    SessionClosed,
}

impl ParseError {
    /// Create an unrecognized format error.
    #[inline]
    pub fn unrecognized(format: impl Into<String>, version: impl Into<String>) -> Self {
        Self::UnrecognizedFormat {
            format: format.into(),
            version: version.into(),
        }
    }

    /// Returns true if this error was caused by an unknown schema.
    #[inline]
    pub fn is_unrecognized_format(&self) -> bool {
        matches!(self, Self::UnrecognizedFormat { .. })
    }
}

/// Errors raised by the field decoder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%uXXXX` escape names a UTF-16 surrogate without its partner.
    #[error("escape %u{unit:04X} is an unpaired UTF-16 surrogate")]
    UnpairedSurrogate {
        /// The offending code unit.
        unit: u16,
    },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_format_display() {
        let err = ParseError::unrecognized("not-valid", "1.0");
        let msg = err.to_string();
        assert!(msg.contains("Format not recognized: not-valid"));
        assert!(msg.contains("1.0"));
        assert!(err.is_unrecognized_format());
    }

    #[test]
    fn test_decode_error_display() {
        let err = ParseError::Decode {
            column: "cs-uri-stem",
            source: DecodeError::UnpairedSurrogate { unit: 0xD83D },
        };
        let msg = err.to_string();
        assert!(msg.contains("cs-uri-stem"));
        assert!(std::error::Error::source(&err).unwrap().to_string().contains("%uD83D"));
        assert!(!err.is_unrecognized_format());
    }

    #[test]
    fn test_decode_error_source_chain() {
        use std::error::Error as _;

        let err = ParseError::Decode {
            column: "c-ip",
            source: DecodeError::UnpairedSurrogate { unit: 0xDC00 },
        };
        assert!(err.source().is_some());
        assert!(ParseError::SessionClosed.source().is_none());
    }
}
