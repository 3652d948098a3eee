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

//! Batch parsing of whole inputs.
//!
//! The batch API parses a complete log (a string, a byte buffer, or an
//! already-split sequence of lines) in one call. Comment lines (`#...`) and
//! empty lines are dropped; every other line becomes one [`Record`], in input
//! order.
//!
//! Results are all-or-nothing: the first failing line aborts the batch and no
//! records are returned.

use crate::error::ParseResult;
use crate::line::{is_skipped, zip_line};
use crate::options::ParseOptions;
use crate::record::Record;
use crate::schema::Schema;
use std::borrow::Cow;
use tracing::debug;

/// Line separator.
pub const LINE_SEPARATOR: char = '\n';

/// Batch parser input.
///
/// Usually built through one of the `From` conversions rather than directly.
///
/// # Examples
///
/// ```rust
/// use cflog_core::Input;
///
/// let text = Input::from("a\nb");
/// let bytes = Input::from(&b"a\nb"[..]);
/// let lines = Input::from(vec!["a", "b"]);
///
/// assert_eq!(text.lines(), bytes.lines());
/// assert_eq!(text.lines(), lines.lines());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// Log text, split on `\n`.
    Text(&'a str),
    /// Raw bytes, decoded as UTF-8 (invalid sequences become U+FFFD) and
    /// split on `\n`.
    Bytes(&'a [u8]),
    /// Lines that are already split. Each element is one logical line.
    Lines(Vec<Cow<'a, str>>),
}

impl<'a> Input<'a> {
    /// Normalize the input to an ordered sequence of lines.
    pub fn lines(&self) -> Vec<Cow<'_, str>> {
        match self {
            Input::Text(text) => split_lines(text),
            Input::Bytes(bytes) => match String::from_utf8_lossy(bytes) {
                Cow::Borrowed(text) => split_lines(text),
                Cow::Owned(text) => text
                    .split(LINE_SEPARATOR)
                    .map(|line| Cow::Owned(line.to_owned()))
                    .collect(),
            },
            Input::Lines(lines) => lines.iter().map(|line| Cow::Borrowed(&**line)).collect(),
        }
    }
}

fn split_lines(text: &str) -> Vec<Cow<'_, str>> {
    text.split(LINE_SEPARATOR).map(Cow::Borrowed).collect()
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a> From<Vec<&'a str>> for Input<'a> {
    fn from(lines: Vec<&'a str>) -> Self {
        Input::Lines(lines.into_iter().map(Cow::Borrowed).collect())
    }
}

impl<'a> From<Vec<String>> for Input<'a> {
    fn from(lines: Vec<String>) -> Self {
        Input::Lines(lines.into_iter().map(Cow::Owned).collect())
    }
}

impl<'a> From<&'a [String]> for Input<'a> {
    fn from(lines: &'a [String]) -> Self {
        Input::Lines(lines.iter().map(|line| Cow::Borrowed(line.as_str())).collect())
    }
}

/// Parse a whole log.
///
/// # Errors
///
/// Returns the first line-level error. No records are returned alongside it.
/// The schema is resolved when the first non-comment line is reached, so an
/// input with no data lines never fails on unknown options.
///
/// # Examples
///
/// ```rust
/// use cflog_core::{parse, ParseOptions};
///
/// let log = "#Version: 1.0\n2014-05-23\t01:13:11\tFRA2\n\n";
/// let records = parse(log, &ParseOptions::new()).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0]["x-edge-location"], "FRA2");
/// ```
pub fn parse<'a>(input: impl Into<Input<'a>>, options: &ParseOptions) -> ParseResult<Vec<Record>> {
    let input = input.into();
    let mut schema = None;
    let mut records = Vec::new();

    for line in input.lines() {
        if let Some(record) = parse_logical_line(&line, options, &mut schema)? {
            records.push(record);
        }
    }

    debug!(records = records.len(), "parsed log batch");
    Ok(records)
}

/// Parse a whole log and hand the outcome to `callback`.
///
/// The callback runs exactly once, after the whole input has been parsed,
/// with either every record or the first error. Its return value is passed
/// through.
///
/// # Examples
///
/// ```rust
/// use cflog_core::{parse_with, ParseOptions};
///
/// let count = parse_with("a\tb\nc\td", &ParseOptions::new(), |result| {
///     result.map(|records| records.len()).unwrap_or(0)
/// });
/// assert_eq!(count, 2);
/// ```
pub fn parse_with<'a, F, T>(input: impl Into<Input<'a>>, options: &ParseOptions, callback: F) -> T
where
    F: FnOnce(ParseResult<Vec<Record>>) -> T,
{
    callback(parse(input, options))
}

/// Apply the comment/blank filter to one logical line and parse it.
///
/// `schema` caches the resolved schema across calls; it is filled on the
/// first line that survives the filter.
pub(crate) fn parse_logical_line(
    line: &str,
    options: &ParseOptions,
    schema: &mut Option<&'static Schema>,
) -> ParseResult<Option<Record>> {
    if is_skipped(line) {
        return Ok(None);
    }

    let schema = match *schema {
        Some(resolved) => resolved,
        None => {
            let resolved = Schema::resolve(options)?;
            *schema = Some(resolved);
            resolved
        }
    };
    zip_line(line, schema).map(Some)
}
