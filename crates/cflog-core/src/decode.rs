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

//! Field value decoding.
//!
//! CloudFront percent-encodes field values, and encodes a few characters a
//! second time: a double quote, a backslash and a space inside a value arrive
//! as `%2522`, `%255C` and `%2520` (the `%` of `%22` itself escaped as `%25`).
//! Decoding therefore runs in two passes:
//!
//! 1. Replace the three over-encoded sequences with their literal characters.
//! 2. Unescape everything that remains.
//!
//! The order matters. Running the generic pass first would turn `%2520` into
//! the literal text `%20` and stop there.
//!
//! # Unescaping
//!
//! - A run of `%XX` escapes that forms valid UTF-8 decodes as UTF-8.
//! - Escaped bytes that are not part of valid UTF-8 each decode to the
//!   character with that code point (`caf%E9` is `café`), so a stray Latin-1
//!   byte in a client-supplied query string never fails the line.
//! - `%uXXXX` decodes to the UTF-16 code unit `XXXX`; a high and low surrogate
//!   pair written as two escapes decodes to one character.
//! - Malformed escapes (a `%` not followed by two hex digits, or `%u` not
//!   followed by four) are kept as literal text.
//!
//! The only failure is an unpaired surrogate escape, which has no `char`.

use crate::error::DecodeError;
use memchr::memchr;
use std::borrow::Cow;

/// Over-encoded sequences, in the order they are replaced.
const OVER_ENCODED: [(&str, &str); 3] = [("%2522", "\""), ("%255C", "\\"), ("%2520", " ")];

/// Decode one raw field value.
///
/// Values without a `%` are returned borrowed.
///
/// # Errors
///
/// Returns [`DecodeError::UnpairedSurrogate`] if a `%uXXXX` escape names a
/// UTF-16 surrogate that is not part of a pair.
///
/// # Examples
///
/// ```rust
/// use cflog_core::decode_field;
///
/// assert_eq!(decode_field("foo%2520bar").unwrap(), "foo bar");
/// assert_eq!(decode_field("%2522quoted%2522").unwrap(), "\"quoted\"");
/// assert_eq!(decode_field("LNX%2010,0,32,18").unwrap(), "LNX 10,0,32,18");
/// assert_eq!(decode_field("q=caf%E9").unwrap(), "q=café");
/// assert_eq!(decode_field("/plain/path").unwrap(), "/plain/path");
/// ```
pub fn decode_field(raw: &str) -> Result<Cow<'_, str>, DecodeError> {
    if memchr(b'%', raw.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(raw));
    }

    let mut value = Cow::Borrowed(raw);
    for (encoded, literal) in OVER_ENCODED {
        if value.contains(encoded) {
            value = Cow::Owned(value.replace(encoded, literal));
        }
    }

    if memchr(b'%', value.as_bytes()).is_none() {
        return Ok(value);
    }
    unescape(&value).map(Cow::Owned)
}

/// Generic `%XX` / `%uXXXX` unescaping.
fn unescape(input: &str) -> Result<String, DecodeError> {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    // Consecutive `%XX` bytes, decoded together so multi-byte UTF-8 survives.
    let mut run = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        if let Some(unit) = unicode_escape(bytes, i) {
            flush_run(&mut run, &mut out);
            out.push_str(&input[literal_start..i]);
            i += 6;

            let c = match unit {
                0xD800..=0xDBFF => match unicode_escape(bytes, i) {
                    Some(low @ 0xDC00..=0xDFFF) => {
                        i += 6;
                        let high = u32::from(unit) - 0xD800;
                        let low = u32::from(low) - 0xDC00;
                        char::from_u32(0x10000 + (high << 10) + low)
                    }
                    _ => None,
                },
                _ => char::from_u32(u32::from(unit)),
            };
            out.push(c.ok_or(DecodeError::UnpairedSurrogate { unit })?);
            literal_start = i;
            continue;
        }

        if let (Some(hi), Some(lo)) = (hex_value(bytes.get(i + 1)), hex_value(bytes.get(i + 2))) {
            if literal_start < i {
                flush_run(&mut run, &mut out);
                out.push_str(&input[literal_start..i]);
            }
            run.push((hi << 4) | lo);
            i += 3;
            literal_start = i;
            continue;
        }

        i += 1;
    }

    flush_run(&mut run, &mut out);
    out.push_str(&input[literal_start..]);
    Ok(out)
}

/// Code unit of a `%uXXXX` escape starting at `at`.
fn unicode_escape(bytes: &[u8], at: usize) -> Option<u16> {
    if bytes.get(at) != Some(&b'%') || bytes.get(at + 1) != Some(&b'u') {
        return None;
    }
    (2..6).try_fold(0u16, |unit, offset| {
        hex_value(bytes.get(at + offset)).map(|digit| (unit << 4) | u16::from(digit))
    })
}

/// Append escaped bytes: valid UTF-8 as is, every other byte as its own code point.
fn flush_run(run: &mut Vec<u8>, out: &mut String) {
    let mut rest = run.as_slice();
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, invalid) = rest.split_at(e.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    out.push_str(valid);
                }
                let bad = e.error_len().unwrap_or(invalid.len());
                out.extend(invalid[..bad].iter().map(|&b| char::from(b)));
                rest = &invalid[bad..];
            }
        }
    }
    run.clear();
}

#[inline]
fn hex_value(byte: Option<&u8>) -> Option<u8> {
    match *byte? {
        b @ b'0'..=b'9' => Some(b - b'0'),
        b @ b'a'..=b'f' => Some(b - b'a' + 10),
        b @ b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
