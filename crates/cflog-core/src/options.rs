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

//! Parse options and their defaults.
//!
//! Callers supply a [`ParseOptions`] with any subset of fields set. Unset
//! fields fall back to the immutable [`DEFAULTS`] each time the options are
//! resolved; nothing here is shared mutable state.

/// Default format and version applied to unset option fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defaults {
    /// Default log format.
    pub format: &'static str,
    /// Default schema version.
    pub version: &'static str,
}

/// Web distribution logs, version 1.0.
pub const DEFAULTS: Defaults = Defaults {
    format: "web",
    version: "1.0",
};

/// Caller-supplied parse options.
///
/// # Examples
///
/// ```rust
/// use cflog_core::ParseOptions;
///
/// let options = ParseOptions::new().format("rtmp");
/// assert_eq!(options.resolved_format(), "rtmp");
/// assert_eq!(options.resolved_version(), "1.0");
/// assert_eq!(options.schema_key(), "rtmp_v1.0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Log format (`web`, `rtmp`, `kinesis`). Defaults to `web`.
    pub format: Option<String>,
    /// Schema version. Defaults to `1.0`.
    pub version: Option<String>,
}

impl ParseOptions {
    /// Options with every field unset.
    pub const fn new() -> Self {
        Self {
            format: None,
            version: None,
        }
    }

    /// Set the log format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the schema version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The format after applying [`DEFAULTS`].
    #[inline]
    pub fn resolved_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULTS.format)
    }

    /// The version after applying [`DEFAULTS`].
    #[inline]
    pub fn resolved_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULTS.version)
    }

    /// Registry key for the resolved options: `"{format}_v{version}"`.
    pub fn schema_key(&self) -> String {
        schema_key(self.resolved_format(), self.resolved_version())
    }
}

/// Build the registry key for a `(format, version)` pair.
#[inline]
pub fn schema_key(format: &str, version: &str) -> String {
    format!("{}_v{}", format, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_unset_fields() {
        let options = ParseOptions::new();
        assert_eq!(options.resolved_format(), "web");
        assert_eq!(options.resolved_version(), "1.0");
        assert_eq!(options.schema_key(), "web_v1.0");
    }

    #[test]
    fn test_explicit_fields_win() {
        let options = ParseOptions::new().format("kinesis").version("2.0");
        assert_eq!(options.schema_key(), "kinesis_v2.0");
    }

    #[test]
    fn test_default_trait_matches_new() {
        assert_eq!(ParseOptions::default(), ParseOptions::new());
    }
}
