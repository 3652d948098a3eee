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

//! Parsed log records.

use std::ops::Index;

/// One decoded log line: column name → value, in schema order.
///
/// A record holds the first `min(field_count, schema_len)` columns of its
/// schema. Lines with fewer fields than the schema simply produce shorter
/// records; extra fields are dropped.
///
/// # Examples
///
/// ```rust
/// use cflog_core::{parse_line, ParseOptions};
///
/// let record = parse_line("2014-05-23\t01:13:11\tFRA2", &ParseOptions::new()).unwrap();
///
/// assert_eq!(record.len(), 3);
/// assert_eq!(record["x-edge-location"], "FRA2");
/// assert_eq!(record.get("cs-uri-stem"), None);
/// assert_eq!(record.keys().collect::<Vec<_>>(), ["date", "time", "x-edge-location"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(&'static str, String)>,
}

impl Record {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, column: &'static str, value: String) {
        self.fields.push((column, value));
    }

    /// Get a value by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Get a value by field position.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&'static str, &str)> {
        self.fields
            .get(index)
            .map(|(name, value)| (*name, value.as_str()))
    }

    /// Returns true if the record has a value for `column`.
    pub fn contains_key(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| *name == column)
    }

    /// Number of columns present.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names, in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Values, in schema order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    /// `(column, value)` pairs, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

impl Index<&str> for Record {
    type Output = String;

    /// # Panics
    ///
    /// Panics if the record has no value for `column`.
    fn index(&self, column: &str) -> &String {
        match self.fields.iter().find(|(name, _)| *name == column) {
            Some((_, value)) => value,
            None => panic!("record has no column '{}'", column),
        }
    }
}

impl IntoIterator for Record {
    type Item = (&'static str, String);
    type IntoIter = std::vec::IntoIter<(&'static str, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
