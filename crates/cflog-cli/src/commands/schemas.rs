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

//! Schemas command - list registered log layouts

use crate::error::CliError;
use cflog_core::schema::{self, Schema};
use colored::Colorize;

/// Print registered schemas.
///
/// Without a format, prints one summary line per schema. With a format,
/// prints the numbered columns of every version of that format.
///
/// # Errors
///
/// Returns `Err` if no schema is registered for `format`.
pub fn schemas(format: Option<&str>) -> Result<(), CliError> {
    match format {
        None => {
            for schema in schema::schemas() {
                println!(
                    "{:<14} {:<8} {:<6} {} columns",
                    schema.key().bold(),
                    schema.format(),
                    schema.version(),
                    schema.len()
                );
            }
            Ok(())
        }
        Some(format) => {
            let selected: Vec<&Schema> = schema::schemas().filter(|s| s.format() == format).collect();
            if selected.is_empty() {
                let known: Vec<&str> = schema::schemas().map(Schema::format).collect();
                return Err(CliError::invalid_input(format!(
                    "No schema registered for format '{}'. Known formats: {}",
                    format,
                    known.join(", ")
                )));
            }

            for schema in selected {
                println!("{} ({} columns)", schema.key().bold(), schema.len());
                for (i, column) in schema.columns().iter().enumerate() {
                    println!("  {:>2}  {}", i + 1, column);
                }
            }
            Ok(())
        }
    }
}
