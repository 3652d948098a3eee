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

//! CLI command implementations

mod parse;
mod schemas;

pub use parse::{parse, resolve_options, FORMAT_ENV, STDIN_PATH, VERSION_ENV};
pub use schemas::schemas;

use crate::error::CliError;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};

/// Default maximum input file size (1 GB).
/// Can be overridden via the `CFLOG_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`].
pub const MAX_FILE_SIZE_ENV: &str = "CFLOG_MAX_FILE_SIZE";

/// Maximum input file size from the environment, or the default when unset
/// or unparsable.
fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a non-empty environment variable.
pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Open an input for reading; [`STDIN_PATH`] selects standard input.
///
/// Files are checked against the size limit before they are opened.
///
/// # Errors
///
/// Returns `Err` if the metadata cannot be read, the file exceeds the limit
/// or the file cannot be opened.
pub fn open_input(path: &str) -> Result<Box<dyn Read>, CliError> {
    if path == STDIN_PATH {
        return Ok(Box::new(io::stdin()));
    }

    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    let file = File::open(path).map_err(|e| CliError::io_error(path, e))?;
    Ok(Box::new(file))
}

/// Open an output file, or stdout when `path` is `None`.
pub fn open_output(path: Option<&str>) -> Result<Box<dyn Write>, CliError> {
    match path {
        Some(p) => {
            let file = File::create(p).map_err(|e| CliError::io_error(p, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
