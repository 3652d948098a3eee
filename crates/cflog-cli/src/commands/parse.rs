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

//! Parse command - CloudFront logs to JSON
//!
//! Each input is streamed through a [`RecordReader`], so memory stays bounded
//! by the longest line in sequential mode. Output is one JSON object per line,
//! or a single pretty-printed array with `--pretty`.
//!
//! With `--parallel`, inputs are parsed concurrently with rayon (one session
//! per file) and written in input order.

use super::{env_var, open_input, open_output};
use crate::error::CliError;
use cflog_core::{ParseOptions, Record};
use cflog_stream::RecordReader;
use colored::Colorize;
use rayon::prelude::*;
use std::io::Write;
use tracing::debug;

/// Input path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Environment variable supplying the log format when `--format` is absent.
pub const FORMAT_ENV: &str = "CFLOG_FORMAT";

/// Environment variable supplying the format version when `--log-version` is absent.
pub const VERSION_ENV: &str = "CFLOG_VERSION";

/// Build parse options from command-line values, falling back to
/// [`FORMAT_ENV`] and [`VERSION_ENV`], then to the library defaults.
///
/// # Examples
///
/// ```
/// use cflog_cli::commands::resolve_options;
///
/// let options = resolve_options(Some("rtmp".to_string()), None);
/// assert_eq!(options.format.as_deref(), Some("rtmp"));
/// ```
pub fn resolve_options(format: Option<String>, version: Option<String>) -> ParseOptions {
    ParseOptions {
        format: format.or_else(|| env_var(FORMAT_ENV)),
        version: version.or_else(|| env_var(VERSION_ENV)),
    }
}

/// Parse log files and write their records as JSON.
///
/// # Arguments
///
/// * `files` - Input paths; empty or [`STDIN_PATH`] reads standard input
/// * `options` - Format and version to parse with
/// * `output` - Optional output file path. If `None`, writes to stdout
/// * `pretty` - Write one pretty-printed JSON array instead of JSON lines
/// * `parallel` - Parse inputs concurrently
///
/// # Errors
///
/// Returns `Err` if an input cannot be opened or read, a line fails to parse
/// or the output cannot be written. In sequential JSON-lines mode, records
/// preceding the failure have already been written.
///
/// # Examples
///
/// ```no_run
/// use cflog_cli::commands::{parse, resolve_options};
///
/// # fn main() -> Result<(), cflog_cli::error::CliError> {
/// let options = resolve_options(Some("web".to_string()), None);
/// parse(&["access.log".to_string()], &options, None, false, false)?;
/// # Ok(())
/// # }
/// ```
pub fn parse(
    files: &[String],
    options: &ParseOptions,
    output: Option<&str>,
    pretty: bool,
    parallel: bool,
) -> Result<(), CliError> {
    let inputs: Vec<&str> = if files.is_empty() {
        vec![STDIN_PATH]
    } else {
        files.iter().map(String::as_str).collect()
    };

    let mut sink = JsonSink::new(open_output(output)?, output, pretty);

    if parallel && inputs.len() > 1 {
        let batches: Vec<Result<Vec<Record>, CliError>> = inputs
            .par_iter()
            .map(|path| read_records(path, options))
            .collect();

        for batch in batches {
            for record in batch? {
                sink.write(record)?;
            }
        }
    } else {
        for path in &inputs {
            let reader = RecordReader::new(open_input(path)?, options.clone());
            for record in reader {
                let record = record.map_err(|e| CliError::from_stream(path, e))?;
                sink.write(record)?;
            }
            debug!(input = *path, "input parsed");
        }
    }

    let written = sink.finish()?;

    if let Some(path) = output {
        println!(
            "{} {} records from {} input(s) written to {}",
            "✓".green().bold(),
            written,
            inputs.len(),
            path
        );
    }

    Ok(())
}

/// Read every record of one input into memory.
fn read_records(path: &str, options: &ParseOptions) -> Result<Vec<Record>, CliError> {
    let reader = RecordReader::new(open_input(path)?, options.clone());
    let records = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::from_stream(path, e))?;
    debug!(input = path, records = records.len(), "input parsed");
    Ok(records)
}

/// Writes records as JSON lines, or buffers them for one pretty array.
struct JsonSink<'a> {
    out: Box<dyn Write>,
    target: &'a str,
    pretty: Option<Vec<Record>>,
    written: usize,
}

impl<'a> JsonSink<'a> {
    fn new(out: Box<dyn Write>, path: Option<&'a str>, pretty: bool) -> Self {
        Self {
            out,
            target: path.unwrap_or("<stdout>"),
            pretty: pretty.then(Vec::new),
            written: 0,
        }
    }

    fn write(&mut self, record: Record) -> Result<(), CliError> {
        self.written += 1;
        match &mut self.pretty {
            Some(buffered) => buffered.push(record),
            None => {
                serde_json::to_writer(&mut self.out, &record)?;
                self.out
                    .write_all(b"\n")
                    .map_err(|e| CliError::io_error(self.target, e))?;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<usize, CliError> {
        if let Some(records) = self.pretty.take() {
            serde_json::to_writer_pretty(&mut self.out, &records)?;
            self.out
                .write_all(b"\n")
                .map_err(|e| CliError::io_error(self.target, e))?;
        }
        self.out
            .flush()
            .map_err(|e| CliError::io_error(self.target, e))?;
        Ok(self.written)
    }
}
