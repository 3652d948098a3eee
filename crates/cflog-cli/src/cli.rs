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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use clap::{Parser, Subcommand};

/// cflog - CloudFront access log parser
///
/// Turns CloudFront web, RTMP and real-time (Kinesis) access logs into JSON.
///
/// # Examples
///
/// ```bash
/// # Parse a web distribution log
/// cflog parse E2EXAMPLE.2014-05-23-01.log
///
/// # Parse RTMP logs from stdin
/// zcat EXAMPLE.gz | cflog parse --format rtmp
///
/// # List registered schemas
/// cflog schemas
/// ```
#[derive(Parser)]
#[command(name = "cflog")]
#[command(author, version, about = "cflog - CloudFront access log parser", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse log files into JSON
    ///
    /// Reads each file (or stdin when no file or `-` is given) and writes one
    /// JSON object per record. Comment and blank lines are skipped.
    Parse {
        /// Input log files
        #[arg(value_name = "FILE")]
        files: Vec<String>,

        /// Log format (web, rtmp, kinesis) [env: CFLOG_FORMAT, default: web]
        #[arg(short, long)]
        format: Option<String>,

        /// Log format version [env: CFLOG_VERSION, default: 1.0]
        #[arg(long = "log-version", value_name = "VERSION")]
        log_version: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Write a single pretty-printed JSON array
        #[arg(long)]
        pretty: bool,

        /// Parse inputs in parallel
        #[arg(short, long)]
        parallel: bool,
    },

    /// List registered log schemas
    ///
    /// Without an argument, prints one line per schema. With a format name,
    /// prints the columns of that format.
    Schemas {
        /// Format to show columns for
        #[arg(value_name = "FORMAT")]
        format: Option<String>,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if input or output fails, a line fails to parse, or the
    /// arguments name a format that does not exist.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Parse {
                files,
                format,
                log_version,
                output,
                pretty,
                parallel,
            } => {
                let options = commands::resolve_options(format, log_version);
                commands::parse(&files, &options, output.as_deref(), pretty, parallel)
            }
            Commands::Schemas { format } => commands::schemas(format.as_deref()),
        }
    }
}
