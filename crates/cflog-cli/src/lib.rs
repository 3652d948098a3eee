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

//! cflog CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **parse**: Parse CloudFront log files (or stdin) into JSON lines
//! - **schemas**: List registered log schemas and their columns
//!
//! # Examples
//!
//! ```no_run
//! use cflog_cli::commands::{parse, resolve_options};
//!
//! # fn main() -> Result<(), cflog_cli::error::CliError> {
//! // Parse two RTMP logs in parallel into a pretty JSON array
//! let files = vec!["a.log".to_string(), "b.log".to_string()];
//! let options = resolve_options(Some("rtmp".to_string()), None);
//! parse(&files, &options, Some("out.json"), true, true)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! - `CFLOG_FORMAT` / `CFLOG_VERSION`: defaults for `--format` / `--log-version`
//! - `CFLOG_MAX_FILE_SIZE`: largest input file accepted, in bytes (default 1 GB)
//! - `RUST_LOG`: log filter for diagnostics written to stderr

pub mod cli;
pub mod commands;
pub mod error;
