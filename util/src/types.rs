// Copyright 2019 The Grin Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging configuration, as found in the `[logging]` section of the
//! configuration file. Every field falls back to its default when missing.

// defaults of every `LoggingConfig` field
const DEFAULT_STDOUT: bool = true;
const DEFAULT_STDOUT_LEVEL: LogLevel = LogLevel::Warning;
const DEFAULT_FILE: bool = false;
const DEFAULT_FILE_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_FILE_PATH: &str = "cuckoo.log";
const DEFAULT_FILE_APPEND: bool = true;

/// 16 MiB per file before rolling over
const DEFAULT_ROLL_SIZE: u64 = 16 * 1024 * 1024;
const DEFAULT_ROLLED_FILES: u32 = 32;

/// Verbosity of an appender, from the quietest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
	/// Rejected proofs and broken invariants only
	Error,
	/// Also suspicious but accepted input
	Warning,
	/// Also retargets and hard fork transitions
	Info,
	/// Also the reason of every rejected proof of work
	Debug,
	/// Everything
	Trace,
}

/// Where log records go and how much of them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
	/// Echo records on stdout
	#[serde(default = "default_stdout")]
	pub log_to_stdout: bool,
	/// Threshold of the stdout appender
	#[serde(default = "default_stdout_level")]
	pub stdout_log_level: LogLevel,
	/// Write records to `log_file_path`
	#[serde(default = "default_file")]
	pub log_to_file: bool,
	/// Threshold of the file appender
	#[serde(default = "default_file_level")]
	pub file_log_level: LogLevel,
	/// Log file, relative to the working directory unless absolute
	#[serde(default = "default_file_path")]
	pub log_file_path: String,
	/// Keep the content of an existing log file instead of truncating it
	#[serde(default = "default_file_append")]
	pub log_file_append: bool,
	/// Roll the log file over past this many bytes, `None` never rolls
	#[serde(default = "default_roll_size")]
	pub log_max_size: Option<u64>,
	/// Gzipped rolled files kept around, oldest dropped first
	#[serde(default = "default_rolled_files")]
	pub log_max_files: u32,
}

impl Default for LoggingConfig {
	fn default() -> LoggingConfig {
		LoggingConfig {
			log_to_stdout: default_stdout(),
			stdout_log_level: default_stdout_level(),
			log_to_file: default_file(),
			file_log_level: default_file_level(),
			log_file_path: default_file_path(),
			log_file_append: default_file_append(),
			log_max_size: default_roll_size(),
			log_max_files: default_rolled_files(),
		}
	}
}

fn default_stdout() -> bool {
	DEFAULT_STDOUT
}

fn default_stdout_level() -> LogLevel {
	DEFAULT_STDOUT_LEVEL
}

fn default_file() -> bool {
	DEFAULT_FILE
}

fn default_file_level() -> LogLevel {
	DEFAULT_FILE_LEVEL
}

fn default_file_path() -> String {
	DEFAULT_FILE_PATH.to_owned()
}

fn default_file_append() -> bool {
	DEFAULT_FILE_APPEND
}

fn default_roll_size() -> Option<u64> {
	Some(DEFAULT_ROLL_SIZE)
}

fn default_rolled_files() -> u32 {
	DEFAULT_ROLLED_FILES
}
