// Copyright 2021 The Grin Developers
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

//! Logging wrapper to be used throughout all crates in the workspace
use crate::types::{LogLevel, LoggingConfig};
use crate::Mutex;

use backtrace::Backtrace;
use std::{panic, thread};

use log::{LevelFilter, Record};
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::append::rolling_file::{
	policy::compound::roll::fixed_window::FixedWindowRoller,
	policy::compound::trigger::size::SizeTrigger, policy::compound::CompoundPolicy,
	RollingFileAppender,
};
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::{threshold::ThresholdFilter, Filter, Response};

lazy_static! {
	/// Flag to observe whether logging was explicitly initialised (don't output otherwise)
	static ref WAS_INIT: Mutex<bool> = Mutex::new(false);
	/// Static Logging configuration, should only be set once, before first logging call
	static ref LOGGING_CONFIG: Mutex<LoggingConfig> = Mutex::new(LoggingConfig::default());
}

const LOGGING_PATTERN: &str = "{d(%Y%m%d %H:%M:%S%.3f)} {h({l})} {M} - {m}{n}";

/// Errors raised while setting up the log4rs backend
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
	/// The log file or its rolling policy could not be created
	#[error("Log file setup error: {0}")]
	File(String),
	/// log4rs rejected the assembled configuration
	#[error("Logger configuration error: {0}")]
	Config(String),
}

/// This filter is rejecting messages that doesn't start with "cuckoo"
/// in order to save log space for only workspace records
#[derive(Debug)]
struct CuckooFilter;

impl Filter for CuckooFilter {
	fn filter(&self, record: &Record<'_>) -> Response {
		if let Some(module_path) = record.module_path() {
			if module_path.starts_with("cuckoo") {
				return Response::Neutral;
			}
		}

		Response::Reject
	}
}

fn convert_log_level(in_level: LogLevel) -> LevelFilter {
	match in_level {
		LogLevel::Info => LevelFilter::Info,
		LogLevel::Warning => LevelFilter::Warn,
		LogLevel::Debug => LevelFilter::Debug,
		LogLevel::Trace => LevelFilter::Trace,
		LogLevel::Error => LevelFilter::Error,
	}
}

fn file_appender(c: &LoggingConfig) -> Result<Box<dyn Append>, LoggerError> {
	// If maximum log size is specified, use rolling file appender
	// or use basic one otherwise
	if let Some(size) = c.log_max_size {
		let roller = FixedWindowRoller::builder()
			.build(&format!("{}.{{}}.gz", c.log_file_path), c.log_max_files)
			.map_err(|e| LoggerError::File(e.to_string()))?;
		let trigger = SizeTrigger::new(size);
		let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

		let appender = RollingFileAppender::builder()
			.append(c.log_file_append)
			.encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
			.build(&c.log_file_path, Box::new(policy))
			.map_err(|e| LoggerError::File(e.to_string()))?;
		Ok(Box::new(appender))
	} else {
		let appender = FileAppender::builder()
			.append(c.log_file_append)
			.encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
			.build(&c.log_file_path)
			.map_err(|e| LoggerError::File(e.to_string()))?;
		Ok(Box::new(appender))
	}
}

/// Initialize the logger with the given configuration. A `None` config
/// leaves logging disabled but still installs the panic hook.
pub fn init_logger(config: Option<LoggingConfig>) -> Result<(), LoggerError> {
	if let Some(c) = config {
		let mut was_init_ref = WAS_INIT.lock();
		if *was_init_ref {
			return Ok(());
		}

		// Save current logging configuration
		*LOGGING_CONFIG.lock() = c.clone();

		let level_stdout = convert_log_level(c.stdout_log_level);
		let level_file = convert_log_level(c.file_log_level);

		// Determine minimum logging level for Root logger
		let level_minimum = if level_stdout > level_file {
			level_stdout
		} else {
			level_file
		};

		let mut root = Root::builder();
		let mut appenders = vec![];

		if c.log_to_stdout {
			let stdout = ConsoleAppender::builder()
				.encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
				.build();
			appenders.push(
				Appender::builder()
					.filter(Box::new(ThresholdFilter::new(level_stdout)))
					.filter(Box::new(CuckooFilter))
					.build("stdout", Box::new(stdout)),
			);
			root = root.appender("stdout");
		}

		if c.log_to_file {
			appenders.push(
				Appender::builder()
					.filter(Box::new(ThresholdFilter::new(level_file)))
					.filter(Box::new(CuckooFilter))
					.build("file", file_appender(&c)?),
			);
			root = root.appender("file");
		}

		let config = Config::builder()
			.appenders(appenders)
			.build(root.build(level_minimum))
			.map_err(|e| LoggerError::Config(e.to_string()))?;

		log4rs::init_config(config).map_err(|e| LoggerError::Config(e.to_string()))?;

		info!(
			"log4rs is initialized, file level: {:?}, stdout level: {:?}, min. level: {:?}",
			level_file, level_stdout, level_minimum
		);

		// Mark logger as initialized
		*was_init_ref = true;
	}

	send_panic_to_log();
	Ok(())
}

/// Initializes the logger for unit and integration tests
pub fn init_test_logger() {
	let mut was_init_ref = WAS_INIT.lock();
	if *was_init_ref {
		return;
	}
	let mut logger = LoggingConfig::default();
	logger.log_to_file = false;
	logger.stdout_log_level = LogLevel::Debug;

	let level_stdout = convert_log_level(logger.stdout_log_level);
	*LOGGING_CONFIG.lock() = logger;

	let stdout = ConsoleAppender::builder()
		.encoder(Box::new(PatternEncoder::default()))
		.build();

	let appender = Appender::builder()
		.filter(Box::new(ThresholdFilter::new(level_stdout)))
		.filter(Box::new(CuckooFilter))
		.build("stdout", Box::new(stdout));

	let config = Config::builder()
		.appender(appender)
		.build(Root::builder().appender("stdout").build(level_stdout));

	// another test binary may have raced us to the global logger, that's fine
	if let Ok(config) = config {
		let _ = log4rs::init_config(config);
	}

	*was_init_ref = true;
}

/// hook to send panics to logs as well as stderr
fn send_panic_to_log() {
	panic::set_hook(Box::new(|info| {
		let backtrace = Backtrace::new();

		let thread = thread::current();
		let thread = thread.name().unwrap_or("unnamed");

		let msg = match info.payload().downcast_ref::<&'static str>() {
			Some(s) => *s,
			None => match info.payload().downcast_ref::<String>() {
				Some(s) => &**s,
				None => "Box<Any>",
			},
		};

		match info.location() {
			Some(location) => {
				error!(
					"\nthread '{}' panicked at '{}': {}:{}{:?}\n\n",
					thread,
					msg,
					location.file(),
					location.line(),
					backtrace
				);
			}
			None => error!("thread '{}' panicked at '{}'{:?}", thread, msg, backtrace),
		}

		let config = LOGGING_CONFIG.lock();
		eprintln!(
			"Thread '{}' panicked with message:\n\"{}\"\nSee {} for further details.",
			thread, msg, config.log_file_path
		);
	}));
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn log_levels_convert() {
		assert_eq!(convert_log_level(LogLevel::Warning), LevelFilter::Warn);
		assert_eq!(convert_log_level(LogLevel::Trace), LevelFilter::Trace);
		assert!(convert_log_level(LogLevel::Error) < convert_log_level(LogLevel::Info));
	}

	#[test]
	fn test_logger_is_idempotent() {
		init_test_logger();
		init_test_logger();
		assert!(*WAS_INIT.lock());
		// already initialised, so the full init is a no-op
		assert!(init_logger(Some(LoggingConfig::default())).is_ok());
	}
}
