// Copyright 2021 The Grin Developers
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

//! Public types for config modules

use std::io;
use std::path::PathBuf;

use crate::core::consensus::ConsensusParams;
use crate::core::core::Target;
use crate::core::global::ChainTypes;
use crate::util::LoggingConfig;

/// Error type wrapping config errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Error with parsing of config file
	#[error("Error parsing configuration file at {0} - {1}")]
	ParseError(String, String),

	/// Error with fileIO while reading config file
	#[error("{1} {0}")]
	FileIOError(String, String),

	/// No file found
	#[error("Configuration file not found: {0}")]
	FileNotFoundError(String),

	/// Error serializing config values
	#[error("Error serializing configuration: {0}")]
	SerializationError(String),

	/// Overridden consensus parameters don't make sense
	#[error("Invalid consensus parameters: {0}")]
	InvalidConsensus(String),
}

impl From<io::Error> for ConfigError {
	fn from(error: io::Error) -> ConfigError {
		ConfigError::FileIOError(
			String::from(""),
			format!("Error loading config file: {}", error),
		)
	}
}

/// Going to hold all of the various configuration types
/// separately, along with the path of the file they were
/// read from, if any
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
	/// Keep track of the file we've read
	pub config_file_path: Option<PathBuf>,
	/// Global member config
	pub members: Option<ConfigMembers>,
}

/// Keeping an 'inner' structure here, as the top
/// level GlobalConfigContainer options might want to keep
/// internal state that we don't necessarily
/// want serialised or deserialised
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfigMembers {
	/// Config file version (None == version 1)
	pub config_file_version: Option<u32>,
	/// Chain whose consensus parameters are used as a base
	#[serde(default)]
	pub chain_type: ChainTypes,
	/// Consensus parameters replacing the chain's own
	pub consensus: Option<ConsensusOverrides>,
	/// Logging config
	pub logging: Option<LoggingConfig>,
}

/// Any consensus parameter can be overridden, those left out keep the
/// value of the selected chain type.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ConsensusOverrides {
	/// Easiest legacy target, big-endian hex
	pub pow_limit: Option<Target>,
	/// Easiest cuckoo target, big-endian hex
	pub cuckoo_pow_limit: Option<Target>,
	/// Seconds between blocks
	pub pow_target_spacing: Option<i64>,
	/// Seconds per retarget interval
	pub pow_target_timespan: Option<i64>,
	/// First cuckoo height
	pub cuckoo_hard_fork_height: Option<u64>,
	/// Cuckoo graph size in bits
	pub cuckoo_graph_size: Option<u8>,
	/// Allow minimum difficulty blocks
	pub pow_allow_min_difficulty_blocks: Option<bool>,
	/// Disable retargeting
	pub pow_no_retargeting: Option<bool>,
}

impl ConsensusOverrides {
	/// Applies the overrides on top of a base set of parameters.
	pub fn apply(&self, base: ConsensusParams) -> ConsensusParams {
		ConsensusParams {
			pow_limit: self.pow_limit.clone().unwrap_or(base.pow_limit),
			cuckoo_pow_limit: self
				.cuckoo_pow_limit
				.clone()
				.unwrap_or(base.cuckoo_pow_limit),
			pow_target_spacing: self.pow_target_spacing.unwrap_or(base.pow_target_spacing),
			pow_target_timespan: self.pow_target_timespan.unwrap_or(base.pow_target_timespan),
			cuckoo_hard_fork_height: self
				.cuckoo_hard_fork_height
				.unwrap_or(base.cuckoo_hard_fork_height),
			cuckoo_graph_size: self.cuckoo_graph_size.unwrap_or(base.cuckoo_graph_size),
			pow_allow_min_difficulty_blocks: self
				.pow_allow_min_difficulty_blocks
				.unwrap_or(base.pow_allow_min_difficulty_blocks),
			pow_no_retargeting: self.pow_no_retargeting.unwrap_or(base.pow_no_retargeting),
		}
	}

	/// Whether nothing is overridden
	pub fn is_empty(&self) -> bool {
		*self == ConsensusOverrides::default()
	}
}
