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

//! Configuration file management

use std::fs::{self, File};
use std::io::prelude::*;
use std::path::PathBuf;

use crate::comments::insert_comments;
use crate::core::consensus::ConsensusParams;
use crate::core::global::ChainTypes;
use crate::types::{ConfigError, ConfigMembers, GlobalConfig};
use crate::util::LoggingConfig;

/// The default file name to use when trying to derive
/// the config file location
pub const CONFIG_FILE_NAME: &str = "cuckoo.toml";

/// Current version of the configuration file format
pub const CONFIG_FILE_VERSION: u32 = 1;

/// Returns the defaults, as strewn throughout the code
impl Default for ConfigMembers {
	fn default() -> ConfigMembers {
		ConfigMembers {
			config_file_version: Some(CONFIG_FILE_VERSION),
			chain_type: ChainTypes::default(),
			consensus: None,
			logging: Some(LoggingConfig::default()),
		}
	}
}

impl Default for GlobalConfig {
	fn default() -> GlobalConfig {
		GlobalConfig {
			config_file_path: None,
			members: Some(ConfigMembers::default()),
		}
	}
}

impl GlobalConfig {
	/// Same as GlobalConfig::default() but for the given chain type
	pub fn for_chain(chain_type: &ChainTypes) -> GlobalConfig {
		let mut defaults_conf = GlobalConfig::default();
		if let Some(defaults) = defaults_conf.members.as_mut() {
			defaults.chain_type = *chain_type;
		}
		defaults_conf
	}

	/// Requires the path to a config file
	pub fn new(file_path: &str) -> Result<GlobalConfig, ConfigError> {
		let config_file = PathBuf::from(&file_path);

		// Config file path is given but not valid
		if !config_file.exists() {
			return Err(ConfigError::FileNotFoundError(file_path.to_owned()));
		}

		// Try to parse the config file if it exists, explode if it does exist but
		// something's wrong with it
		let contents = fs::read_to_string(&config_file)?;
		let mut config = GlobalConfig::from_str(&contents)
			.map_err(|e| match e {
				ConfigError::ParseError(_, msg) => ConfigError::ParseError(file_path.to_owned(), msg),
				other => other,
			})?;
		config.config_file_path = Some(config_file);
		debug!("Loaded configuration from {}", file_path);
		Ok(config)
	}

	/// Parses the contents of a configuration file
	pub fn from_str(contents: &str) -> Result<GlobalConfig, ConfigError> {
		let members: ConfigMembers = toml::from_str(contents)
			.map_err(|e| ConfigError::ParseError(String::from("<string>"), format!("{}", e)))?;
		Ok(GlobalConfig {
			config_file_path: None,
			members: Some(members),
		})
	}

	/// Consensus parameters of the configured chain, overrides applied
	pub fn consensus_params(&self) -> Result<ConsensusParams, ConfigError> {
		let members = match &self.members {
			Some(m) => m,
			None => return Ok(ChainTypes::default().params()),
		};
		let base = members.chain_type.params();
		let params = match &members.consensus {
			Some(overrides) if !overrides.is_empty() => {
				info!(
					"Overriding {} consensus parameters: {:?}",
					members.chain_type.shortname(),
					overrides
				);
				overrides.apply(base)
			}
			_ => base,
		};
		params.validate().map_err(ConfigError::InvalidConsensus)?;
		Ok(params)
	}

	/// Logging configuration, if any
	pub fn logging(&self) -> Option<LoggingConfig> {
		self.members.as_ref().and_then(|m| m.logging.clone())
	}

	/// Serialize config
	pub fn ser_config(&self) -> Result<String, ConfigError> {
		let members = match &self.members {
			Some(m) => m,
			None => return Ok(String::new()),
		};
		toml::to_string(members).map_err(|e| ConfigError::SerializationError(format!("{}", e)))
	}

	/// Write configuration to a file
	pub fn write_to_file(&self, name: &str) -> Result<(), ConfigError> {
		let conf_out = self.ser_config()?;
		let conf_out = insert_comments(conf_out);
		let mut file = File::create(name)?;
		file.write_all(conf_out.as_bytes())?;
		Ok(())
	}
}
