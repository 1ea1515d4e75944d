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

use cuckoo_config as config;
use cuckoo_core::core::Target;
use cuckoo_core::global::ChainTypes;
use pretty_assertions::assert_eq;

use self::config::{ConfigError, ConsensusOverrides, GlobalConfig};
use std::env;
use std::fs;

#[test]
fn default_config_round_trip() {
	let default_config = GlobalConfig::default();
	let toml = default_config.ser_config().unwrap();
	assert!(toml.contains("chain_type = \"Mainnet\""));

	let parsed = GlobalConfig::from_str(&toml).unwrap();
	assert_eq!(default_config.members, parsed.members);
	assert_eq!(
		parsed.consensus_params().unwrap(),
		ChainTypes::Mainnet.params()
	);
}

#[test]
fn file_config_equal_to_defaults() {
	let mut path = env::temp_dir();
	path.push(format!("cuckoo-config-test-{}.toml", std::process::id()));
	let path = path.to_str().unwrap().to_owned();

	let global_config_without_file = GlobalConfig::for_chain(&ChainTypes::Testnet);
	global_config_without_file.write_to_file(&path).unwrap();

	// comments made it into the file and don't get in the way
	let contents = fs::read_to_string(&path).unwrap();
	assert!(contents.contains("#The chain type"));

	let global_config_with_file = GlobalConfig::new(&path).unwrap_or_else(|e| {
		panic!("Error parsing config file: {}", e);
	});
	fs::remove_file(&path).unwrap();

	assert_eq!(
		global_config_without_file.members,
		global_config_with_file.members
	);
	assert!(global_config_with_file.config_file_path.is_some());
}

#[test]
fn overrides_applied() {
	let toml = r#"
chain_type = "AutomatedTesting"

[consensus]
cuckoo_hard_fork_height = 42
cuckoo_graph_size = 20
pow_limit = "00000000ffff0000000000000000000000000000000000000000000000000000"
"#;
	let config = GlobalConfig::from_str(toml).unwrap();
	let params = config.consensus_params().unwrap();
	let base = ChainTypes::AutomatedTesting.params();

	assert_eq!(params.cuckoo_hard_fork_height, 42);
	assert_eq!(params.edge_bits(), 19);
	assert_eq!(params.pow_limit.to_compact(), 0x1d00_ffff);
	// untouched
	assert_eq!(params.cuckoo_pow_limit, base.cuckoo_pow_limit);
	assert_eq!(params.pow_target_spacing, base.pow_target_spacing);
	assert!(config.logging().is_none());
}

#[test]
fn overrides_round_trip() {
	let mut config = GlobalConfig::for_chain(&ChainTypes::Regtest);
	if let Some(members) = config.members.as_mut() {
		members.consensus = Some(ConsensusOverrides {
			cuckoo_pow_limit: Some(Target::from_compact(0x1f00_ffff).target),
			pow_no_retargeting: Some(false),
			..Default::default()
		});
	}
	let parsed = GlobalConfig::from_str(&config.ser_config().unwrap()).unwrap();
	assert_eq!(config.members, parsed.members);

	let params = parsed.consensus_params().unwrap();
	assert_eq!(params.cuckoo_pow_limit.to_compact(), 0x1f00_ffff);
	assert!(!params.pow_no_retargeting);
	assert!(params.pow_allow_min_difficulty_blocks);
}

#[test]
fn bad_configs() {
	match GlobalConfig::new("/nonexistent/cuckoo.toml") {
		Err(ConfigError::FileNotFoundError(_)) => {}
		other => panic!("unexpected {:?}", other),
	}
	match GlobalConfig::from_str("chain_type = \"Nonsense\"") {
		Err(ConfigError::ParseError(_, _)) => {}
		other => panic!("unexpected {:?}", other),
	}
	let config = GlobalConfig::from_str("[consensus]\npow_target_spacing = 0\n").unwrap();
	match config.consensus_params() {
		Err(ConfigError::InvalidConsensus(_)) => {}
		other => panic!("unexpected {:?}", other),
	}
}
