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

//! Parameter sets of the networks we know about. Unlike the consensus rules
//! themselves these are just values, picked once by whoever builds a node or
//! a test and then handed around as a `ConsensusParams`.

use crate::consensus::ConsensusParams;
use crate::core::target::Target;

/// Easiest legacy target on the main chain
pub const MAINNET_POW_LIMIT: u32 = 0x1d00_ffff;

/// Easiest cuckoo target on the main chain
pub const MAINNET_CUCKOO_POW_LIMIT: u32 = 0x1f00_ffff;

/// Height of the switch to cuckoo cycle on the main chain
pub const MAINNET_CUCKOO_HARD_FORK_HEIGHT: u64 = 520_128;

/// Height of the switch to cuckoo cycle on the test chain
pub const TESTNET_CUCKOO_HARD_FORK_HEIGHT: u64 = 100_000;

/// Cuckoo graph size on public chains
pub const DEFAULT_CUCKOO_GRAPH_SIZE: u8 = 24;

/// Ten minutes between blocks
pub const DEFAULT_TARGET_SPACING: i64 = 10 * 60;

/// Two weeks per retarget interval
pub const DEFAULT_TARGET_TIMESPAN: i64 = 14 * 24 * 60 * 60;

/// Easiest target of the regression test chain, for both schemes
pub const REGTEST_POW_LIMIT: u32 = 0x207f_ffff;

/// Height of the switch to cuckoo cycle on the regression test chain
pub const REGTEST_CUCKOO_HARD_FORK_HEIGHT: u64 = 150;

/// Automated testing cuckoo graph size, small enough to mine in tests
pub const AUTOMATED_TESTING_CUCKOO_GRAPH_SIZE: u8 = 16;

/// Automated testing block spacing
pub const AUTOMATED_TESTING_TARGET_SPACING: i64 = 60;

/// Automated testing retarget timespan, 10 blocks
pub const AUTOMATED_TESTING_TARGET_TIMESPAN: i64 = 600;

/// Automated testing hard fork height
pub const AUTOMATED_TESTING_CUCKOO_HARD_FORK_HEIGHT: u64 = 100;

/// Types of chain a node can run on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChainTypes {
	/// For CI testing
	AutomatedTesting,
	/// For local regression tests, no retargeting
	Regtest,
	/// Public test chain, minimum difficulty blocks allowed
	Testnet,
	/// Main production chain
	Mainnet,
}

impl ChainTypes {
	/// Short name representing the chain type ("test", "main", etc.)
	pub fn shortname(&self) -> String {
		match *self {
			ChainTypes::AutomatedTesting => "auto".to_owned(),
			ChainTypes::Regtest => "regtest".to_owned(),
			ChainTypes::Testnet => "test".to_owned(),
			ChainTypes::Mainnet => "main".to_owned(),
		}
	}

	/// Consensus parameters of the chain
	pub fn params(&self) -> ConsensusParams {
		match *self {
			ChainTypes::Mainnet => ConsensusParams {
				pow_limit: compact(MAINNET_POW_LIMIT),
				cuckoo_pow_limit: compact(MAINNET_CUCKOO_POW_LIMIT),
				pow_target_spacing: DEFAULT_TARGET_SPACING,
				pow_target_timespan: DEFAULT_TARGET_TIMESPAN,
				cuckoo_hard_fork_height: MAINNET_CUCKOO_HARD_FORK_HEIGHT,
				cuckoo_graph_size: DEFAULT_CUCKOO_GRAPH_SIZE,
				pow_allow_min_difficulty_blocks: false,
				pow_no_retargeting: false,
			},
			ChainTypes::Testnet => ConsensusParams {
				cuckoo_hard_fork_height: TESTNET_CUCKOO_HARD_FORK_HEIGHT,
				pow_allow_min_difficulty_blocks: true,
				..ChainTypes::Mainnet.params()
			},
			ChainTypes::Regtest => ConsensusParams {
				pow_limit: compact(REGTEST_POW_LIMIT),
				cuckoo_pow_limit: compact(REGTEST_POW_LIMIT),
				pow_target_spacing: DEFAULT_TARGET_SPACING,
				pow_target_timespan: DEFAULT_TARGET_TIMESPAN,
				cuckoo_hard_fork_height: REGTEST_CUCKOO_HARD_FORK_HEIGHT,
				cuckoo_graph_size: AUTOMATED_TESTING_CUCKOO_GRAPH_SIZE,
				pow_allow_min_difficulty_blocks: true,
				pow_no_retargeting: true,
			},
			ChainTypes::AutomatedTesting => ConsensusParams {
				pow_limit: compact(MAINNET_CUCKOO_POW_LIMIT),
				cuckoo_pow_limit: compact(REGTEST_POW_LIMIT),
				pow_target_spacing: AUTOMATED_TESTING_TARGET_SPACING,
				pow_target_timespan: AUTOMATED_TESTING_TARGET_TIMESPAN,
				cuckoo_hard_fork_height: AUTOMATED_TESTING_CUCKOO_HARD_FORK_HEIGHT,
				cuckoo_graph_size: AUTOMATED_TESTING_CUCKOO_GRAPH_SIZE,
				pow_allow_min_difficulty_blocks: false,
				pow_no_retargeting: false,
			},
		}
	}
}

impl Default for ChainTypes {
	fn default() -> ChainTypes {
		ChainTypes::Mainnet
	}
}

fn compact(bits: u32) -> Target {
	Target::from_compact(bits).target
}
