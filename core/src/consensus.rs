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

//! All the rules required for a cryptocurrency to have reach consensus across
//! the whole network are complex and hard to completely isolate. Some can be
//! simple parameters (like the block interval), others complex algorithms
//! (like the difficulty retargeting). However, as long as they're simple
//! enough, consensus-relevant constants and short functions should be kept
//! here.
//!
//! Parameters are never global, every rule takes the `ConsensusParams` of the
//! chain it runs for so several networks can be validated side by side.

use std::cmp::{max, min};

use num_bigint::BigUint;

use crate::core::chain::BlockIndex;
use crate::core::target::Target;
use crate::pow::cuckoo::MAX_EDGE_BITS;
use crate::pow::PowScheme;

/// Number of blocks looked back at by the emergency retarget.
pub const EMERGENCY_WINDOW: u64 = 6;

/// How many times slower than expected the last `EMERGENCY_WINDOW` blocks
/// must have been for the emergency retarget to kick in.
pub const EMERGENCY_SLOWDOWN: i64 = 6;

/// Consensus parameters of a chain. Immutable once built, passed by
/// reference to every rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusParams {
	/// Easiest target allowed before the hard fork
	pub pow_limit: Target,
	/// Easiest target allowed from the hard fork on
	pub cuckoo_pow_limit: Target,
	/// Expected time between blocks, in seconds
	pub pow_target_spacing: i64,
	/// Expected time for a full retarget interval, in seconds
	pub pow_target_timespan: i64,
	/// First height carrying a cuckoo proof of work
	pub cuckoo_hard_fork_height: u64,
	/// Cuckoo graph size in bits, verification runs one bit below it
	pub cuckoo_graph_size: u8,
	/// Allow minimum difficulty blocks after a long enough gap (testnets)
	pub pow_allow_min_difficulty_blocks: bool,
	/// Never retarget (regression test chains)
	pub pow_no_retargeting: bool,
}

impl ConsensusParams {
	/// Number of blocks between two full retargets. Only meaningful on
	/// parameters that passed `validate`, panics on a zero spacing.
	pub fn difficulty_adjustment_interval(&self) -> u64 {
		(self.pow_target_timespan / self.pow_target_spacing) as u64
	}

	/// Number of bits of the edge indices in the cuckoo graph
	pub fn edge_bits(&self) -> u8 {
		self.cuckoo_graph_size.saturating_sub(1)
	}

	/// Proof of work a block at the given height must carry.
	pub fn pow_scheme(&self, height: u64) -> PowScheme {
		if height >= self.cuckoo_hard_fork_height {
			PowScheme::Cuckoo
		} else {
			PowScheme::Legacy
		}
	}

	/// Easiest target allowed for a proof of work scheme.
	pub fn pow_limit_for(&self, scheme: PowScheme) -> &Target {
		match scheme {
			PowScheme::Legacy => &self.pow_limit,
			PowScheme::Cuckoo => &self.cuckoo_pow_limit,
		}
	}

	/// Easiest target allowed for a block at the given height.
	pub fn pow_limit(&self, height: u64) -> &Target {
		self.pow_limit_for(self.pow_scheme(height))
	}

	/// Sanity checks a set of parameters, typically after loading overrides
	/// from configuration.
	pub fn validate(&self) -> Result<(), String> {
		if self.pow_target_spacing <= 0 {
			return Err("pow_target_spacing must be positive".to_owned());
		}
		if self.pow_target_timespan < self.pow_target_spacing {
			return Err("pow_target_timespan must cover at least one block".to_owned());
		}
		let max_graph_size = MAX_EDGE_BITS + 1;
		if self.cuckoo_graph_size < 2 || self.cuckoo_graph_size > max_graph_size {
			return Err(format!(
				"cuckoo_graph_size {} outside of [2, {}]",
				self.cuckoo_graph_size, max_graph_size
			));
		}
		for (name, limit) in &[
			("pow_limit", &self.pow_limit),
			("cuckoo_pow_limit", &self.cuckoo_pow_limit),
		] {
			if limit.is_zero() || limit.as_biguint().bits() > 256 {
				return Err(format!("{} must be a non-zero 256 bits value", name));
			}
		}
		Ok(())
	}
}

fn target_of(bits: u32) -> BigUint {
	Target::from_compact(bits).target.into_biguint()
}

fn ancestor_of<B: BlockIndex>(block: &B, height: u64) -> B {
	match block.ancestor(height) {
		Some(b) => b,
		None => panic!(
			"no ancestor at height {} of block {}, chain too short for retargeting",
			height,
			block.height()
		),
	}
}

/// Computes the compact target the block following `tip` must be mined at.
/// `candidate_time` is the timestamp of that block, only looked at when
/// minimum difficulty blocks are allowed.
///
/// Panics if the chain is too short for the ancestors the rules need, which
/// callers must guarantee. Parameters must have passed
/// `ConsensusParams::validate`, a zero spacing or a timespan shorter than
/// one block leaves no retarget interval and panics as well.
pub fn next_work_required<B: BlockIndex>(
	tip: &B,
	candidate_time: i64,
	params: &ConsensusParams,
) -> u32 {
	debug_assert!(
		params.validate().is_ok(),
		"next_work_required called with invalid consensus params"
	);
	let height = tip.height() + 1;
	let limit = params.pow_limit(height);
	let limit_bits = limit.to_compact();

	// one time reset to the cuckoo limit at the switch of scheme
	if height == params.cuckoo_hard_fork_height {
		info!(
			"next_work_required: cuckoo hard fork at {}, resetting to {:08x}",
			height, limit_bits
		);
		return limit_bits;
	}

	if params.pow_no_retargeting {
		return tip.bits();
	}

	let interval = params.difficulty_adjustment_interval();
	if height % interval != 0 {
		if params.pow_allow_min_difficulty_blocks {
			// a block more than twice the spacing after the tip can be
			// mined at minimum difficulty
			if candidate_time > tip.block_time() + params.pow_target_spacing * 2 {
				return limit_bits;
			}
			// otherwise back to the last block not using that escape
			let mut block = tip.clone();
			while block.height() % interval != 0 && block.bits() == limit_bits {
				match block.parent() {
					Some(parent) => block = parent,
					None => break,
				}
			}
			return block.bits();
		}

		if height > params.cuckoo_hard_fork_height && tip.bits() != limit_bits {
			if let Some(bits) = emergency_retarget(tip, height, limit, params) {
				return bits;
			}
		}
		return tip.bits();
	}

	// go back by what we want to be a full interval worth of blocks
	let first_height = match tip.height().checked_sub(interval - 1) {
		Some(h) => h,
		None => panic!(
			"retarget at {} needs {} blocks of history",
			height, interval
		),
	};
	let first = ancestor_of(tip, first_height);
	calculate_next_work_required(tip, first.block_time(), params)
}

/// Checks whether the last `EMERGENCY_WINDOW` blocks were so slow the target
/// should move halfway back to the last easier one, returning the new
/// compact target if so.
fn emergency_retarget<B: BlockIndex>(
	tip: &B,
	height: u64,
	limit: &Target,
	params: &ConsensusParams,
) -> Option<u32> {
	let anc_height = match (height - 1).checked_sub(EMERGENCY_WINDOW) {
		Some(h) => h,
		None => panic!(
			"emergency retarget at {} needs {} blocks of history",
			height, EMERGENCY_WINDOW
		),
	};
	let anc = ancestor_of(tip, anc_height);
	let time_past = tip.median_time_past() - anc.median_time_past();
	let threshold = params.pow_target_spacing * EMERGENCY_SLOWDOWN * EMERGENCY_WINDOW as i64;
	if tip.bits() != anc.bits() || time_past <= threshold {
		return None;
	}

	let current = target_of(tip.bits());
	let mut block = anc;
	let mut prev = target_of(block.bits());
	while prev <= current {
		block = match block.parent() {
			Some(parent) => parent,
			None => panic!(
				"emergency retarget at {}: no block easier than {:08x}",
				height,
				tip.bits()
			),
		};
		prev = target_of(block.bits());
	}

	let halfway = min((current + prev) / BigUint::from(2u32), limit.as_biguint().clone());
	let bits = Target::from_biguint(halfway).to_compact();
	warn!(
		"next_work_required: emergency retarget at {}, {} seconds over the last {} blocks, {:08x} -> {:08x}",
		height, time_past, EMERGENCY_WINDOW, tip.bits(), bits
	);
	Some(bits)
}

/// Retargets `tip`'s difficulty so that the interval that started at
/// `first_block_time` would have taken the expected timespan. A single
/// retarget moves the target by at most a factor of 4 either way and never
/// past the limit.
pub fn calculate_next_work_required<B: BlockIndex>(
	tip: &B,
	first_block_time: i64,
	params: &ConsensusParams,
) -> u32 {
	if params.pow_no_retargeting {
		return tip.bits();
	}

	let timespan = params.pow_target_timespan;
	let actual = tip.block_time() - first_block_time;
	let clamped = min(max(actual, timespan / 4), timespan * 4);

	let limit = params.pow_limit(tip.height() + 1).as_biguint();
	let old = target_of(tip.bits());
	let new = old * BigUint::from(clamped as u64) / BigUint::from(timespan as u64);
	let new = min(new, limit.clone());
	let bits = Target::from_biguint(new).to_compact();

	debug!(
		"calculate_next_work_required: at {}, actual timespan {} (clamped {}), {:08x} -> {:08x}",
		tip.height() + 1,
		actual,
		clamped,
		tip.bits(),
		bits
	);
	bits
}
