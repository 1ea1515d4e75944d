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

//! Common test functions

use cuckoo_core::core::{BlockHeader, Hash, MemoryChain};
use cuckoo_core::pow::{Proof, PROOFSIZE};

/// Edge bits the reference cycles were found at
#[allow(dead_code)]
pub const REFERENCE_EDGE_BITS: u8 = 15;

/// A 42-cycle in the graph of `reference_header(37)`
#[allow(dead_code)]
pub const CYCLE_37: [u32; PROOFSIZE] = [
	408, 1723, 3537, 4574, 5273, 6871, 7106, 8022, 8315, 10024, 10498, 12144, 12751, 12958, 13646,
	13671, 14267, 15799, 15921, 16004, 16721, 17615, 18332, 18491, 19033, 19291, 19671, 19744,
	20199, 20633, 21074, 21737, 21914, 22506, 22548, 23415, 26813, 27048, 29319, 29321, 29402,
	31951,
];

/// A 42-cycle in the graph of `reference_header(112)`
#[allow(dead_code)]
pub const CYCLE_112: [u32; PROOFSIZE] = [
	132, 530, 2528, 3330, 3710, 4135, 5015, 5351, 6892, 7242, 7918, 9529, 9738, 9925, 9993, 11176,
	11349, 11541, 11643, 13477, 13672, 13931, 15794, 17071, 17470, 19561, 20003, 20408, 21632,
	22388, 23117, 23477, 23731, 25790, 26364, 26619, 26862, 26966, 29963, 30764, 31974, 32545,
];

/// A 42-cycle in the graph of `reference_header(117)`
#[allow(dead_code)]
pub const CYCLE_117: [u32; PROOFSIZE] = [
	141, 1390, 1540, 1804, 2808, 3767, 4642, 6531, 6637, 6939, 8845, 9443, 9709, 10394, 10451,
	10706, 10712, 11513, 11896, 13607, 14390, 14682, 16029, 18208, 18524, 18693, 20934, 21003,
	21331, 21601, 22316, 23293, 23645, 23704, 25950, 28275, 28957, 30618, 30907, 30935, 31681,
	31809,
];

// header every reference vector was built from, only the nonce varies
#[allow(dead_code)]
pub fn reference_header(nonce: u32) -> BlockHeader {
	let mut merkle = [0u8; 32];
	for (i, b) in merkle.iter_mut().enumerate() {
		*b = i as u8;
	}
	BlockHeader {
		version: 0x2000_0000,
		prev_hash: Hash([0; 32]),
		merkle_root: Hash(merkle),
		timestamp: 1_600_000_000,
		bits: 0x207f_ffff,
		nonce,
		cuckoo_proof: None,
	}
}

// reference header with its cycle attached
#[allow(dead_code)]
pub fn cuckoo_header(nonce: u32, cycle: &[u32; PROOFSIZE]) -> BlockHeader {
	let mut header = reference_header(nonce);
	header.cuckoo_proof = Some(Proof { nonces: *cycle });
	header
}

// utility building a chain of `count` blocks at the same bits, `spacing`
// seconds apart
#[allow(dead_code)]
pub fn uniform_chain(count: u64, bits: u32, spacing: i64) -> MemoryChain {
	let mut chain = MemoryChain::new();
	for i in 0..count {
		chain.push(bits, i as i64 * spacing);
	}
	chain
}
