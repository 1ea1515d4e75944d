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

//! Implementation of Cuckoo Cycle verification, designed by John Tromp.
//!
//! The graph is bipartite with `2^edge_bits` edges, the endpoints of each
//! edge being derived by siphash from the edge nonce and keys taken from the
//! header digest. A proof is valid if its 42 edges form a single cycle.
//! Only verification lives here, finding cycles is left to miners.

use crate::pow::error::Error;
use crate::pow::siphash::{sipnode, SipHashKeys};
use crate::pow::types::PROOFSIZE;

/// Number of endpoint slots a proof expands to, two per edge.
const SLOTS: usize = 2 * PROOFSIZE;

/// Largest edge size a graph can have while its nodes, edge index shifted
/// left by one plus the side bit, still fit in 32 bits.
pub const MAX_EDGE_BITS: u8 = 31;

/// Outcome of checking a proof against a graph. Anything but `Ok` rejects
/// the proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleCheckResult {
	/// The edges form a single cycle of the required length
	Ok,
	/// An edge nonce is outside the graph
	TooBig,
	/// Edge nonces aren't strictly increasing
	TooSmall,
	/// Endpoints don't pair up, no cycle is possible
	NonMatching,
	/// A node has more than two incident edges
	Branch,
	/// A node has a single incident edge
	DeadEnd,
	/// The edges form a shorter cycle, leaving some out
	ShortCycle,
}

impl CycleCheckResult {
	/// Whether the proof was accepted
	pub fn is_ok(&self) -> bool {
		*self == CycleCheckResult::Ok
	}

	/// Turns any rejection into a proof of work error
	pub fn into_result(self) -> Result<(), Error> {
		match self {
			CycleCheckResult::Ok => Ok(()),
			other => Err(Error::Cycle(other)),
		}
	}
}

/// Index of the slot `step` positions after `i` on the endpoint ring.
fn ring_next(i: usize, step: usize) -> usize {
	(i + step) % SLOTS
}

/// Verifies that the nonces form a 42-cycle in the graph keyed by the digest
/// at the given size. Graphs wider than `MAX_EDGE_BITS` have no valid
/// proof and reject as `TooBig`.
pub fn verify(nonces: &[u32; PROOFSIZE], digest: &[u8; 32], edge_bits: u8) -> CycleCheckResult {
	if edge_bits > MAX_EDGE_BITS {
		return CycleCheckResult::TooBig;
	}
	let edge_mask = (1u32 << edge_bits) - 1;
	let mut seed = [0u8; 16];
	seed.copy_from_slice(&digest[..16]);
	let keys = SipHashKeys::from_seed(&seed);

	let mut uvs = [0u32; SLOTS];
	let mut xor0 = 0u32;
	let mut xor1 = 0u32;
	for (n, nonce) in nonces.iter().enumerate() {
		if *nonce > edge_mask {
			return CycleCheckResult::TooBig;
		}
		if n > 0 && *nonce <= nonces[n - 1] {
			return CycleCheckResult::TooSmall;
		}
		uvs[2 * n] = sipnode(&keys, *nonce, 0, edge_mask);
		uvs[2 * n + 1] = sipnode(&keys, *nonce, 1, edge_mask);
		xor0 ^= uvs[2 * n];
		xor1 ^= uvs[2 * n + 1];
	}
	// each endpoint of a cycle appears an even number of times
	if xor0 | xor1 != 0 {
		return CycleCheckResult::NonMatching;
	}
	follow_cycle(&uvs)
}

/// Walks the cycle starting at slot 0. From an endpoint, the only other slot
/// of the same side holding the same node is where the path continues, and
/// the edge's other endpoint is the next node.
pub(crate) fn follow_cycle(uvs: &[u32; SLOTS]) -> CycleCheckResult {
	let mut n = 0;
	let mut i = 0;
	loop {
		let mut j = i;
		let mut k = ring_next(i, 2);
		while k != i {
			if uvs[k] == uvs[i] {
				if j != i {
					return CycleCheckResult::Branch;
				}
				j = k;
			}
			k = ring_next(k, 2);
		}
		if j == i {
			return CycleCheckResult::DeadEnd;
		}
		i = j ^ 1;
		n += 1;
		if i == 0 {
			break;
		}
	}
	if n == PROOFSIZE {
		CycleCheckResult::Ok
	} else {
		CycleCheckResult::ShortCycle
	}
}

#[cfg(test)]
mod test {
	use super::*;

	/// Lays out cycles of the given lengths, one after the other, the way a
	/// sorted proof would: edge `j` of a cycle shares its u node with its
	/// even neighbour and its v node with its odd one.
	fn cycles(lengths: &[usize]) -> [u32; SLOTS] {
		let mut uvs = [0u32; SLOTS];
		let mut edge = 0;
		for len in lengths {
			let base = edge as u32;
			for j in 0..*len {
				let u_id = (j - j % 2) as u32;
				let v_id = if j % 2 == 1 { j } else { (j + len - 1) % len };
				uvs[2 * edge] = 2 * (base + u_id);
				uvs[2 * edge + 1] = 2 * (base + v_id as u32) + 1;
				edge += 1;
			}
		}
		assert_eq!(edge, PROOFSIZE);
		uvs
	}

	#[test]
	fn single_full_cycle() {
		assert_eq!(follow_cycle(&cycles(&[PROOFSIZE])), CycleCheckResult::Ok);
	}

	#[test]
	fn two_short_cycles() {
		assert_eq!(follow_cycle(&cycles(&[20, 22])), CycleCheckResult::ShortCycle);
	}

	#[test]
	fn branch_and_dead_end() {
		let mut uvs = cycles(&[PROOFSIZE]);
		// a third edge on the u node of edges 0 and 1
		uvs[2 * 4] = uvs[0];
		assert_eq!(follow_cycle(&uvs), CycleCheckResult::Branch);

		let mut uvs = cycles(&[PROOFSIZE]);
		uvs[0] = 1_000_000;
		assert_eq!(follow_cycle(&uvs), CycleCheckResult::DeadEnd);
	}

	#[test]
	fn oversized_graphs_reject() {
		let nonces = [0u32; PROOFSIZE];
		let digest = [0u8; 32];
		assert_eq!(verify(&nonces, &digest, 32), CycleCheckResult::TooBig);
		assert_eq!(verify(&nonces, &digest, 64), CycleCheckResult::TooBig);
		assert_eq!(verify(&nonces, &digest, u8::max_value()), CycleCheckResult::TooBig);
		// widest allowed graph runs the checks, all zero nonces aren't increasing
		assert_eq!(verify(&nonces, &digest, MAX_EDGE_BITS), CycleCheckResult::TooSmall);
	}

	#[test]
	fn ring_wraps() {
		assert_eq!(ring_next(82, 2), 0);
		assert_eq!(ring_next(83, 2), 1);
		assert_eq!(ring_next(10, 2), 12);
	}

	#[test]
	fn rejections_are_errors() {
		assert!(CycleCheckResult::Ok.into_result().is_ok());
		match CycleCheckResult::DeadEnd.into_result() {
			Err(Error::Cycle(CycleCheckResult::DeadEnd)) => {}
			other => panic!("unexpected {:?}", other),
		}
	}
}
