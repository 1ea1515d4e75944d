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

//! Read-only view over the chain the retargeting rules need: heights, the
//! compact target and time of each block, and a way to walk back.

use crate::core::block::BlockHeader;

/// Number of blocks the median time past is computed over.
pub const MEDIAN_TIME_SPAN: usize = 11;

/// A block as seen from the chain index. Implementations are expected to be
/// cheap handles, walking back returns new handles.
pub trait BlockIndex: Sized + Clone {
	/// Height of the block, genesis being 0
	fn height(&self) -> u64;
	/// Compact target the block was mined at
	fn bits(&self) -> u32;
	/// Timestamp of the block, in seconds
	fn block_time(&self) -> i64;
	/// The previous block, none for genesis
	fn parent(&self) -> Option<Self>;
	/// The block at the given height on this block's branch, none if the
	/// height is above this block
	fn ancestor(&self, height: u64) -> Option<Self>;

	/// Median of the timestamps of this block and up to 10 of its
	/// predecessors.
	fn median_time_past(&self) -> i64 {
		let mut times = Vec::with_capacity(MEDIAN_TIME_SPAN);
		times.push(self.block_time());
		let mut cursor = self.parent();
		while let Some(b) = cursor {
			if times.len() == MEDIAN_TIME_SPAN {
				break;
			}
			times.push(b.block_time());
			cursor = b.parent();
		}
		times.sort_unstable();
		times[times.len() / 2]
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
	bits: u32,
	time: i64,
}

/// A whole chain held in memory, one entry per height. Handy for tests and
/// for callers that keep their own store and only need a view.
#[derive(Debug, Clone, Default)]
pub struct MemoryChain {
	entries: Vec<Entry>,
}

impl MemoryChain {
	/// An empty chain
	pub fn new() -> MemoryChain {
		MemoryChain { entries: vec![] }
	}

	/// Appends a block on top of the chain, returning its height.
	pub fn push(&mut self, bits: u32, time: i64) -> u64 {
		self.entries.push(Entry { bits, time });
		(self.entries.len() - 1) as u64
	}

	/// Appends a header on top of the chain, returning its height.
	pub fn push_header(&mut self, header: &BlockHeader) -> u64 {
		self.push(header.bits, header.timestamp as i64)
	}

	/// Number of blocks in the chain
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the chain has no block at all
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Handle on the block at the provided height
	pub fn at(&self, height: u64) -> Option<ChainBlock<'_>> {
		if (height as usize) < self.entries.len() {
			Some(ChainBlock {
				chain: self,
				height,
			})
		} else {
			None
		}
	}

	/// Handle on the last block
	pub fn tip(&self) -> Option<ChainBlock<'_>> {
		match self.entries.len() {
			0 => None,
			n => self.at(n as u64 - 1),
		}
	}
}

/// Handle on a block of a `MemoryChain`.
#[derive(Debug, Clone, Copy)]
pub struct ChainBlock<'a> {
	chain: &'a MemoryChain,
	height: u64,
}

impl<'a> ChainBlock<'a> {
	fn entry(&self) -> &Entry {
		&self.chain.entries[self.height as usize]
	}
}

impl<'a> BlockIndex for ChainBlock<'a> {
	fn height(&self) -> u64 {
		self.height
	}

	fn bits(&self) -> u32 {
		self.entry().bits
	}

	fn block_time(&self) -> i64 {
		self.entry().time
	}

	fn parent(&self) -> Option<ChainBlock<'a>> {
		if self.height == 0 {
			None
		} else {
			self.chain.at(self.height - 1)
		}
	}

	fn ancestor(&self, height: u64) -> Option<ChainBlock<'a>> {
		if height > self.height {
			None
		} else {
			self.chain.at(height)
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn chain_with_times(times: &[i64]) -> MemoryChain {
		let mut chain = MemoryChain::new();
		for t in times {
			chain.push(0x207f_ffff, *t);
		}
		chain
	}

	#[test]
	fn walk_back() {
		let chain = chain_with_times(&[10, 20, 30, 40]);
		let tip = chain.tip().unwrap();
		assert_eq!(tip.height(), 3);
		assert_eq!(tip.parent().unwrap().block_time(), 30);
		assert_eq!(tip.ancestor(1).unwrap().block_time(), 20);
		assert!(tip.ancestor(4).is_none());
		assert!(chain.at(0).unwrap().parent().is_none());
		assert!(MemoryChain::new().tip().is_none());
	}

	#[test]
	fn median_time_past_short_and_long() {
		// fewer than 11 blocks, unsorted
		let chain = chain_with_times(&[50, 10, 40]);
		assert_eq!(chain.tip().unwrap().median_time_past(), 40);

		// only the last 11 count
		let times: Vec<i64> = (0..20).map(|i| i * 100).collect();
		let chain = chain_with_times(&times);
		// blocks 9..=19, median is block 14
		assert_eq!(chain.tip().unwrap().median_time_past(), 1400);
	}
}
