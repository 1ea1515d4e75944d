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

//! Hash Function
//!
//! Primary hash functions used in the protocol: a single SHA-256 seeds the
//! cuckoo graph, a double SHA-256 is compared against the target.
//!

use std::cmp::min;
use std::{fmt, ops};

use sha2::{Digest, Sha256};

use crate::ser::{self, Readable, Reader, Writeable, Writer};
use crate::util::ToHex;

/// A hash consisting of all zeroes, used as a sentinel. No known preimage.
pub const ZERO_HASH: Hash = Hash([0; 32]);

/// A hash to uniquely (or close enough) identify one of the main blockchain
/// constructs. Used for block headers and as the proof of work value.
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl fmt::Debug for Hash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let hash_hex = self.to_hex();
		const NUM_SHOW: usize = 12;

		write!(f, "{}", &hash_hex[..NUM_SHOW])
	}
}

impl fmt::Display for Hash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}

impl Hash {
	/// Size of a hash in bytes.
	pub const LEN: usize = 32;

	/// Builds a Hash from a byte vector. If the vector is too short, it will be
	/// completed by zeroes. If it's too long, it will be truncated.
	pub fn from_vec(v: &[u8]) -> Hash {
		let mut h = [0; Hash::LEN];
		let copy_size = min(v.len(), Hash::LEN);
		h[..copy_size].copy_from_slice(&v[..copy_size]);
		Hash(h)
	}

	/// Converts the hash to a byte vector
	pub fn to_vec(&self) -> Vec<u8> {
		self.0.to_vec()
	}

	/// Returns a byte slice of the hash contents.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Convert a hash to hex string format.
	pub fn to_hex(&self) -> String {
		self.0.to_hex()
	}

	/// Convert hex string back to hash.
	pub fn from_hex(hex: &str) -> Result<Hash, ser::Error> {
		let bytes = crate::util::from_hex(hex).map_err(|_| ser::Error::CorruptedData)?;
		if bytes.len() != Hash::LEN {
			return Err(ser::Error::CorruptedData);
		}
		Ok(Hash::from_vec(&bytes))
	}
}

impl ops::Index<usize> for Hash {
	type Output = u8;

	fn index(&self, idx: usize) -> &u8 {
		&self.0[idx]
	}
}

impl ops::Index<ops::Range<usize>> for Hash {
	type Output = [u8];

	fn index(&self, idx: ops::Range<usize>) -> &[u8] {
		&self.0[idx]
	}
}

impl AsRef<[u8]> for Hash {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl Readable for Hash {
	fn read<R: Reader>(reader: &mut R) -> Result<Hash, ser::Error> {
		let v = reader.read_fixed_bytes(Hash::LEN)?;
		Ok(Hash::from_vec(&v))
	}
}

impl Writeable for Hash {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		writer.write_fixed_bytes(&self.0)
	}
}

impl Default for Hash {
	fn default() -> Hash {
		ZERO_HASH
	}
}

/// Single SHA-256 of the provided bytes.
pub fn sha256(data: &[u8]) -> Hash {
	Hash::from_vec(&Sha256::digest(data))
}

/// SHA-256 applied twice, the classic proof of work hash.
pub fn sha256d(data: &[u8]) -> Hash {
	sha256(&sha256(data).0)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn sha256_known_values() {
		assert_eq!(
			sha256(b"abc").to_hex(),
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
		);
		assert_eq!(
			sha256d(b"").to_hex(),
			"5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
		);
	}

	#[test]
	fn hex_round_trip() {
		let h = sha256(b"abc");
		assert_eq!(Hash::from_hex(&h.to_hex()).unwrap(), h);
		assert!(Hash::from_hex("abcd").is_err());
		assert_eq!(format!("{:?}", h), "ba7816bf8f01");
	}
}
