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

//! Types for a Cuckoo proof of work and its encapsulation as a fully usable
//! proof of work within a block header.

use std::fmt;

use crate::core::hash::{sha256d, Hash};
use crate::ser::{self, u32s_to_le_bytes, Readable, Reader, Writeable, Writer};

/// Number of edges in a valid cycle, and so of nonces in a proof.
pub const PROOFSIZE: usize = 42;

/// Which proof of work a block at a given height must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowScheme {
	/// Double SHA-256 of the header, before the hard fork
	Legacy,
	/// Cuckoo Cycle, from the hard fork height on
	Cuckoo,
}

/// A Cuckoo Cycle proof of work, consisting of the nonces of the edges
/// forming the cycle, sorted ascending.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Proof {
	/// The nonces
	pub nonces: [u32; PROOFSIZE],
}

impl fmt::Debug for Proof {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Cuckoo(")?;
		for (i, val) in self.nonces[..].iter().enumerate() {
			write!(f, "{:x}", val)?;
			if i < self.nonces.len() - 1 {
				write!(f, " ")?;
			}
		}
		write!(f, ")")
	}
}

impl Proof {
	/// Builds a proof from exactly `PROOFSIZE` nonces, none otherwise.
	/// Nonces are taken as given, ordering is checked by the verifier.
	pub fn new(nonces: &[u32]) -> Option<Proof> {
		if nonces.len() != PROOFSIZE {
			return None;
		}
		let mut arr = [0u32; PROOFSIZE];
		arr.copy_from_slice(nonces);
		Some(Proof { nonces: arr })
	}

	/// Builds a proof with all nonces zeroed out
	pub fn zero() -> Proof {
		Proof {
			nonces: [0; PROOFSIZE],
		}
	}

	/// The 168 bytes the proof is hashed and serialized as.
	pub fn to_bytes(&self) -> Vec<u8> {
		u32s_to_le_bytes(&self.nonces)
	}

	/// Hash of the proof, compared against the target once the cycle has
	/// been verified.
	pub fn hash(&self) -> Hash {
		sha256d(&self.to_bytes())
	}
}

impl Readable for Proof {
	fn read<R: Reader>(reader: &mut R) -> Result<Proof, ser::Error> {
		let mut nonces = [0u32; PROOFSIZE];
		for n in nonces.iter_mut() {
			*n = reader.read_u32()?;
		}
		Ok(Proof { nonces })
	}
}

impl Writeable for Proof {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		for n in self.nonces.iter() {
			writer.write_u32(*n)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::ser::{deserialize, ser_vec};

	#[test]
	fn proof_wire_size() {
		let mut nonces = [0u32; PROOFSIZE];
		for (i, n) in nonces.iter_mut().enumerate() {
			*n = i as u32 * 3;
		}
		let proof = Proof { nonces };
		let vec = ser_vec(&proof).unwrap();
		assert_eq!(vec.len(), PROOFSIZE * 4);
		assert_eq!(vec, proof.to_bytes());
		assert_eq!(&vec[4..8], &[3, 0, 0, 0]);

		let back: Proof = deserialize(&mut &vec[..]).unwrap();
		assert_eq!(back, proof);

		// one byte short
		let res: Result<Proof, ser::Error> = deserialize(&mut &vec[..vec.len() - 1]);
		assert!(res.is_err());
	}

	#[test]
	fn proof_needs_exact_length() {
		assert!(Proof::new(&[1, 2, 3]).is_none());
		assert!(Proof::new(&[0; PROOFSIZE + 1]).is_none());
		assert_eq!(Proof::new(&[0; PROOFSIZE]).unwrap(), Proof::zero());
	}
}
