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

//! Block headers

use std::io::Read;

use crate::core::hash::{sha256, sha256d, Hash};
use crate::pow::{PowScheme, Proof};
use crate::ser::{self, BinReader, Readable, Reader, SerializationMode, Writeable, Writer};

/// Size of the header preimage the proof of work commits to.
pub const PRE_POW_SIZE: usize = 80;

/// Block header, the classic 80 bytes followed, from the hard fork on, by
/// the cuckoo cycle proving the work.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockHeader {
	/// Version of the block
	pub version: i32,
	/// Hash of the block previous to this in the chain.
	pub prev_hash: Hash,
	/// Merkle root of the block transactions
	pub merkle_root: Hash,
	/// Timestamp at which the block was built.
	pub timestamp: u32,
	/// Compact target the proof of work must satisfy
	pub bits: u32,
	/// Nonce, varied by miners to search for a proof
	pub nonce: u32,
	/// Cuckoo cycle, present if and only if the header uses the cuckoo
	/// format
	pub cuckoo_proof: Option<Proof>,
}

/// Serialization of a block header
impl Writeable for BlockHeader {
	fn write<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		self.write_pre_pow(writer)?;
		if writer.serialization_mode() == SerializationMode::Full {
			if let Some(proof) = &self.cuckoo_proof {
				proof.write(writer)?;
			}
		}
		Ok(())
	}
}

impl BlockHeader {
	/// Write the pre-proof portion of the header
	pub fn write_pre_pow<W: Writer>(&self, writer: &mut W) -> Result<(), ser::Error> {
		ser_multiwrite!(
			writer,
			[write_i32, self.version],
			[write_fixed_bytes, self.prev_hash.as_bytes()],
			[write_fixed_bytes, self.merkle_root.as_bytes()],
			[write_u32, self.timestamp],
			[write_u32, self.bits],
			[write_u32, self.nonce]
		);
		Ok(())
	}

	/// Reads a header, expecting a trailing cuckoo proof if the header is
	/// in the cuckoo format. The format isn't self-describing, the scheme
	/// comes from the height the header is validated at.
	pub fn read_with_scheme<R: Reader>(
		reader: &mut R,
		scheme: PowScheme,
	) -> Result<BlockHeader, ser::Error> {
		let version = reader.read_i32()?;
		let prev_hash = Hash::read(reader)?;
		let merkle_root = Hash::read(reader)?;
		let (timestamp, bits, nonce) = ser_multiread!(reader, read_u32, read_u32, read_u32);
		let cuckoo_proof = match scheme {
			PowScheme::Cuckoo => Some(Proof::read(reader)?),
			PowScheme::Legacy => None,
		};

		Ok(BlockHeader {
			version,
			prev_hash,
			merkle_root,
			timestamp,
			bits,
			nonce,
			cuckoo_proof,
		})
	}

	/// Deserializes a header from any std::io::Read implementation.
	pub fn deserialize<T: Read>(source: &mut T, scheme: PowScheme) -> Result<BlockHeader, ser::Error> {
		let mut reader = BinReader::new(source);
		BlockHeader::read_with_scheme(&mut reader, scheme)
	}

	/// The 80 bytes the proof of work commits to.
	pub fn pre_pow(&self) -> Result<Vec<u8>, ser::Error> {
		let bytes = ser::ser_vec_mode(self, SerializationMode::PrePow)?;
		if bytes.len() != PRE_POW_SIZE {
			return Err(ser::Error::CorruptedData);
		}
		Ok(bytes)
	}

	/// Whether the header is in the cuckoo format.
	pub fn is_cuckoo_pow(&self) -> bool {
		self.cuckoo_proof.is_some()
	}

	/// Block hash, double SHA-256 of the pre-proof portion of the header.
	pub fn hash(&self) -> Result<Hash, ser::Error> {
		Ok(sha256d(&self.pre_pow()?))
	}

	/// Single SHA-256 of the pre-proof portion of the header, the digest
	/// the cuckoo graph is keyed with.
	pub fn cuckoo_digest(&self) -> Result<Hash, ser::Error> {
		Ok(sha256(&self.pre_pow()?))
	}
}
