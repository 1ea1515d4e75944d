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

//! The proof of work needs to strike a balance between fast header
//! verification to avoid DoS attacks and difficulty for block verifiers to
//! build new blocks. Before the hard fork a header proves its work with the
//! double SHA-256 of its 80 bytes, from the hard fork on with a Cuckoo Cycle
//! (see the cuckoo module for more information) whose own hash must then
//! satisfy the target.
//!
//! Only verification is implemented here, mining is out of scope.

pub mod cuckoo;
mod error;
pub mod siphash;
mod types;

pub use self::cuckoo::CycleCheckResult;
pub use self::error::Error;
pub use self::types::*;

use crate::consensus::ConsensusParams;
use crate::core::block::BlockHeader;
use crate::core::hash::Hash;
use crate::core::target::Target;

/// Validates the proof of work of a header validated at the given height,
/// telling why it got rejected if it did.
pub fn verify_proof_of_work(
	header: &BlockHeader,
	height: u64,
	params: &ConsensusParams,
) -> Result<(), Error> {
	let scheme = params.pow_scheme(height);
	let proof = match (scheme, &header.cuckoo_proof) {
		(PowScheme::Cuckoo, Some(proof)) => Some(proof),
		(PowScheme::Cuckoo, None) => return Err(Error::MissingProof),
		(PowScheme::Legacy, Some(_)) => return Err(Error::UnexpectedProof),
		(PowScheme::Legacy, None) => None,
	};

	let target = match Target::from_compact(header.bits).valid_target() {
		Some(t) => t,
		None => return Err(Error::InvalidTarget(header.bits)),
	};
	if &target > params.pow_limit_for(scheme) {
		return Err(Error::TargetAboveLimit(header.bits));
	}

	if let Some(proof) = proof {
		let digest = header.cuckoo_digest()?;
		cuckoo::verify(&proof.nonces, &digest.0, params.edge_bits()).into_result()?;
	}

	if Target::from_hash(&pow_hash(header)?) > target {
		return Err(Error::InsufficientWork);
	}
	Ok(())
}

/// Whether the header carries enough valid work for the given height.
pub fn check_proof_of_work(header: &BlockHeader, height: u64, params: &ConsensusParams) -> bool {
	match verify_proof_of_work(header, height, params) {
		Ok(()) => true,
		Err(e) => {
			debug!(
				"check_proof_of_work: header at {} with bits {:08x} rejected: {}",
				height, header.bits, e
			);
			false
		}
	}
}

/// The hash compared against the target: the proof's hash for cuckoo
/// headers, the header's own hash otherwise.
pub fn pow_hash(header: &BlockHeader) -> Result<Hash, Error> {
	match &header.cuckoo_proof {
		Some(proof) => Ok(proof.hash()),
		None => Ok(header.hash()?),
	}
}
