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

//! Proof of work validation errors

use crate::pow::cuckoo::CycleCheckResult;
use crate::ser;

/// Reasons a header's proof of work gets rejected
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The compact target is negative, overflows or is zero
	#[error("Invalid compact target {0:08x}")]
	InvalidTarget(u32),
	/// The target is easier than the scheme's ceiling
	#[error("Target {0:08x} above proof of work limit")]
	TargetAboveLimit(u32),
	/// A cuckoo header without its proof
	#[error("Missing cuckoo proof")]
	MissingProof,
	/// A legacy header carrying a proof
	#[error("Unexpected cuckoo proof before hard fork")]
	UnexpectedProof,
	/// The proof isn't a valid 42-cycle
	#[error("Invalid cycle: {0:?}")]
	Cycle(CycleCheckResult),
	/// The proof of work hash is above the target
	#[error("Insufficient work")]
	InsufficientWork,
	/// Header could not be serialized
	#[error("Serialization error: {0}")]
	Serialization(#[from] ser::Error),
}
