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

mod common;

use self::core::global::ChainTypes;
use self::core::pow::cuckoo::{verify, CycleCheckResult};
use self::core::pow::{check_proof_of_work, verify_proof_of_work, Error, Proof};
use crate::common::{cuckoo_header, reference_header, CYCLE_112, CYCLE_117, CYCLE_37, REFERENCE_EDGE_BITS};
use cuckoo_core as core;
use cuckoo_util as util;

fn digest(nonce: u32) -> [u8; 32] {
	reference_header(nonce).cuckoo_digest().unwrap().0
}

#[test]
fn reference_cycles_verify() {
	util::init_test_logger();
	assert_eq!(verify(&CYCLE_37, &digest(37), REFERENCE_EDGE_BITS), CycleCheckResult::Ok);
	assert_eq!(verify(&CYCLE_112, &digest(112), REFERENCE_EDGE_BITS), CycleCheckResult::Ok);
	assert_eq!(verify(&CYCLE_117, &digest(117), REFERENCE_EDGE_BITS), CycleCheckResult::Ok);
	// no hidden state between calls
	assert_eq!(verify(&CYCLE_37, &digest(37), REFERENCE_EDGE_BITS), CycleCheckResult::Ok);
}

#[test]
fn cycle_is_bound_to_its_graph() {
	assert_eq!(
		verify(&CYCLE_37, &digest(38), REFERENCE_EDGE_BITS),
		CycleCheckResult::NonMatching
	);
	assert_eq!(
		verify(&CYCLE_37, &digest(112), REFERENCE_EDGE_BITS),
		CycleCheckResult::NonMatching
	);
	assert_eq!(
		verify(&CYCLE_37, &digest(37), REFERENCE_EDGE_BITS + 1),
		CycleCheckResult::NonMatching
	);
}

#[test]
fn any_single_nonce_change_rejects() {
	let d = digest(37);
	for i in 0..CYCLE_37.len() {
		let mut flipped = CYCLE_37;
		flipped[i] ^= 1;
		assert_ne!(verify(&flipped, &d, REFERENCE_EDGE_BITS), CycleCheckResult::Ok);

		let mut bumped = CYCLE_37;
		bumped[i] += 1;
		assert_ne!(verify(&bumped, &d, REFERENCE_EDGE_BITS), CycleCheckResult::Ok);
	}
}

#[test]
fn ordering_and_range() {
	let d = digest(37);

	let mut swapped = CYCLE_37;
	swapped.swap(0, 1);
	assert_eq!(verify(&swapped, &d, REFERENCE_EDGE_BITS), CycleCheckResult::TooSmall);

	let mut duplicated = CYCLE_37;
	duplicated[5] = duplicated[4];
	assert_eq!(verify(&duplicated, &d, REFERENCE_EDGE_BITS), CycleCheckResult::TooSmall);

	let mut reversed = CYCLE_37;
	reversed.reverse();
	assert_eq!(verify(&reversed, &d, REFERENCE_EDGE_BITS), CycleCheckResult::TooSmall);

	let mut too_big = CYCLE_37;
	too_big[41] = 1 << REFERENCE_EDGE_BITS;
	assert_eq!(verify(&too_big, &d, REFERENCE_EDGE_BITS), CycleCheckResult::TooBig);

	// out of range wins over ordering when it comes first
	let mut first = CYCLE_37;
	first[0] = u32::max_value();
	assert_eq!(verify(&first, &d, REFERENCE_EDGE_BITS), CycleCheckResult::TooBig);
}

#[test]
fn cuckoo_header_around_fork() {
	util::init_test_logger();
	let params = ChainTypes::AutomatedTesting.params();
	let hf = params.cuckoo_hard_fork_height;

	let legacy = reference_header(37);
	let cuckoo = cuckoo_header(37, &CYCLE_37);

	// before the fork, the cuckoo limit doesn't apply and proofs aren't
	// expected
	match verify_proof_of_work(&legacy, hf - 1, &params) {
		Err(Error::TargetAboveLimit(0x207f_ffff)) => {}
		other => panic!("unexpected {:?}", other),
	}
	match verify_proof_of_work(&cuckoo, hf - 1, &params) {
		Err(Error::UnexpectedProof) => {}
		other => panic!("unexpected {:?}", other),
	}

	// from the fork on, a proof is required and checked against the
	// cuckoo limit
	match verify_proof_of_work(&legacy, hf, &params) {
		Err(Error::MissingProof) => {}
		other => panic!("unexpected {:?}", other),
	}
	assert!(verify_proof_of_work(&cuckoo, hf, &params).is_ok());
	assert!(check_proof_of_work(&cuckoo, hf, &params));
	assert!(check_proof_of_work(&cuckoo_header(112, &CYCLE_112), hf + 1, &params));
	assert!(!check_proof_of_work(&legacy, hf, &params));
}

#[test]
fn cuckoo_header_bad_cycle() {
	let params = ChainTypes::AutomatedTesting.params();
	let hf = params.cuckoo_hard_fork_height;

	let wrong_graph = cuckoo_header(38, &CYCLE_37);
	match verify_proof_of_work(&wrong_graph, hf, &params) {
		Err(Error::Cycle(CycleCheckResult::NonMatching)) => {}
		other => panic!("unexpected {:?}", other),
	}

	let mut nonces = CYCLE_37;
	nonces.swap(2, 3);
	let mut header = reference_header(37);
	header.cuckoo_proof = Proof::new(&nonces);
	match verify_proof_of_work(&header, hf, &params) {
		Err(Error::Cycle(CycleCheckResult::TooSmall)) => {}
		other => panic!("unexpected {:?}", other),
	}

	// a graph size mismatch breaks every proof
	let mut params = params;
	params.cuckoo_graph_size += 1;
	assert!(!check_proof_of_work(&cuckoo_header(37, &CYCLE_37), hf, &params));
}

#[test]
fn legacy_header_work() {
	let params = ChainTypes::AutomatedTesting.params();

	let mut header = reference_header(93957);
	header.bits = 0x1f00_ffff;
	assert_eq!(
		header.hash().unwrap().to_hex(),
		"4962fe644550c93d6e0aa5c480692c3749b1f12385e35e7fa63798be0ad70000"
	);
	assert!(verify_proof_of_work(&header, 1, &params).is_ok());

	// same header, other nonce, hash way above the target
	header.nonce = 93958;
	match verify_proof_of_work(&header, 1, &params) {
		Err(Error::InsufficientWork) => {}
		other => panic!("unexpected {:?}", other),
	}

	// regtest has the easy limit for both schemes
	let regtest = ChainTypes::Regtest.params();
	assert!(check_proof_of_work(&reference_header(0), 10, &regtest));
	match verify_proof_of_work(&reference_header(37), 10, &regtest) {
		Err(Error::InsufficientWork) => {}
		other => panic!("unexpected {:?}", other),
	}
}

#[test]
fn invalid_targets() {
	let params = ChainTypes::AutomatedTesting.params();
	for bits in &[0u32, 0x0100_3456, 0x0492_3456, 0xff12_3456] {
		let mut header = reference_header(0);
		header.bits = *bits;
		match verify_proof_of_work(&header, 1, &params) {
			Err(Error::InvalidTarget(b)) => assert_eq!(b, *bits),
			other => panic!("unexpected {:?} for {:08x}", other, bits),
		}
	}
}
