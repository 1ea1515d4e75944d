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

//! Comments for configuration + injection into output .toml
use std::collections::HashMap;

/// maps entries to Comments that should precede them
fn comments() -> HashMap<String, String> {
	let mut retval = HashMap::new();
	retval.insert(
		"config_file_version".to_string(),
		"
# Generated Configuration File for the cuckoo proof of work validator
#
# Selects the chain whose consensus rules headers are validated against,
# optionally overrides some of its parameters, and sets up logging.
#
"
		.to_string(),
	);

	retval.insert(
		"chain_type".to_string(),
		"
#The chain type, which defines the consensus parameters used. Can be:
#AutomatedTesting - For CI builds, tiny graphs and fast retargets
#Regtest - For local regression testing, no retargeting
#Testnet - Public test chain, minimum difficulty blocks allowed
#Mainnet - Production
"
		.to_string(),
	);

	retval.insert(
		"[consensus]".to_string(),
		"
#########################################
### CONSENSUS OVERRIDES               ###
#########################################
#any parameter left out keeps the chain type's value
"
		.to_string(),
	);

	retval.insert(
		"pow_limit".to_string(),
		"
#easiest target before the hard fork, as big-endian hex
"
		.to_string(),
	);

	retval.insert(
		"cuckoo_pow_limit".to_string(),
		"
#easiest target from the hard fork on, as big-endian hex
"
		.to_string(),
	);

	retval.insert(
		"cuckoo_hard_fork_height".to_string(),
		"
#first height whose blocks carry a cuckoo cycle
"
		.to_string(),
	);

	retval.insert(
		"cuckoo_graph_size".to_string(),
		"
#cuckoo graph size in bits, proofs are verified at one bit less
"
		.to_string(),
	);

	retval.insert(
		"[logging]".to_string(),
		"
#########################################
### LOGGING CONFIGURATION             ###
#########################################
"
		.to_string(),
	);

	retval.insert(
		"log_to_stdout".to_string(),
		"
#whether to log to stdout
"
		.to_string(),
	);

	retval.insert(
		"stdout_log_level".to_string(),
		"
#log level for stdout: Error, Warning, Info, Debug, Trace
"
		.to_string(),
	);

	retval.insert(
		"log_to_file".to_string(),
		"
#whether to log to a file
"
		.to_string(),
	);

	retval.insert(
		"file_log_level".to_string(),
		"
#log level for file: Error, Warning, Info, Debug, Trace
"
		.to_string(),
	);

	retval.insert(
		"log_file_path".to_string(),
		"
#log file path
"
		.to_string(),
	);

	retval.insert(
		"log_file_append".to_string(),
		"
#whether to append to the log file (true), or replace it on every run (false)
"
		.to_string(),
	);

	retval.insert(
		"log_max_size".to_string(),
		"
#maximum log file size in bytes before performing log rotation
#comment it to disable log rotation
"
		.to_string(),
	);

	retval
}

fn get_key(line: &str) -> String {
	if line.contains('[') && line.contains(']') {
		line.to_owned()
	} else if line.contains('=') {
		line.split('=').collect::<Vec<&str>>()[0].trim().to_owned()
	} else {
		"NOT_FOUND".to_owned()
	}
}

/// Inserts the comment matching each key right before it
pub fn insert_comments(orig: String) -> String {
	let comments = comments();
	let lines: Vec<&str> = orig.split('\n').collect();
	let mut out_lines = vec![];
	for l in lines {
		let key = get_key(l);
		if let Some(v) = comments.get(&key) {
			out_lines.push(v.to_owned());
		}
		out_lines.push(l.to_owned());
		out_lines.push("\n".to_owned());
	}
	let mut ret_val = String::from("");
	for l in out_lines {
		ret_val.push_str(&l);
	}
	ret_val
}
