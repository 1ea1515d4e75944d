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

/// Implements hex-encoding from bytes to string and decoding of strings
/// to bytes. Given that rustc-serialize is deprecated and serde doesn't
/// provide easy hex encoding, hex is a bit in limbo right now in Rust-
/// land. It's simple enough that we can just have our own.
use std::fmt::Write;

/// Encode the provided bytes into a hex string
fn to_hex(bytes: &[u8]) -> String {
	let mut s = String::with_capacity(bytes.len() * 2);
	for byte in bytes {
		write!(&mut s, "{:02x}", byte).expect("Unable to write hex");
	}
	s
}

/// Convert to hex
pub trait ToHex {
	/// convert to hex
	fn to_hex(&self) -> String;
}

impl<T: AsRef<[u8]>> ToHex for T {
	fn to_hex(&self) -> String {
		to_hex(self.as_ref())
	}
}

/// Decode a hex string into bytes. An optional `0x` prefix is accepted.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, String> {
	let hex = hex.trim();
	let hex = hex.strip_prefix("0x").unwrap_or(hex);
	if hex.len() % 2 == 1 {
		return Err(format!("odd length hex string: {}", hex.len()));
	}
	(0..hex.len())
		.step_by(2)
		.map(|i| {
			hex.get(i..i + 2)
				.and_then(|b| u8::from_str_radix(b, 16).ok())
				.ok_or_else(|| format!("invalid hex at position {}", i))
		})
		.collect()
}
