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

//! Definition of the target a proof-of-work hash must not exceed, along with
//! the compact 32 bits "nBits" encoding headers carry it in.
//!
//! A compact value is a base 256 floating point number: the high byte is the
//! size in bytes, the low 23 bits are the mantissa and bit 23 is a sign bit.
//! Targets are held as unbounded integers so arithmetic on them never wraps;
//! callers clamp against a ceiling instead.

use std::fmt;

use num::{ToPrimitive, Zero};
use num_bigint::BigUint;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::core::hash::Hash;
use crate::util::{from_hex, ToHex};

/// A 256 bits (at most, once validated) target.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Target(BigUint);

/// Everything decoding a compact value tells us. Only a target decoded
/// without the sign or overflow flags, and non-zero, is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactDecode {
	/// The decoded value, meaningless if either flag is set
	pub target: Target,
	/// The sign bit was set on a non-zero mantissa
	pub negative: bool,
	/// The value does not fit in 256 bits
	pub overflow: bool,
}

impl CompactDecode {
	/// The target if it is positive, fits in 256 bits and isn't zero.
	pub fn valid_target(self) -> Option<Target> {
		if self.negative || self.overflow || self.target.is_zero() {
			None
		} else {
			Some(self.target)
		}
	}
}

impl Target {
	/// The zero target, which no hash can satisfy.
	pub fn zero() -> Target {
		Target(BigUint::zero())
	}

	/// Wraps an arbitrary integer.
	pub fn from_biguint(n: BigUint) -> Target {
		Target(n)
	}

	/// The inner integer.
	pub fn as_biguint(&self) -> &BigUint {
		&self.0
	}

	/// Unwraps the inner integer.
	pub fn into_biguint(self) -> BigUint {
		self.0
	}

	/// Whether the target is zero.
	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	/// Interprets a hash as a little-endian 256 bits integer, the way proof
	/// of work hashes are compared against targets.
	pub fn from_hash(h: &Hash) -> Target {
		Target(BigUint::from_bytes_le(h.as_bytes()))
	}

	/// Decodes a compact value, reporting the sign and overflow flags
	/// alongside the (possibly meaningless) decoded target.
	pub fn from_compact(compact: u32) -> CompactDecode {
		let size = compact >> 24;
		let mut word = compact & 0x007f_ffff;
		let target = if size <= 3 {
			word >>= 8 * (3 - size);
			BigUint::from(word)
		} else {
			BigUint::from(word) << (8 * (size as usize - 3))
		};
		let negative = word != 0 && (compact & 0x0080_0000) != 0;
		let overflow = word != 0
			&& (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
		CompactDecode {
			target: Target(target),
			negative,
			overflow,
		}
	}

	/// Encodes the target in compact form. Precision beyond the 23 bits
	/// mantissa is lost.
	pub fn to_compact(&self) -> u32 {
		let mut size = (self.0.bits() + 7) / 8;
		let mut compact: u32 = if size <= 3 {
			let low = self.0.to_u64().unwrap_or(0);
			(low << (8 * (3 - size))) as u32
		} else {
			let shifted = &self.0 >> (8 * (size - 3));
			shifted.to_u32().unwrap_or(0)
		};
		// the sign bit would be set, shift the mantissa and grow the size
		if compact & 0x0080_0000 != 0 {
			compact >>= 8;
			size += 1;
		}
		compact | ((size as u32) << 24)
	}

	/// Big-endian hex rendering, padded to 64 characters.
	pub fn to_hex(&self) -> String {
		let bytes = self.0.to_bytes_be();
		let mut padded = vec![0u8; 32usize.saturating_sub(bytes.len())];
		padded.extend_from_slice(&bytes);
		padded.to_hex()
	}

	/// Parses a big-endian hex rendering.
	pub fn from_hex(hex: &str) -> Result<Target, String> {
		let bytes = from_hex(hex)?;
		Ok(Target(BigUint::from_bytes_be(&bytes)))
	}
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}

impl fmt::Debug for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Target({:08x})", self.to_compact())
	}
}

impl Serialize for Target {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_hex())
	}
}

impl<'de> Deserialize<'de> for Target {
	fn deserialize<D>(deserializer: D) -> Result<Target, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(TargetVisitor)
	}
}

struct TargetVisitor;

impl<'de> de::Visitor<'de> for TargetVisitor {
	type Value = Target;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a hex encoded target")
	}

	fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Target::from_hex(s).map_err(|_| de::Error::invalid_value(de::Unexpected::Str(s), &self))
	}
}
