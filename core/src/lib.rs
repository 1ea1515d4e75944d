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

//! Consensus core for a chain secured by a Cuckoo Cycle proof of work that
//! replaced a classic double-SHA256 proof of work at a hard fork height.
//! Holds the header format, the 256-bit target arithmetic, the cycle
//! verifier and the difficulty retargeting rules.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
use cuckoo_util as util;

#[macro_use]
pub mod macros;

pub mod consensus;
pub mod core;
pub mod global;
pub mod pow;
pub mod ser;
