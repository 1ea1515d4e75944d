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

//! Core types

pub mod block;
pub mod chain;
pub mod hash;
pub mod target;

pub use self::block::*;
pub use self::chain::{BlockIndex, ChainBlock, MemoryChain};
pub use self::hash::{sha256, sha256d, Hash, ZERO_HASH};
pub use self::target::{CompactDecode, Target};
