// Copyright 2023 The Factnet Developers
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

//! Definition of the genesis block.

use chrono::Utc;

use crate::core::hash::{Hash, Hashed};
use crate::core::Block;

/// Genesis block definition: height zero, no facts, complexity zero and the
/// literal "0" as its previous hash. The digest commits to the creation
/// time, so every root node starts a distinct chain.
pub fn genesis() -> Block {
	let mut gen = Block {
		index: 0,
		hash: Hash::none(),
		prev_hash: Hash::zero(),
		timestamp: Utc::now(),
		facts: vec![],
		complexity: 0,
		nonce: String::new(),
	};
	gen.hash = Hashed::hash(&gen);
	gen
}
