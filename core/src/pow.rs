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

//! The client-driven proof of work. Workers POST candidate nonces; the
//! predicate ties a nonce to the current chain tip only, so a node may
//! apply an accepted nonce to its own block body.

use crate::consensus::MAX_COMPLEXITY;
use crate::core::hash::Hash;

/// Whether the hash of `prev_hash + nonce` starts with `complexity` zero
/// hex characters. Complexity zero is vacuously satisfied by any nonce.
pub fn verify(prev_hash: &Hash, nonce: &str, complexity: u32) -> bool {
	let required = complexity.min(MAX_COMPLEXITY) as usize;
	let digest = Hash::from_data(format!("{}{}", prev_hash, nonce).as_bytes());
	digest.as_str().bytes().take(required).all(|c| c == b'0')
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn zero_complexity_accepts_anything() {
		assert!(verify(&Hash::zero(), "", 0));
		assert!(verify(&Hash::zero(), "any nonce at all", 0));
	}

	#[test]
	fn positive_complexity_filters() {
		let prev = Hash::from("a3b2");
		// Brute-force a nonce for complexity 1, then check it is rejected
		// one level up unless it happens to carry a second zero.
		let nonce = (0..)
			.map(|n: u32| n.to_string())
			.find(|n| verify(&prev, n, 1))
			.unwrap();
		assert!(verify(&prev, &nonce, 0));
		assert!(verify(&prev, &nonce, 1));
		let digest = Hash::from_data(format!("{}{}", prev, nonce).as_bytes());
		let second_zero = digest.as_str().as_bytes()[1] == b'0';
		assert_eq!(verify(&prev, &nonce, 2), second_zero);
	}

	#[test]
	fn complexity_is_clamped_to_digest_width() {
		// Equivalent to asking for 64 zeros; no digest has more characters.
		assert_eq!(
			verify(&Hash::zero(), "x", MAX_COMPLEXITY + 10),
			verify(&Hash::zero(), "x", MAX_COMPLEXITY)
		);
	}
}
