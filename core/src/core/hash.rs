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

//! Hash Function
//!
//! Primary hash function used in the protocol: SHA-256, carried around as
//! its lowercase hex rendering since that is also the on-the-wire form.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::util::to_hex;

/// A hash to uniquely (or close enough) identify one of the main ledger
/// constructs. The hex string form is canonical: it is what gets serialized,
/// compared, and fed back into further hash inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Hash(String);

impl Hash {
	/// Hash of the provided byte string.
	pub fn from_data(data: &[u8]) -> Hash {
		let mut hasher = Sha256::new();
		hasher.update(data);
		Hash(to_hex(hasher.finalize().as_ref()))
	}

	/// The literal "0" carried as previous hash by the genesis block.
	pub fn zero() -> Hash {
		Hash("0".to_owned())
	}

	/// The empty hash of a block still under construction.
	pub fn none() -> Hash {
		Hash(String::new())
	}

	/// Whether this is the empty under-construction hash.
	pub fn is_none(&self) -> bool {
		self.0.is_empty()
	}

	/// Hex characters of the digest.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Hash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for Hash {
	fn from(s: &str) -> Hash {
		Hash(s.to_owned())
	}
}

impl From<String> for Hash {
	fn from(s: String) -> Hash {
		Hash(s)
	}
}

/// A trait for types that get their hash (SHA-256) from their canonical
/// byte serialization.
pub trait Hashed {
	/// Canonical bytes the digest commits to.
	fn hash_input(&self) -> Vec<u8>;

	/// The hash of the canonical serialization.
	fn hash(&self) -> Hash {
		Hash::from_data(&self.hash_input())
	}
}

impl Hashed for [u8] {
	fn hash_input(&self) -> Vec<u8> {
		self.to_owned()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn known_digest() {
		// sha256("abc")
		assert_eq!(
			Hash::from_data(b"abc").as_str(),
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
		);
	}

	#[test]
	fn zero_and_none() {
		assert_eq!(Hash::zero().as_str(), "0");
		assert!(Hash::none().is_none());
		assert!(!Hash::zero().is_none());
	}
}
