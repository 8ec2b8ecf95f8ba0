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

//! Blocks and block validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::fact::Fact;
use crate::core::hash::{Hash, Hashed};
use crate::pow;

/// Reasons a candidate block is rejected against its predecessor. A
/// candidate failing any single check is invalid.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
	/// The candidate does not sit at the predecessor's height plus one.
	#[error("index {candidate} does not follow {prev}")]
	IndexMismatch {
		/// Height claimed by the candidate.
		candidate: u64,
		/// Height of the predecessor.
		prev: u64,
	},
	/// The candidate does not link back to the predecessor's hash.
	#[error("previous hash mismatch")]
	PrevHashMismatch,
	/// The candidate's hash does not match its own contents.
	#[error("block hash does not match block contents")]
	HashMismatch,
	/// The nonce does not satisfy the proof of work at the candidate's
	/// complexity.
	#[error("nonce does not satisfy the proof of work")]
	ProofOfWorkFailed,
}

/// A block in the ledger: a hash-linked record carrying an ordered set of
/// facts, the complexity its proof of work was mined at and the winning
/// nonce. A block under construction carries an empty hash and nonce until
/// a submitted nonce promotes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
	/// Height of the block, the predecessor's index plus one.
	pub index: u64,
	/// Digest of this block's canonical serialization.
	pub hash: Hash,
	/// The predecessor's hash, the literal "0" for genesis.
	pub prev_hash: Hash,
	/// Creation time of the block, committed to by the digest.
	pub timestamp: DateTime<Utc>,
	/// Facts committed by this block, in ingestion order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub facts: Vec<Fact>,
	/// Number of leading zero hex characters the proof of work requires.
	pub complexity: u32,
	/// Witness supplied by an external miner.
	#[serde(default)]
	pub nonce: String,
}

// The canonical serialization commits to chain position (prev_hash, index),
// timing, the proof-of-work witness, the ordered fact set and the
// complexity. Field order and textual forms are fixed; peers must produce
// identical bytes for identical blocks.
impl Hashed for Block {
	fn hash_input(&self) -> Vec<u8> {
		let mut input = String::new();
		input.push_str(self.prev_hash.as_str());
		input.push_str(&self.timestamp.to_rfc3339());
		input.push_str(&self.nonce);
		input.push_str(&self.index.to_string());
		for fact in &self.facts {
			input.push_str(&fact.hash_text());
		}
		input.push_str(&self.complexity.to_string());
		input.into_bytes()
	}
}

impl Block {
	/// Validates the block as an extension of `prev`. All four checks must
	/// pass: height linkage, hash linkage, content digest and proof of work.
	pub fn validate(&self, prev: &Block) -> Result<(), Error> {
		if self.index != prev.index + 1 {
			return Err(Error::IndexMismatch {
				candidate: self.index,
				prev: prev.index,
			});
		}
		if self.prev_hash != prev.hash {
			return Err(Error::PrevHashMismatch);
		}
		if self.hash != Hashed::hash(self) {
			return Err(Error::HashMismatch);
		}
		if !pow::verify(&prev.hash, &self.nonce, self.complexity) {
			return Err(Error::ProofOfWorkFailed);
		}
		Ok(())
	}

	/// Whether this block sits directly on top of `prev`, checking linkage
	/// only (no digest or proof-of-work verification). Used on mining
	/// blocks, whose hash and nonce are still empty.
	pub fn extends(&self, prev: &Block) -> bool {
		self.index == prev.index + 1 && self.prev_hash == prev.hash
	}

	/// Ids of the facts committed by this block.
	pub fn fact_ids(&self) -> Vec<String> {
		self.facts.iter().map(|f| f.id.clone()).collect()
	}
}
