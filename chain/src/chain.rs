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

//! Facade to the chain: an append-only, genesis-seeded sequence of blocks
//! with validation on every extension.

use crate::core::core::hash::{Hash, Hashed};
use crate::core::core::Block;
use crate::core::genesis;
use crate::error::Error;
use crate::util::RwLock;

/// The chain store. All access goes through the interior lock. Past blocks
/// are never mutated and there is no reorganization: a candidate that does
/// not extend the current tip is rejected, whatever its height claims.
pub struct Chain {
	blocks: RwLock<Vec<Block>>,
}

impl Chain {
	/// A fresh chain holding a newly built genesis block.
	pub fn new() -> Chain {
		let gen = genesis::genesis();
		info!("chain: genesis {} created", gen.hash);
		Chain {
			blocks: RwLock::new(vec![gen]),
		}
	}

	/// Adopts a chain received from a seed node, validating it in full
	/// first.
	pub fn from_blocks(blocks: Vec<Block>) -> Result<Chain, Error> {
		let chain = Chain {
			blocks: RwLock::new(blocks),
		};
		chain.validate()?;
		info!(
			"chain: adopted {} blocks, tip {}",
			chain.height(),
			chain.head().hash
		);
		Ok(chain)
	}

	/// The current tip.
	pub fn head(&self) -> Block {
		// constructors guarantee a non-empty chain
		self.blocks
			.read()
			.last()
			.cloned()
			.expect("chain is seeded with genesis")
	}

	/// Number of blocks, genesis included.
	pub fn height(&self) -> u64 {
		self.blocks.read().len() as u64
	}

	/// Block at the given height.
	pub fn get(&self, height: u64) -> Result<Block, Error> {
		self.blocks
			.read()
			.get(height as usize)
			.cloned()
			.ok_or(Error::OutOfRange(height))
	}

	/// Full snapshot, genesis first.
	pub fn all(&self) -> Vec<Block> {
		self.blocks.read().clone()
	}

	/// Validates `b` against the tip and appends it, atomically under the
	/// write lock so concurrent extensions cannot both win.
	pub fn push(&self, b: Block) -> Result<(), Error> {
		let mut blocks = self.blocks.write();
		{
			let head = blocks.last().expect("chain is seeded with genesis");
			b.validate(head)?;
		}
		trace!("chain: block {} accepted at height {}", b.hash, b.index);
		blocks.push(b);
		Ok(())
	}

	/// Re-checks the whole chain: genesis shape, then every linkage, digest
	/// and proof of work. Used when adopting a chain from a seed node.
	pub fn validate(&self) -> Result<(), Error> {
		let blocks = self.blocks.read();
		let first = match blocks.first() {
			Some(b) => b,
			None => return Err(Error::InvalidChain("chain is empty".to_owned())),
		};
		if first.index != 0
			|| first.prev_hash != Hash::zero()
			|| first.complexity != 0
			|| !first.facts.is_empty()
			|| first.hash != Hashed::hash(first)
		{
			return Err(Error::InvalidChain("first block is not genesis".to_owned()));
		}
		for pair in blocks.windows(2) {
			pair[1].validate(&pair[0])?;
		}
		Ok(())
	}
}
