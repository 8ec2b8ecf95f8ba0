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

//! Owner of the mining block and of the two paths that extend the chain
//! tip: nonce submissions from external workers, and block pairs gossiped
//! by peers. Both run under one transition lock so they cannot race each
//! other onto the same tip.

use std::sync::Arc;

use chrono::Utc;

use crate::core::consensus;
use crate::core::core::hash::{Hash, Hashed};
use crate::core::core::Block;
use crate::core::pow;
use crate::pool::FactPool;
use crate::types::{BlockChain, MinerAdapter, PoolError};
use crate::util::{Mutex, RwLock};

/// Outcome of a nonce submission.
#[derive(Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
	/// The nonce satisfied the predicate and the mining block was promoted.
	Accepted,
	/// The nonce missed, nothing changed.
	Rejected,
}

/// Keeper of the single block under construction, pinned to the current
/// chain tip.
pub struct Miner {
	chain: Arc<dyn BlockChain>,
	pool: Arc<RwLock<FactPool>>,
	adapter: Arc<dyn MinerAdapter>,
	mining_block: RwLock<Block>,
	// Serializes the two tip-extension paths (local submit, remote accept).
	transition: Mutex<()>,
}

impl Miner {
	/// Builds a miner with an initial mining block sitting on the current
	/// tip. The initial block inherits the tip's complexity; retargeting
	/// only kicks in on promotions.
	pub fn new(
		chain: Arc<dyn BlockChain>,
		pool: Arc<RwLock<FactPool>>,
		adapter: Arc<dyn MinerAdapter>,
	) -> Miner {
		let head = chain.head();
		let first = Miner::build_on(&head, head.complexity);
		Miner {
			chain,
			pool,
			adapter,
			mining_block: RwLock::new(first),
			transition: Mutex::new(()),
		}
	}

	// A fresh mining block on top of `head`. Facts stay empty until
	// promotion; hash and nonce stay empty until a submission wins.
	fn build_on(head: &Block, complexity: u32) -> Block {
		Block {
			index: head.index + 1,
			hash: Hash::none(),
			prev_hash: head.hash.clone(),
			timestamp: Utc::now(),
			facts: vec![],
			complexity,
			nonce: String::new(),
		}
	}

	/// Snapshot of the block under construction.
	pub fn mining_block(&self) -> Block {
		self.mining_block.read().clone()
	}

	/// Replaces the block under construction, used when adopting the mining
	/// block of a seed node on join.
	pub fn set_mining_block(&self, b: Block) {
		*self.mining_block.write() = b;
	}

	/// Tries an externally supplied nonce against the mining block. On
	/// success the pending facts are sealed into the block, the block is
	/// appended to the chain, a fresh mining block replaces it and the
	/// (accepted, next) pair is handed to the adapter for broadcast.
	pub fn submit_nonce(&self, nonce: &str) -> Result<SubmitOutcome, PoolError> {
		let _guard = self.transition.lock();
		let head = self.chain.head();

		let complexity = self.mining_block.read().complexity;
		if !pow::verify(&head.hash, nonce, complexity) {
			trace!("mine: nonce {:?} missed at complexity {}", nonce, complexity);
			return Ok(SubmitOutcome::Rejected);
		}

		// The nonce holds: seal the mining block. The buffer is drained into
		// the block being promoted, the digest commits to all of it.
		let mut candidate = self.mining_block.read().clone();
		candidate.nonce = nonce.to_owned();
		candidate.facts = self.pool.write().drain();
		candidate.hash = Hashed::hash(&candidate);

		candidate.validate(&head)?;
		self.chain.push_block(&candidate)?;

		let next = Miner::build_on(&candidate, consensus::next_complexity(&candidate, Utc::now()));
		*self.mining_block.write() = next.clone();

		info!(
			"mine: block {} promoted at height {} with {} facts, next complexity {}",
			candidate.hash,
			candidate.index,
			candidate.facts.len(),
			next.complexity
		);
		self.adapter.block_mined(&candidate, &next);
		Ok(SubmitOutcome::Accepted)
	}

	/// Applies a block and successor mining block announced by a peer. The
	/// pair is checked as a unit before any state changes: the block must
	/// extend the tip and the mining block must extend the block. On
	/// success the local mining block is replaced and every buffered fact
	/// already committed by the accepted block is dropped.
	pub fn process_remote_block(
		&self,
		valid_block: Block,
		mining_block: Block,
	) -> Result<(), PoolError> {
		let _guard = self.transition.lock();
		let head = self.chain.head();

		valid_block.validate(&head)?;
		if !mining_block.extends(&valid_block) {
			return Err(PoolError::MiningBlockMismatch);
		}

		self.chain.push_block(&valid_block)?;
		*self.mining_block.write() = mining_block;

		let ids = valid_block.fact_ids();
		if !ids.is_empty() {
			self.pool.write().remove_by_ids(&ids);
		}

		debug!(
			"gossip: block {} adopted at height {}, {} facts cleared",
			valid_block.hash,
			valid_block.index,
			valid_block.facts.len()
		);
		Ok(())
	}
}
