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

//! Base types for the fact pool and miner.

use thiserror::Error;

use crate::core::core::block;
use crate::core::core::{Block, Fact};

/// Where a fact entered this node. Only locally ingested facts get pushed
/// back out to peers; gossip received from a peer is buffered without being
/// re-broadcast.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FactSource {
	/// Submitted by a client through the HTTP boundary.
	Api,
	/// Relayed by a peer over a gossip link.
	Peer,
}

impl FactSource {
	/// Whether facts from this source are announced to peers.
	pub fn is_local(&self) -> bool {
		matches!(self, FactSource::Api)
	}
}

/// Errors from pool and miner operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
	/// A promoted or remote block failed validation.
	#[error("block validation failed: {0}")]
	InvalidBlock(#[from] block::Error),
	/// The chain refused the block.
	#[error("chain rejected block: {0}")]
	Chain(String),
	/// A remote mining block that does not extend the block it came with.
	#[error("mining block does not extend the accepted block")]
	MiningBlockMismatch,
}

/// The chain as seen from the pool and miner, implemented by an adapter in
/// the server crate.
pub trait BlockChain: Sync + Send {
	/// Current chain tip.
	fn head(&self) -> Block;

	/// Validates the block against the tip and appends it.
	fn push_block(&self, b: &Block) -> Result<(), PoolError>;
}

/// Consumer of pool events.
pub trait PoolAdapter: Sync + Send {
	/// A locally ingested fact was accepted into the pool.
	fn fact_accepted(&self, fact: &Fact);
}

/// Consumer of miner events.
pub trait MinerAdapter: Sync + Send {
	/// A nonce satisfied the proof of work: `accepted` was appended to the
	/// chain and `next` is the freshly built mining block.
	fn block_mined(&self, accepted: &Block, next: &Block);
}

/// Dummy adapter used as a placeholder where a pool or miner is built
/// without the rest of the system (mostly tests).
pub struct NoopAdapter {}

impl PoolAdapter for NoopAdapter {
	fn fact_accepted(&self, _fact: &Fact) {}
}

impl MinerAdapter for NoopAdapter {
	fn block_mined(&self, _accepted: &Block, _next: &Block) {}
}
