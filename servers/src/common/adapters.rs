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

//! Adapters connecting the chain, fact pool, miner and gossip network to
//! one another, so none of the underlying crates has to depend on another.

use std::sync::{Arc, Weak};

use crate::chain;
use crate::core::core::{Block, Fact};
use crate::p2p;
use crate::pool;
use crate::pool::{BlockChain, FactSource, Miner, MinerAdapter, PoolAdapter, PoolError};
use crate::util::{OneTime, RwLock};

/// Implements the view of the chain the pool and miner operate on.
pub struct PoolToChainAdapter {
	chain: OneTime<Weak<chain::Chain>>,
}

impl PoolToChainAdapter {
	/// Create a new pool adapter.
	pub fn new() -> PoolToChainAdapter {
		PoolToChainAdapter {
			chain: OneTime::new(),
		}
	}

	/// Set the chain this adapter fronts, done once chain exists.
	pub fn set_chain(&self, chain: &Arc<chain::Chain>) {
		self.chain.init(Arc::downgrade(chain));
	}

	fn chain(&self) -> Arc<chain::Chain> {
		wo(&self.chain)
	}
}

impl BlockChain for PoolToChainAdapter {
	fn head(&self) -> Block {
		self.chain().head()
	}

	fn push_block(&self, b: &Block) -> Result<(), PoolError> {
		self.chain()
			.push(b.clone())
			.map_err(|e| PoolError::Chain(e.to_string()))
	}
}

/// Forwards locally ingested facts to the gossip layer. Facts relayed by
/// peers never reach this adapter; the pool only reports local sources.
pub struct PoolToNetAdapter {
	peers: OneTime<Weak<p2p::Peers>>,
}

impl PoolToNetAdapter {
	/// Create a new pool to net adapter.
	pub fn new() -> PoolToNetAdapter {
		PoolToNetAdapter {
			peers: OneTime::new(),
		}
	}

	/// Setup the p2p server on the adapter.
	pub fn init(&self, peers: &Arc<p2p::Peers>) {
		self.peers.init(Arc::downgrade(peers));
	}
}

impl PoolAdapter for PoolToNetAdapter {
	fn fact_accepted(&self, fact: &Fact) {
		wo(&self.peers).broadcast_fact(fact);
	}
}

/// Forwards mined blocks, paired with their successor mining block, to the
/// gossip layer. The chain append already happened when this fires, peers
/// observe the append-then-broadcast order.
pub struct MinerToNetAdapter {
	peers: OneTime<Weak<p2p::Peers>>,
}

impl MinerToNetAdapter {
	/// Create a new miner to net adapter.
	pub fn new() -> MinerToNetAdapter {
		MinerToNetAdapter {
			peers: OneTime::new(),
		}
	}

	/// Setup the p2p server on the adapter.
	pub fn init(&self, peers: &Arc<p2p::Peers>) {
		self.peers.init(Arc::downgrade(peers));
	}
}

impl MinerAdapter for MinerToNetAdapter {
	fn block_mined(&self, accepted: &Block, next: &Block) {
		wo(&self.peers).broadcast_block(accepted, next);
	}
}

/// Implementation of the NetAdapter for the node. Gets notified when new
/// blocks and facts are received from peers and applies them to the miner
/// and the fact pool.
pub struct NetToChainAdapter {
	miner: Weak<Miner>,
	pool: Weak<RwLock<pool::FactPool>>,
}

impl NetToChainAdapter {
	/// Create a new network adapter over the miner and pool.
	pub fn new(miner: &Arc<Miner>, pool: &Arc<RwLock<pool::FactPool>>) -> NetToChainAdapter {
		NetToChainAdapter {
			miner: Arc::downgrade(miner),
			pool: Arc::downgrade(pool),
		}
	}
}

impl p2p::NetAdapter for NetToChainAdapter {
	fn block_received(&self, valid_block: Block, mining_block: Block, peer: &p2p::PeerAddr) -> bool {
		let miner = match self.miner.upgrade() {
			Some(miner) => miner,
			None => return false,
		};
		let (hash, height) = (valid_block.hash.clone(), valid_block.index);
		match miner.process_remote_block(valid_block, mining_block) {
			Ok(()) => {
				debug!("block {} at height {} accepted from {}", hash, height, peer);
				true
			}
			Err(e) => {
				// Blocks losing the race against the current tip land here
				// and are dropped, that is the whole fork policy.
				debug!(
					"block {} at height {} from {} dropped: {}",
					hash, height, peer, e
				);
				false
			}
		}
	}

	fn fact_received(&self, fact: Fact, peer: &p2p::PeerAddr) {
		if let Some(pool) = self.pool.upgrade() {
			debug!("fact {} relayed by {}", fact.id, peer);
			pool.write().add(FactSource::Peer, fact);
		}
	}
}

// Helper to obtain the usable reference out of the weak ones the adapters
// hold. The references are set once early on and never dropped before the
// adapters, failing to upgrade is a bug.
fn wo<T>(weak_one: &OneTime<Weak<T>>) -> Arc<T> {
	weak_one
		.borrow()
		.upgrade()
		.expect("failed to upgrade weak reference")
}
