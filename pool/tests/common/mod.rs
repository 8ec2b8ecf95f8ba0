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

//! Common test adapters wiring a pool and miner to a real chain.

use std::sync::Arc;

use factnet_chain::Chain;
use factnet_core::core::{Block, Fact};
use factnet_pool::{BlockChain, MinerAdapter, PoolAdapter, PoolError};
use factnet_util::Mutex;

/// Chain adapter backed by an actual in-memory chain.
pub struct ChainAdapter {
	pub chain: Arc<Chain>,
}

impl BlockChain for ChainAdapter {
	fn head(&self) -> Block {
		self.chain.head()
	}

	fn push_block(&self, b: &Block) -> Result<(), PoolError> {
		self.chain
			.push(b.clone())
			.map_err(|e| PoolError::Chain(e.to_string()))
	}
}

/// Adapter recording every event it sees.
pub struct RecordingAdapter {
	facts: Mutex<Vec<String>>,
	blocks: Mutex<Vec<(Block, Block)>>,
}

impl RecordingAdapter {
	pub fn new() -> RecordingAdapter {
		RecordingAdapter {
			facts: Mutex::new(vec![]),
			blocks: Mutex::new(vec![]),
		}
	}

	/// Ids of facts announced for broadcast.
	pub fn announced_facts(&self) -> Vec<String> {
		self.facts.lock().clone()
	}

	/// (accepted, next mining) pairs announced for broadcast.
	pub fn mined_blocks(&self) -> Vec<(Block, Block)> {
		self.blocks.lock().clone()
	}
}

impl PoolAdapter for RecordingAdapter {
	fn fact_accepted(&self, fact: &Fact) {
		self.facts.lock().push(fact.id.clone());
	}
}

impl MinerAdapter for RecordingAdapter {
	fn block_mined(&self, accepted: &Block, next: &Block) {
		self.blocks.lock().push((accepted.clone(), next.clone()));
	}
}
