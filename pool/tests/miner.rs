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

pub mod common;

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use self::common::{ChainAdapter, RecordingAdapter};
use factnet_chain::Chain;
use factnet_core::core::hash::{Hash, Hashed};
use factnet_core::core::{Block, Fact};
use factnet_core::pow;
use factnet_pool::{FactPool, FactSource, Miner, PoolError, SubmitOutcome};
use factnet_util::RwLock;

fn fact(id: &str) -> Fact {
	Fact {
		id: id.to_owned(),
		payload: json!({ "id": id }),
	}
}

// A chain, pool and miner wired together the way the server does it.
fn node() -> (Arc<Chain>, Arc<RwLock<FactPool>>, Arc<Miner>, Arc<RecordingAdapter>) {
	let chain = Arc::new(Chain::new());
	let adapter = Arc::new(RecordingAdapter::new());
	let pool = Arc::new(RwLock::new(FactPool::new(adapter.clone())));
	let miner = Arc::new(Miner::new(
		Arc::new(ChainAdapter {
			chain: chain.clone(),
		}),
		pool.clone(),
		adapter.clone(),
	));
	(chain, pool, miner, adapter)
}

#[test]
fn initial_mining_block_sits_on_genesis() {
	let (chain, _pool, miner, _adapter) = node();
	let mb = miner.mining_block();
	let head = chain.head();
	assert_eq!(mb.index, head.index + 1);
	assert_eq!(mb.prev_hash, head.hash);
	assert_eq!(mb.complexity, 0);
	assert!(mb.facts.is_empty());
	assert!(mb.hash.is_none());
	assert_eq!(mb.nonce, "");
}

#[test]
fn any_nonce_wins_at_zero_complexity() {
	let (chain, _pool, miner, _adapter) = node();
	assert_eq!(miner.submit_nonce("abc").unwrap(), SubmitOutcome::Accepted);

	assert_eq!(chain.height(), 2);
	let accepted = chain.head();
	assert_eq!(accepted.index, 1);
	assert_eq!(accepted.nonce, "abc");

	// The promotion happened well inside the target interval, so the next
	// mining block retargets one step up.
	let mb = miner.mining_block();
	assert_eq!(mb.index, 2);
	assert_eq!(mb.prev_hash, accepted.hash);
	assert_eq!(mb.complexity, 1);
}

#[test]
fn pending_facts_are_sealed_into_the_promoted_block() {
	let (chain, pool, miner, _adapter) = node();
	pool.write().add(FactSource::Api, fact("1"));
	pool.write().add(FactSource::Api, fact("2"));

	assert_eq!(miner.submit_nonce("n").unwrap(), SubmitOutcome::Accepted);

	let accepted = chain.get(1).unwrap();
	let ids: Vec<String> = accepted.facts.iter().map(|f| f.id.clone()).collect();
	assert_eq!(ids, vec!["1", "2"]);
	// The buffer was drained, nothing gets committed twice.
	assert!(pool.read().is_empty());
	assert!(miner.mining_block().facts.is_empty());
}

#[test]
fn missed_nonce_changes_nothing() {
	let (chain, pool, miner, adapter) = node();
	pool.write().add(FactSource::Api, fact("1"));

	// Raise the bar to four leading zeros and pick a nonce that misses it.
	let mut raised = miner.mining_block();
	raised.complexity = 4;
	miner.set_mining_block(raised);
	let head = chain.head();
	let nonce = (0..)
		.map(|n: u32| n.to_string())
		.find(|n| !pow::verify(&head.hash, n, 4))
		.unwrap();

	assert_eq!(miner.submit_nonce(&nonce).unwrap(), SubmitOutcome::Rejected);
	assert_eq!(chain.height(), 1);
	assert_eq!(pool.read().len(), 1);
	assert!(adapter.mined_blocks().is_empty());
}

#[test]
fn promotion_is_announced_with_its_successor() {
	let (_chain, _pool, miner, adapter) = node();
	miner.submit_nonce("w").unwrap();

	let mined = adapter.mined_blocks();
	assert_eq!(mined.len(), 1);
	let (accepted, next) = &mined[0];
	assert_eq!(accepted.index, 1);
	assert!(next.extends(accepted));
}

// Builds the (valid_block, mining_block) pair another node would gossip
// after mining on top of `head`.
fn remote_pair(head: &Block, facts: Vec<Fact>) -> (Block, Block) {
	let mut accepted = Block {
		index: head.index + 1,
		hash: Hash::none(),
		prev_hash: head.hash.clone(),
		timestamp: Utc::now(),
		facts,
		complexity: 0,
		nonce: "remote".to_owned(),
	};
	accepted.hash = Hashed::hash(&accepted);
	let next = Block {
		index: accepted.index + 1,
		hash: Hash::none(),
		prev_hash: accepted.hash.clone(),
		timestamp: Utc::now(),
		facts: vec![],
		complexity: 0,
		nonce: String::new(),
	};
	(accepted, next)
}

#[test]
fn remote_block_replaces_mining_block_and_dedups_facts() {
	let (chain, pool, miner, _adapter) = node();
	pool.write().add(FactSource::Api, fact("1"));
	pool.write().add(FactSource::Api, fact("2"));

	// Another node mined fact "1" first.
	let (accepted, next) = remote_pair(&chain.head(), vec![fact("1")]);
	miner.process_remote_block(accepted.clone(), next.clone()).unwrap();

	assert_eq!(chain.height(), 2);
	assert_eq!(chain.head(), accepted);
	assert_eq!(miner.mining_block(), next);

	// Fact "1" is committed now, only "2" stays pending.
	let ids: Vec<String> = pool.read().snapshot().iter().map(|f| f.id.clone()).collect();
	assert_eq!(ids, vec!["2"]);
}

#[test]
fn remote_pair_is_rejected_as_a_unit() {
	let (chain, pool, miner, _adapter) = node();
	pool.write().add(FactSource::Api, fact("1"));
	let before = miner.mining_block();

	let (accepted, _) = remote_pair(&chain.head(), vec![fact("1")]);
	// A mining block that does not sit on the accepted block.
	let stray = Block {
		index: 9,
		hash: Hash::none(),
		prev_hash: Hash::from("elsewhere"),
		timestamp: Utc::now(),
		facts: vec![],
		complexity: 0,
		nonce: String::new(),
	};

	assert_eq!(
		miner.process_remote_block(accepted, stray),
		Err(PoolError::MiningBlockMismatch)
	);
	// Nothing moved: no append, no mining block swap, no dedup.
	assert_eq!(chain.height(), 1);
	assert_eq!(miner.mining_block(), before);
	assert_eq!(pool.read().len(), 1);
}

#[test]
fn concurrent_remote_blocks_resolve_first_come_first_served() {
	let (chain, _pool, miner, _adapter) = node();
	let head = chain.head();
	let (first, first_next) = remote_pair(&head, vec![]);
	let (second, second_next) = remote_pair(&head, vec![fact("9")]);

	miner.process_remote_block(first.clone(), first_next).unwrap();
	// The second pair was mined at the same height off the same parent; it
	// no longer extends the tip and is dropped.
	assert!(miner.process_remote_block(second, second_next).is_err());

	assert_eq!(chain.height(), 2);
	assert_eq!(chain.head(), first);
}

#[test]
fn mining_continues_on_adopted_remote_state() {
	let (chain, pool, miner, _adapter) = node();
	pool.write().add(FactSource::Api, fact("mine-later"));

	let (accepted, next) = remote_pair(&chain.head(), vec![]);
	miner.process_remote_block(accepted, next).unwrap();

	// The locally pending fact survives the adoption and lands in the next
	// locally-mined block.
	assert_eq!(miner.submit_nonce("again").unwrap(), SubmitOutcome::Accepted);
	let tip = chain.head();
	assert_eq!(tip.index, 2);
	let ids: Vec<String> = tip.facts.iter().map(|f| f.id.clone()).collect();
	assert_eq!(ids, vec!["mine-later"]);
}
