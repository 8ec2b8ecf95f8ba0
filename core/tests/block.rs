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

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use sha2::{Digest, Sha256};

use factnet_core::consensus;
use factnet_core::core::hash::{Hash, Hashed};
use factnet_core::core::{block, Block, Fact};
use factnet_core::genesis;
use factnet_core::pow;

fn fixed_block() -> Block {
	Block {
		index: 3,
		hash: Hash::none(),
		prev_hash: Hash::from("prevhash"),
		timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
		facts: vec![
			Fact {
				id: "100".to_owned(),
				payload: json!({"x": 1}),
			},
			Fact {
				id: "101".to_owned(),
				payload: json!("plain"),
			},
		],
		complexity: 2,
		nonce: "n0nce".to_owned(),
	}
}

// The canonical serialization is part of the wire contract: prev_hash,
// textual timestamp, nonce, decimal index, facts as id plus compact JSON
// payload, decimal complexity. Nothing else, in that order.
#[test]
fn hash_input_is_byte_exact() {
	let b = fixed_block();
	let expected = "prevhash\
	                2024-01-02T03:04:05+00:00\
	                n0nce\
	                3\
	                100{\"x\":1}\
	                101\"plain\"\
	                2";
	assert_eq!(b.hash_input(), expected.as_bytes());
}

#[test]
fn hash_is_sha256_of_input() {
	let b = fixed_block();
	let mut hasher = Sha256::new();
	hasher.update(b.hash_input());
	let expected: String = hasher
		.finalize()
		.iter()
		.map(|byte| format!("{:02x}", byte))
		.collect();
	assert_eq!(b.hash().as_str(), expected);
}

#[test]
fn hash_is_deterministic() {
	let b = fixed_block();
	assert_eq!(b.hash(), b.hash());
	assert_eq!(b.hash(), b.clone().hash());
}

#[test]
fn hash_excludes_the_hash_field() {
	let mut b = fixed_block();
	let before = b.hash();
	b.hash = Hash::from("spoofed");
	assert_eq!(b.hash(), before);
}

#[test]
fn genesis_shape() {
	let gen = genesis::genesis();
	assert_eq!(gen.index, 0);
	assert_eq!(gen.prev_hash, Hash::zero());
	assert!(gen.facts.is_empty());
	assert_eq!(gen.complexity, 0);
	assert_eq!(gen.nonce, "");
	assert_eq!(gen.hash, Hashed::hash(&gen));
}

fn valid_child(prev: &Block) -> Block {
	let mut b = Block {
		index: prev.index + 1,
		hash: Hash::none(),
		prev_hash: prev.hash.clone(),
		timestamp: Utc::now(),
		facts: vec![],
		complexity: 0,
		nonce: "abc".to_owned(),
	};
	b.hash = Hashed::hash(&b);
	b
}

#[test]
fn validate_accepts_a_proper_extension() {
	let gen = genesis::genesis();
	let b = valid_child(&gen);
	assert_eq!(b.validate(&gen), Ok(()));
}

// Any single failing conjunct must reject the candidate.
#[test]
fn validate_rejects_index_mismatch() {
	let gen = genesis::genesis();
	let mut b = valid_child(&gen);
	b.index = 2;
	b.hash = Hashed::hash(&b);
	assert_eq!(
		b.validate(&gen),
		Err(block::Error::IndexMismatch { candidate: 2, prev: 0 })
	);
}

#[test]
fn validate_rejects_prev_hash_mismatch() {
	let gen = genesis::genesis();
	let mut b = valid_child(&gen);
	b.prev_hash = Hash::from("somewhere else");
	b.hash = Hashed::hash(&b);
	assert_eq!(b.validate(&gen), Err(block::Error::PrevHashMismatch));
}

#[test]
fn validate_rejects_tampered_contents() {
	let gen = genesis::genesis();
	let mut b = valid_child(&gen);
	b.facts.push(Fact {
		id: "1".to_owned(),
		payload: json!(null),
	});
	assert_eq!(b.validate(&gen), Err(block::Error::HashMismatch));
}

#[test]
fn validate_rejects_insufficient_pow() {
	let gen = genesis::genesis();
	let mut b = valid_child(&gen);
	// Find a nonce that does NOT have four leading zeros, which is nearly
	// every nonce.
	let nonce = (0..)
		.map(|n: u32| n.to_string())
		.find(|n| !pow::verify(&gen.hash, n, 4))
		.unwrap();
	b.nonce = nonce;
	b.complexity = 4;
	b.hash = Hashed::hash(&b);
	assert_eq!(b.validate(&gen), Err(block::Error::ProofOfWorkFailed));
}

#[test]
fn retarget_steps_up_within_target_interval() {
	let mut prev = fixed_block();
	prev.complexity = 3;
	let now = prev.timestamp + Duration::seconds(consensus::BLOCK_TIME_SEC - 1);
	assert_eq!(consensus::next_complexity(&prev, now), 4);
}

#[test]
fn retarget_steps_down_past_target_interval() {
	let mut prev = fixed_block();
	prev.complexity = 3;
	let now = prev.timestamp + Duration::seconds(consensus::BLOCK_TIME_SEC);
	assert_eq!(consensus::next_complexity(&prev, now), 2);
}

#[test]
fn retarget_clamps_at_zero() {
	let mut prev = fixed_block();
	prev.complexity = 0;
	let now = prev.timestamp + Duration::seconds(consensus::BLOCK_TIME_SEC + 5);
	assert_eq!(consensus::next_complexity(&prev, now), 0);
}

#[test]
fn retarget_clamps_at_max() {
	let mut prev = fixed_block();
	prev.complexity = consensus::MAX_COMPLEXITY;
	let now = prev.timestamp + Duration::seconds(1);
	assert_eq!(
		consensus::next_complexity(&prev, now),
		consensus::MAX_COMPLEXITY
	);
}

#[test]
fn wire_json_omits_empty_facts() {
	let gen = genesis::genesis();
	let json = serde_json::to_value(&gen).unwrap();
	assert!(json.get("facts").is_none());
	assert_eq!(json["index"], 0);
	assert_eq!(json["prev_hash"], "0");
	assert_eq!(json["complexity"], 0);
	assert_eq!(json["nonce"], "");

	let b = fixed_block();
	let json = serde_json::to_value(&b).unwrap();
	assert_eq!(json["facts"].as_array().unwrap().len(), 2);
}

#[test]
fn wire_json_round_trips() {
	let b = fixed_block();
	let encoded = serde_json::to_string(&b).unwrap();
	let decoded: Block = serde_json::from_str(&encoded).unwrap();
	assert_eq!(decoded, b);
	// Round-tripping must preserve the digest, peers re-hash what they
	// receive.
	assert_eq!(decoded.hash(), b.hash());
}
