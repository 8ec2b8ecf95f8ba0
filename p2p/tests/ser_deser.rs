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

use chrono::Utc;
use serde_json::{json, Value};

use factnet_core::core::hash::{Hash, Hashed};
use factnet_core::core::{Block, Fact};
use factnet_p2p::msg::{TYPE_BLOCK, TYPE_FACT};
use factnet_p2p::PeerMessage;

fn sample_block(index: u64) -> Block {
	let mut b = Block {
		index,
		hash: Hash::none(),
		prev_hash: Hash::from("parent"),
		timestamp: Utc::now(),
		facts: vec![Fact {
			id: "7".to_owned(),
			payload: json!({"k": "v"}),
		}],
		complexity: 1,
		nonce: "w".to_owned(),
	};
	b.hash = Hashed::hash(&b);
	b
}

#[test]
fn block_envelope_round_trips() {
	let msg = PeerMessage::Block {
		valid_block: sample_block(4),
		mining_block: sample_block(5),
	};
	let encoded = msg.to_json().unwrap();
	let decoded = PeerMessage::from_json(&encoded).unwrap();
	assert_eq!(decoded, msg);
}

#[test]
fn fact_envelope_round_trips() {
	let msg = PeerMessage::Fact {
		fact: Fact {
			id: "123".to_owned(),
			payload: json!([1, 2, 3]),
		},
	};
	let encoded = msg.to_json().unwrap();
	let decoded = PeerMessage::from_json(&encoded).unwrap();
	assert_eq!(decoded, msg);
}

#[test]
fn block_envelope_wire_shape() {
	let msg = PeerMessage::Block {
		valid_block: sample_block(4),
		mining_block: sample_block(5),
	};
	let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
	// Integer discriminator, both blocks present, no unused sibling.
	assert_eq!(value["type"], u64::from(TYPE_BLOCK));
	assert_eq!(value["valid_block"]["index"], 4);
	assert_eq!(value["mining_block"]["index"], 5);
	assert!(value.get("fact").is_none());
}

#[test]
fn fact_envelope_wire_shape() {
	let msg = PeerMessage::Fact {
		fact: Fact {
			id: "123".to_owned(),
			payload: json!({"x": true}),
		},
	};
	let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
	assert_eq!(value["type"], u64::from(TYPE_FACT));
	assert_eq!(value["fact"]["id"], "123");
	assert!(value.get("valid_block").is_none());
	assert!(value.get("mining_block").is_none());
}

#[test]
fn unknown_tag_is_rejected() {
	assert!(PeerMessage::from_json("{\"type\": 9}").is_err());
}

#[test]
fn incomplete_envelopes_are_rejected() {
	// A block envelope without its mining block.
	let partial = json!({
		"type": TYPE_BLOCK,
		"valid_block": serde_json::to_value(sample_block(1)).unwrap(),
	});
	assert!(PeerMessage::from_json(&partial.to_string()).is_err());

	// A fact envelope without a fact.
	let empty = json!({ "type": TYPE_FACT });
	assert!(PeerMessage::from_json(&empty.to_string()).is_err());

	// Not JSON at all.
	assert!(PeerMessage::from_json("junk").is_err());
}
