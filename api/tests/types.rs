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

use serde_json::Value;

use factnet_api::{BlockListing, ErrorBody, FactListing, NodeListing};
use factnet_core::genesis;

#[test]
fn block_listing_wire_shape() {
	let gen = genesis::genesis();
	let mut mining = gen.clone();
	mining.index = 1;
	mining.prev_hash = gen.hash.clone();
	mining.hash = factnet_core::core::hash::Hash::none();

	let listing = BlockListing {
		blockchain: vec![gen],
		mining_block: mining,
	};
	let value: Value = serde_json::to_value(&listing).unwrap();
	assert_eq!(value["blockchain"].as_array().unwrap().len(), 1);
	assert_eq!(value["blockchain"][0]["index"], 0);
	assert_eq!(value["mining_block"]["index"], 1);
	assert_eq!(value["mining_block"]["hash"], "");

	let back: BlockListing = serde_json::from_value(value).unwrap();
	assert_eq!(back.blockchain.len(), 1);
	assert_eq!(back.mining_block.index, 1);
}

#[test]
fn node_listing_wire_shape() {
	let listing = NodeListing {
		nodes: vec!["ws://127.0.0.1:9001/peer".to_owned()],
	};
	let value: Value = serde_json::to_value(&listing).unwrap();
	assert_eq!(value["nodes"][0], "ws://127.0.0.1:9001/peer");
}

#[test]
fn fact_listing_wire_shape() {
	let listing = FactListing { facts: vec![] };
	let value: Value = serde_json::to_value(&listing).unwrap();
	assert_eq!(value["facts"].as_array().unwrap().len(), 0);
}

#[test]
fn error_body_wire_shape() {
	let body = ErrorBody {
		error: "bad arguments: missing id parameter".to_owned(),
	};
	let value: Value = serde_json::to_value(&body).unwrap();
	assert!(value["error"].as_str().unwrap().contains("missing id"));
}
