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

use serde_json::json;

use self::common::RecordingAdapter;
use factnet_core::core::Fact;
use factnet_pool::{FactPool, FactSource, NoopAdapter};
use std::sync::Arc;

fn fact(id: &str) -> Fact {
	Fact {
		id: id.to_owned(),
		payload: json!({ "id": id }),
	}
}

#[test]
fn add_keeps_ingestion_order() {
	let adapter = Arc::new(RecordingAdapter::new());
	let mut pool = FactPool::new(adapter);
	pool.add(FactSource::Api, fact("1"));
	pool.add(FactSource::Peer, fact("2"));
	pool.add(FactSource::Api, fact("3"));

	let ids: Vec<String> = pool.snapshot().iter().map(|f| f.id.clone()).collect();
	assert_eq!(ids, vec!["1", "2", "3"]);
	assert_eq!(pool.len(), 3);
}

#[test]
fn only_local_facts_are_announced() {
	let adapter = Arc::new(RecordingAdapter::new());
	let mut pool = FactPool::new(adapter.clone());
	pool.add(FactSource::Api, fact("local"));
	pool.add(FactSource::Peer, fact("remote"));

	assert_eq!(adapter.announced_facts(), vec!["local"]);
}

#[test]
fn drain_empties_the_buffer() {
	let mut pool = FactPool::new(Arc::new(NoopAdapter {}));
	pool.add(FactSource::Api, fact("1"));
	pool.add(FactSource::Api, fact("2"));

	let drained = pool.drain();
	assert_eq!(drained.len(), 2);
	assert!(pool.is_empty());
	assert!(pool.drain().is_empty());
}

#[test]
fn remove_by_ids_prunes_only_matches() {
	let mut pool = FactPool::new(Arc::new(NoopAdapter {}));
	for id in &["1", "2", "3", "4"] {
		pool.add(FactSource::Peer, fact(id));
	}
	pool.remove_by_ids(&["2".to_owned(), "4".to_owned(), "nope".to_owned()]);

	let ids: Vec<String> = pool.snapshot().iter().map(|f| f.id.clone()).collect();
	assert_eq!(ids, vec!["1", "3"]);
}
