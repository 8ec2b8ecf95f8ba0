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

//! Ordered buffer of facts awaiting inclusion in a mined block.

use std::sync::Arc;

use crate::core::core::Fact;
use crate::types::{FactSource, PoolAdapter};

/// The pending-fact buffer. Facts keep ingestion order, are drained
/// wholesale when a mining block is promoted locally, and are pruned by id
/// when a remote block is accepted so the same fact cannot land in a later
/// locally-mined block again.
pub struct FactPool {
	entries: Vec<Fact>,
	adapter: Arc<dyn PoolAdapter>,
}

impl FactPool {
	/// An empty pool reporting accepted local facts to the given adapter.
	pub fn new(adapter: Arc<dyn PoolAdapter>) -> FactPool {
		FactPool {
			entries: vec![],
			adapter,
		}
	}

	/// Appends a fact. Locally ingested facts are announced through the
	/// adapter; facts relayed by peers are only buffered.
	pub fn add(&mut self, source: FactSource, fact: Fact) {
		debug!(
			"pool: fact {} via {:?}, {} now pending",
			fact.id,
			source,
			self.entries.len() + 1
		);
		if source.is_local() {
			self.adapter.fact_accepted(&fact);
		}
		self.entries.push(fact);
	}

	/// Takes the whole buffer, leaving it empty.
	pub fn drain(&mut self) -> Vec<Fact> {
		std::mem::take(&mut self.entries)
	}

	/// Drops every buffered fact whose id appears in `ids`.
	pub fn remove_by_ids(&mut self, ids: &[String]) {
		self.entries.retain(|f| !ids.contains(&f.id));
	}

	/// Copy of the current buffer.
	pub fn snapshot(&self) -> Vec<Fact> {
		self.entries.clone()
	}

	/// Number of pending facts.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the buffer holds nothing.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
