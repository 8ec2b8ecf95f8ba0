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

//! Facts, the unit of application data: an opaque JSON payload tagged with
//! an ingestion-time id.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde_json::Value;

/// An opaque record awaiting (or having achieved) inclusion in a block.
/// The id is assigned once by the originating node and is the network-wide
/// deduplication key; the payload is carried verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
	/// Ingestion timestamp in nanoseconds, decimal-rendered. Strictly
	/// monotonic within the issuing process.
	pub id: String,
	/// Arbitrary JSON supplied by the client.
	pub payload: Value,
}

static LAST_ID: AtomicI64 = AtomicI64::new(0);

impl Fact {
	/// Wraps a payload with a fresh ingestion id.
	pub fn new(payload: Value) -> Fact {
		Fact {
			id: next_id().to_string(),
			payload,
		}
	}

	/// Canonical text the block digest commits to: the id followed by the
	/// compact JSON form of the payload.
	pub fn hash_text(&self) -> String {
		format!("{}{}", self.id, self.payload)
	}
}

// Wall-clock nanoseconds, pushed one past the previously issued id whenever
// the clock reads at or behind it.
fn next_id() -> i64 {
	let now = Utc::now().timestamp_nanos_opt().unwrap_or(0);
	let prev = LAST_ID
		.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
			Some(if now > last { now } else { last + 1 })
		})
		.unwrap_or(0);
	if now > prev {
		now
	} else {
		prev + 1
	}
}
