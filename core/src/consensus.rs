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

//! Consensus-relevant constants and short functions: the target block
//! interval and the per-block complexity retargeting controller.

use chrono::{DateTime, Duration, Utc};

use crate::core::block::Block;

/// Target interval between blocks, in seconds.
pub const BLOCK_TIME_SEC: i64 = 10;

/// Upper bound on complexity. A SHA-256 digest renders to 64 hex
/// characters, so requiring more leading zeros than that can never be
/// satisfied.
pub const MAX_COMPLEXITY: u32 = 64;

/// Complexity of the block following `prev`: one step up when `prev` was
/// promoted within the target interval of its creation, one step down
/// otherwise, clamped to `[0, MAX_COMPLEXITY]`.
pub fn next_complexity(prev: &Block, now: DateTime<Utc>) -> u32 {
	if now - prev.timestamp < Duration::seconds(BLOCK_TIME_SEC) {
		(prev.complexity + 1).min(MAX_COMPLEXITY)
	} else {
		prev.complexity.saturating_sub(1)
	}
}
