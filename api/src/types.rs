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

//! Response bodies served by the HTTP boundary, shared with the join
//! protocol client that consumes them from a seed node.

use crate::core::core::{Block, Fact};

/// Response to `GET /blocks`: the whole chain plus the block currently
/// under construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockListing {
	/// All accepted blocks, genesis first.
	pub blockchain: Vec<Block>,
	/// The node's current mining block.
	pub mining_block: Block,
}

/// Response to `GET /fact?id=<height>`: the facts of one block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactListing {
	/// Facts in the order the block committed them.
	pub facts: Vec<Fact>,
}

/// Response to `GET /nodes`: addresses of the peers this node is linked
/// with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeListing {
	/// Dialable peer addresses.
	pub nodes: Vec<String>,
}

/// JSON body of a failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Human-readable description of the failure.
	pub error: String,
}
