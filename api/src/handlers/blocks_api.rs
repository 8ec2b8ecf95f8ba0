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

use std::sync::Weak;

use hyper::{Body, Request};

use super::utils::w;
use crate::chain;
use crate::error::Error;
use crate::pool::Miner;
use crate::router::{Handler, ResponseFuture};
use crate::types::BlockListing;
use crate::web::result_to_response;

/// Chain snapshot plus the block currently under construction.
/// GET /blocks
pub struct BlocksHandler {
	/// The chain store.
	pub chain: Weak<chain::Chain>,
	/// Owner of the mining block.
	pub miner: Weak<Miner>,
}

impl BlocksHandler {
	fn get_blocks(&self) -> Result<BlockListing, Error> {
		Ok(BlockListing {
			blockchain: w(&self.chain)?.all(),
			mining_block: w(&self.miner)?.mining_block(),
		})
	}
}

impl Handler for BlocksHandler {
	fn get(&self, _req: Request<Body>) -> ResponseFuture {
		result_to_response(self.get_blocks())
	}
}
