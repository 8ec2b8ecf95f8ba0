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

use hyper::{Body, Request, StatusCode};

use super::utils::{query_param, w};
use crate::pool::{Miner, SubmitOutcome};
use crate::router::{Handler, ResponseFuture};
use crate::web::response;

/// Nonce submission. The request returns 200 immediately; whether the
/// nonce won is only observable by polling /blocks.
/// GET /mine?nonce=<s>
pub struct MineHandler {
	/// Owner of the mining block.
	pub miner: Weak<Miner>,
}

impl Handler for MineHandler {
	fn get(&self, req: Request<Body>) -> ResponseFuture {
		let nonce = query_param(req.uri().query(), "nonce").unwrap_or_default();
		let miner = self.miner.clone();
		// The proof-of-work test runs in its own task, the client does not
		// wait on the outcome.
		tokio::spawn(async move {
			let miner = match w(&miner) {
				Ok(miner) => miner,
				Err(_) => return,
			};
			match miner.submit_nonce(&nonce) {
				Ok(SubmitOutcome::Accepted) => {}
				Ok(SubmitOutcome::Rejected) => {
					trace!("mine: nonce {:?} rejected", nonce);
				}
				Err(e) => {
					debug!("mine: submission failed: {}", e);
				}
			}
		});
		response(StatusCode::OK, "")
	}
}
