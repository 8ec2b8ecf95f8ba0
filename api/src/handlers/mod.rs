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

//! Handlers for every route the node serves, and the router wiring them
//! together.

mod blocks_api;
mod facts_api;
mod mine_api;
mod peers_api;
mod utils;

use self::blocks_api::BlocksHandler;
use self::facts_api::FactHandler;
use self::mine_api::MineHandler;
use self::peers_api::{NodesHandler, PeerWebsocketHandler};
use crate::chain;
use crate::p2p;
use crate::pool::{FactPool, Miner};
use crate::router::{Router, RouterError};
use crate::util::RwLock;
use std::sync::Arc;

/// Builds the router serving the node's public endpoints. Registered on
/// both listeners, so the peer endpoint is reachable on the HTTP port as
/// well, which the join protocol relies on when dialing a seed. All
/// handlers use `Weak` references so a server shutdown can actually tear
/// the shared state down.
pub fn build_router(
	chain: Arc<chain::Chain>,
	pool: Arc<RwLock<FactPool>>,
	miner: Arc<Miner>,
	p2p_server: Arc<p2p::Server>,
) -> Result<Router, RouterError> {
	let mut router = Router::new();
	router.add_route(
		"/blocks",
		Arc::new(BlocksHandler {
			chain: Arc::downgrade(&chain),
			miner: Arc::downgrade(&miner),
		}),
	)?;
	router.add_route(
		"/fact",
		Arc::new(FactHandler {
			chain: Arc::downgrade(&chain),
			pool: Arc::downgrade(&pool),
		}),
	)?;
	router.add_route(
		"/mine",
		Arc::new(MineHandler {
			miner: Arc::downgrade(&miner),
		}),
	)?;
	router.add_route(
		"/nodes",
		Arc::new(NodesHandler {
			peers: Arc::downgrade(&p2p_server.peers),
		}),
	)?;
	let peer_handler = Arc::new(PeerWebsocketHandler {
		p2p: Arc::downgrade(&p2p_server),
	});
	router.add_route("/peer", peer_handler.clone())?;
	router.add_route("/p2p", peer_handler)?;
	Ok(router)
}
