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

//! Factnet server implementation, glues the different parts of the system
//! (mostly the gossip layer, the chain and the fact pool) and acts as a
//! facade.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api;
use crate::chain;
use crate::common::adapters::{
	MinerToNetAdapter, NetToChainAdapter, PoolToChainAdapter, PoolToNetAdapter,
};
use crate::common::types::{Error, ServerConfig};
use crate::factnet::seed;
use crate::p2p;
use crate::pool::{FactPool, Miner};
use crate::util::{RwLock, StopState};

/// Factnet server holding internal structures.
pub struct Server {
	/// Server config.
	pub config: ServerConfig,
	/// The chain.
	pub chain: Arc<chain::Chain>,
	/// In-memory fact pool.
	pub pool: Arc<RwLock<FactPool>>,
	/// Owner of the mining block.
	pub miner: Arc<Miner>,
	/// Handle to the gossip layer.
	pub p2p: Arc<p2p::Server>,
	/// Stop flag shared with the signal handler.
	pub stop_state: Arc<StopState>,
	api_server: api::ApiServer,
	ws_server: api::ApiServer,
}

impl Server {
	/// Instantiates and starts a new server: state, gossip, the join
	/// protocol when a seed is configured, then both listeners. Any error
	/// out of here is fatal to the process.
	pub fn start(config: ServerConfig) -> Result<Server, Error> {
		let pool_chain_adapter = Arc::new(PoolToChainAdapter::new());
		let pool_net_adapter = Arc::new(PoolToNetAdapter::new());
		let miner_net_adapter = Arc::new(MinerToNetAdapter::new());

		let pool = Arc::new(RwLock::new(FactPool::new(pool_net_adapter.clone())));

		// A root seeds a fresh genesis. A joining node adopts the seed's
		// chain and mining block before anything is served, and remembers
		// the advertised peers for dialing below.
		let mut advertised_peers = vec![];
		let (chain, adopted_mining_block) = match config.seed {
			Some(ref seed_addr) => {
				let (addrs, blocks, mining_block) = seed::fetch_state(seed_addr)?;
				let chain = Arc::new(chain::Chain::from_blocks(blocks)?);
				if !mining_block.extends(&chain.head()) {
					return Err(Error::SeedResponse(
						"mining block does not extend the chain tip".to_owned(),
					));
				}
				advertised_peers = addrs;
				(chain, Some(mining_block))
			}
			None => (Arc::new(chain::Chain::new()), None),
		};
		pool_chain_adapter.set_chain(&chain);

		let miner = Arc::new(Miner::new(
			pool_chain_adapter.clone(),
			pool.clone(),
			miner_net_adapter.clone(),
		));
		if let Some(mining_block) = adopted_mining_block {
			miner.set_mining_block(mining_block);
		}

		let net_adapter = Arc::new(NetToChainAdapter::new(&miner, &pool));
		let p2p_server = Arc::new(p2p::Server::new(net_adapter)?);
		pool_net_adapter.init(&p2p_server.peers);
		miner_net_adapter.init(&p2p_server.peers);

		// Dial the network before serving clients so gossip flows as soon
		// as the listeners come up.
		if let Some(ref seed_addr) = config.seed {
			seed::connect_to_network(seed_addr, config.ws_port, &advertised_peers, &p2p_server)?;
		}

		let router = api::build_router(
			chain.clone(),
			pool.clone(),
			miner.clone(),
			p2p_server.clone(),
		)
		.map_err(api::Error::from)?;

		let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
		let mut api_server = api::ApiServer::new();
		info!("starting HTTP API server at {}", http_addr);
		api_server.start(http_addr, router.clone())?;

		let ws_addr = SocketAddr::from(([0, 0, 0, 0], config.ws_port));
		let mut ws_server = api::ApiServer::new();
		info!("starting peer endpoint at {}", ws_addr);
		ws_server.start(ws_addr, router)?;

		info!(
			"server started, height {}, mining at complexity {}",
			chain.height(),
			miner.mining_block().complexity
		);

		Ok(Server {
			config,
			chain,
			pool,
			miner,
			p2p: p2p_server,
			stop_state: Arc::new(StopState::new()),
			api_server,
			ws_server,
		})
	}

	/// Stops both listeners and drops every peer link.
	pub fn stop(&mut self) {
		self.p2p.stop();
		self.api_server.stop();
		self.ws_server.stop();
		self.stop_state.stop();
		info!("server stopped");
	}
}
