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

//! Join protocol for a node started against a seed: bootstrap the peer
//! list and chain over plain HTTP, then dial every known peer and the seed
//! itself. Every failure in here is fatal, a node cannot operate without
//! an adopted chain.

use crate::api;
use crate::common::types::Error;
use crate::core::core::Block;
use crate::p2p;

/// Runs the HTTP half of the join protocol against the seed's address
/// ("host:port", from the command line): first the seed's peer list, then
/// its chain and current mining block.
pub fn fetch_state(seed_addr: &str) -> Result<(Vec<String>, Vec<Block>, Block), Error> {
	info!("joining the network through seed {}", seed_addr);
	let nodes: api::NodeListing = api::client::get(&format!("http://{}/nodes", seed_addr))?;
	let blocks: api::BlockListing = api::client::get(&format!("http://{}/blocks", seed_addr))?;
	info!(
		"seed {} advertises {} peers and {} blocks",
		seed_addr,
		nodes.nodes.len(),
		blocks.blockchain.len()
	);
	Ok((nodes.nodes, blocks.blockchain, blocks.mining_block))
}

/// Dials every advertised peer address except this node's own origin, then
/// the seed itself. The seed serves its peer endpoint on its HTTP port as
/// well, so its HTTP address is dialable directly.
pub fn connect_to_network(
	seed_addr: &str,
	own_ws_port: u16,
	addrs: &[String],
	p2p_server: &p2p::Server,
) -> Result<(), Error> {
	let own_addr = p2p::PeerAddr::from_host_port(&format!("localhost:{}", own_ws_port));

	for addr in addrs {
		let addr = p2p::PeerAddr(addr.clone());
		if addr == own_addr {
			continue;
		}
		info!("dialing advertised peer {}", addr);
		p2p_server.connect(&addr)?;
	}

	let seed_peer = p2p::PeerAddr::from_host_port(seed_addr);
	info!("dialing seed {}", seed_peer);
	p2p_server.connect(&seed_peer)?;
	Ok(())
}
