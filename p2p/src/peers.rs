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

//! Registry of the currently connected peers and event broadcast across
//! them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::core::{Block, Fact};
use crate::msg::PeerMessage;
use crate::peer::Peer;
use crate::types::PeerAddr;
use crate::util::RwLock;

/// The set of live peer links, keyed by address. Addresses are unique:
/// re-registering an address only replaces its link. A node's own address
/// is never stored here. Any send or receive failure on a link removes
/// that peer; there are no retries.
pub struct Peers {
	peers: RwLock<HashMap<PeerAddr, Arc<Peer>>>,
}

impl Peers {
	/// An empty registry.
	pub fn new() -> Peers {
		Peers {
			peers: RwLock::new(HashMap::new()),
		}
	}

	/// Registers a connected peer. An existing link under the same address
	/// is replaced; closing its send queue winds the old tasks down.
	pub fn add_connected(&self, peer: Arc<Peer>) {
		let mut peers = self.peers.write();
		let addr = peer.addr.clone();
		if peers.insert(addr.clone(), peer).is_some() {
			debug!("peer {}: link replaced", addr);
		} else {
			info!("peer {} connected, {} total", addr, peers.len());
		}
	}

	/// Removes a peer, usually on an I/O error on its link. Safe to call
	/// repeatedly from both halves of a failing link.
	pub fn remove(&self, addr: &PeerAddr) {
		let mut peers = self.peers.write();
		if peers.remove(addr).is_some() {
			info!("peer {} removed, {} remaining", addr, peers.len());
		}
	}

	/// Whether a peer is registered under this address.
	pub fn is_known(&self, addr: &PeerAddr) -> bool {
		self.peers.read().contains_key(addr)
	}

	/// Addresses of every connected peer.
	pub fn connected_addrs(&self) -> Vec<PeerAddr> {
		self.peers.read().keys().cloned().collect()
	}

	/// Number of connected peers.
	pub fn peer_count(&self) -> usize {
		self.peers.read().len()
	}

	/// Announces a mined block and its successor mining block to every
	/// connected peer.
	pub fn broadcast_block(&self, valid_block: &Block, mining_block: &Block) {
		debug!(
			"broadcasting block {} at height {} to {} peers",
			valid_block.hash,
			valid_block.index,
			self.peer_count()
		);
		self.broadcast(&PeerMessage::Block {
			valid_block: valid_block.clone(),
			mining_block: mining_block.clone(),
		});
	}

	/// Announces a locally ingested fact to every connected peer.
	pub fn broadcast_fact(&self, fact: &Fact) {
		debug!("broadcasting fact {} to {} peers", fact.id, self.peer_count());
		self.broadcast(&PeerMessage::Fact { fact: fact.clone() });
	}

	// Walks a snapshot of the registry so removals don't invalidate the
	// iteration. A failed send removes that peer and the walk continues;
	// one dead or slow peer never costs the others their delivery.
	fn broadcast(&self, msg: &PeerMessage) {
		let snapshot: Vec<Arc<Peer>> = self.peers.read().values().cloned().collect();
		for peer in snapshot {
			if let Err(e) = peer.send(msg) {
				debug!("peer {}: dropping on send error: {}", peer.addr, e);
				self.remove(&peer.addr);
			}
		}
	}
}
