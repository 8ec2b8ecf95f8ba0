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

//! The peer-to-peer server: owns the runtime all link tasks run on, dials
//! outbound peers and adopts inbound connections upgraded by the HTTP
//! listeners.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::runtime::{Builder, Runtime};
use tokio_tungstenite::{connect_async, WebSocketStream};

use crate::peer::Peer;
use crate::peers::Peers;
use crate::types::{Error, NetAdapter, PeerAddr};

/// Server for the gossip side of the node. Outbound links are dialed here;
/// inbound links arrive through the WebSocket upgrade path of the HTTP
/// boundary and are only adopted here. All link tasks run on a dedicated
/// runtime so peer traffic is independent of the listeners' lifecycles.
pub struct Server {
	/// Registry of live links.
	pub peers: Arc<Peers>,
	adapter: Arc<dyn NetAdapter>,
	runtime: Runtime,
}

impl Server {
	/// Builds the p2p layer with its own multi-threaded runtime.
	pub fn new(adapter: Arc<dyn NetAdapter>) -> Result<Server, Error> {
		let runtime = Builder::new_multi_thread()
			.thread_name("p2p")
			.enable_all()
			.build()?;
		Ok(Server {
			peers: Arc::new(Peers::new()),
			adapter,
			runtime,
		})
	}

	/// Dials a peer and registers the link, blocking until the WebSocket
	/// handshake completes. Used by the join protocol at startup, where a
	/// failure to reach any advertised peer is fatal.
	pub fn connect(&self, addr: &PeerAddr) -> Result<(), Error> {
		if self.peers.is_known(addr) {
			debug!("peer {}: already connected, not dialing", addr);
			return Ok(());
		}
		let (ws, _response) = self.runtime.block_on(connect_async(addr.as_str()))?;
		let peer = Peer::start(
			ws,
			addr.clone(),
			self.adapter.clone(),
			Arc::downgrade(&self.peers),
			self.runtime.handle(),
		);
		self.peers.add_connected(peer);
		Ok(())
	}

	/// Adopts an inbound connection already upgraded to a WebSocket by one
	/// of the HTTP listeners. The peer's address is learned from the link's
	/// remote socket address.
	pub fn add_inbound<S>(&self, ws: WebSocketStream<S>, remote: SocketAddr)
	where
		S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
	{
		let addr = PeerAddr::from_socket(remote);
		let peer = Peer::start(
			ws,
			addr,
			self.adapter.clone(),
			Arc::downgrade(&self.peers),
			self.runtime.handle(),
		);
		self.peers.add_connected(peer);
	}

	/// Drops every peer link. Writer tasks notice their queues closing and
	/// shut the sockets down.
	pub fn stop(&self) {
		for addr in self.peers.connected_addrs() {
			self.peers.remove(&addr);
		}
	}
}
