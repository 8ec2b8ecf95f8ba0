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

//! Base types for the peer-to-peer layer.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::core::core::{Block, Fact};

/// Canonical, dialable WebSocket address of a peer. Doubles as the identity
/// of the peer in the registry.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerAddr(pub String);

impl PeerAddr {
	/// Peer endpoint address derived from a raw socket address, as used for
	/// inbound links where the socket is all we know about the remote end.
	pub fn from_socket(addr: SocketAddr) -> PeerAddr {
		PeerAddr(format!("ws://{}/peer", addr))
	}

	/// Peer endpoint address reachable at `host_port` ("host:port").
	pub fn from_host_port(host_port: &str) -> PeerAddr {
		PeerAddr(format!("ws://{}/peer", host_port))
	}

	/// The address as a dialable URL string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PeerAddr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Errors from the peer-to-peer layer. Per-peer errors get the peer
/// removed and are otherwise absorbed at the gossip boundary.
#[derive(Error, Debug)]
pub enum Error {
	/// WebSocket-level failure on a link.
	#[error("connection error: {0}")]
	Connection(#[from] tungstenite::Error),
	/// Underlying I/O failure, typically while standing up the runtime.
	#[error("i/o error: {0}")]
	Io(#[from] io::Error),
	/// An envelope that does not decode into a known message.
	#[error("malformed peer message: {0}")]
	BadMessage(String),
	/// JSON (de)serialization failure on an envelope.
	#[error("peer message codec error: {0}")]
	Codec(#[from] serde_json::Error),
	/// A peer's outbound queue filled up, the peer is too slow to keep up.
	#[error("peer send queue full")]
	SendQueueFull,
}

/// Bridge from the network to the chain-facing side of the node. The reader
/// task of every link dispatches received envelopes through this trait.
pub trait NetAdapter: Sync + Send {
	/// A peer announced a block it accepted together with the mining block
	/// it built on top. Returns whether the pair was adopted locally.
	fn block_received(&self, valid_block: Block, mining_block: Block, peer: &PeerAddr) -> bool;

	/// A peer relayed a newly ingested fact.
	fn fact_received(&self, fact: Fact, peer: &PeerAddr);
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn peer_addr_forms() {
		let addr = PeerAddr::from_host_port("localhost:9000");
		assert_eq!(addr.as_str(), "ws://localhost:9000/peer");

		let sock: SocketAddr = "127.0.0.1:9001".parse().unwrap();
		assert_eq!(
			PeerAddr::from_socket(sock),
			PeerAddr("ws://127.0.0.1:9001/peer".to_owned())
		);
	}
}
