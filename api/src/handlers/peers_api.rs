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

use hyper::header::{HeaderValue, CONNECTION, SEC_WEBSOCKET_ACCEPT, SEC_WEBSOCKET_KEY, UPGRADE};
use hyper::{upgrade, Body, Request, Response, StatusCode};
use tokio_tungstenite::tungstenite::handshake::derive_accept_key;
use tokio_tungstenite::tungstenite::protocol::Role;
use tokio_tungstenite::WebSocketStream;

use super::utils::w;
use crate::error::Error;
use crate::p2p;
use crate::rest::RemoteAddr;
use crate::router::{Handler, ResponseFuture};
use crate::types::NodeListing;
use crate::web::{response, result_to_response};
use futures::future;

/// Addresses of the peers this node is linked with.
/// GET /nodes
pub struct NodesHandler {
	/// The peer registry.
	pub peers: Weak<p2p::Peers>,
}

impl NodesHandler {
	fn get_nodes(&self) -> Result<NodeListing, Error> {
		let nodes = w(&self.peers)?
			.connected_addrs()
			.iter()
			.map(|addr| addr.to_string())
			.collect();
		Ok(NodeListing { nodes })
	}
}

impl Handler for NodesHandler {
	fn get(&self, _req: Request<Body>) -> ResponseFuture {
		result_to_response(self.get_nodes())
	}
}

/// Upgrades GET /peer (or its /p2p alias) into a gossip link and hands it
/// to the p2p server. The 101 goes out first; hyper performs the actual
/// protocol switch afterwards, which is when the spawned task picks the
/// connection up.
pub struct PeerWebsocketHandler {
	/// The p2p server adopting inbound links.
	pub p2p: Weak<p2p::Server>,
}

impl Handler for PeerWebsocketHandler {
	fn get(&self, mut req: Request<Body>) -> ResponseFuture {
		let accept_key = match req.headers().get(SEC_WEBSOCKET_KEY) {
			Some(key) => derive_accept_key(key.as_bytes()),
			None => return response(StatusCode::BAD_REQUEST, "missing websocket key"),
		};
		let remote = match req.extensions().get::<RemoteAddr>() {
			Some(remote) => remote.0,
			None => return response(StatusCode::INTERNAL_SERVER_ERROR, "no remote address"),
		};

		let p2p = self.p2p.clone();
		tokio::spawn(async move {
			match upgrade::on(&mut req).await {
				Ok(upgraded) => {
					let ws =
						WebSocketStream::from_raw_socket(upgraded, Role::Server, None).await;
					if let Ok(p2p) = w(&p2p) {
						debug!("peer upgrade complete for {}", remote);
						p2p.add_inbound(ws, remote);
					}
				}
				Err(e) => debug!("peer upgrade failed for {}: {}", remote, e),
			}
		});

		let mut resp = Response::new(Body::empty());
		*resp.status_mut() = StatusCode::SWITCHING_PROTOCOLS;
		resp.headers_mut()
			.insert(UPGRADE, HeaderValue::from_static("websocket"));
		resp.headers_mut()
			.insert(CONNECTION, HeaderValue::from_static("Upgrade"));
		match HeaderValue::from_str(&accept_key) {
			Ok(value) => {
				resp.headers_mut().insert(SEC_WEBSOCKET_ACCEPT, value);
			}
			Err(_) => return response(StatusCode::BAD_REQUEST, "invalid websocket key"),
		}
		Box::pin(future::ok(resp))
	}
}
