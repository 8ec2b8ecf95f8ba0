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

//! Server configuration and the top-level server error type.

use thiserror::Error;

use crate::api;
use crate::chain;
use crate::p2p;
use crate::pool::PoolError;

/// Errors surfacing out of the server. Everything here is fatal at
/// startup; the process cannot operate without a chain and its listeners.
#[derive(Error, Debug)]
pub enum Error {
	/// Error from the HTTP boundary or client.
	#[error("API error: {0}")]
	API(#[from] api::Error),
	/// Error from the chain store.
	#[error("chain error: {0}")]
	Chain(#[from] chain::Error),
	/// Error from the gossip layer.
	#[error("p2p error: {0}")]
	P2P(#[from] p2p::Error),
	/// Error from the pool or miner.
	#[error("pool error: {0}")]
	Pool(#[from] PoolError),
	/// A seed node answered the join protocol with something unusable.
	#[error("malformed seed response: {0}")]
	SeedResponse(String),
}

/// Full node configuration, assembled from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
	/// HTTP API listen port.
	pub http_port: u16,
	/// Second listen port, the one peers are told to dial. Serves the same
	/// routes as the HTTP port.
	pub ws_port: u16,
	/// HTTP address ("host:port") of the seed peer to join through. None
	/// makes this node a root starting a fresh chain.
	pub seed: Option<String>,
}

impl Default for ServerConfig {
	fn default() -> ServerConfig {
		ServerConfig {
			http_port: 8000,
			ws_port: 9000,
			seed: None,
		}
	}
}
