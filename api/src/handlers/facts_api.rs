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
use crate::chain;
use crate::error::Error;
use crate::pool::{FactPool, FactSource};
use crate::router::{Handler, ResponseFuture};
use crate::types::FactListing;
use crate::util::RwLock;
use crate::core::core::Fact;
use crate::web::{error_response, just_response, parse_body, result_to_response};

/// Fact queries and fact ingestion.
/// GET /fact?id=<block height> returns the facts committed by that block.
/// POST /fact ingests the request body, any JSON at all, as a new fact.
pub struct FactHandler {
	/// The chain store, for fact queries.
	pub chain: Weak<chain::Chain>,
	/// The pending-fact buffer, for ingestion.
	pub pool: Weak<RwLock<FactPool>>,
}

impl FactHandler {
	fn get_facts(&self, req: &Request<Body>) -> Result<FactListing, Error> {
		let id = query_param(req.uri().query(), "id")
			.ok_or_else(|| Error::Argument("missing id parameter".to_owned()))?;
		let height: u64 = id
			.parse()
			.map_err(|e| Error::Argument(format!("invalid block id {}: {}", id, e)))?;
		let block = w(&self.chain)?
			.get(height)
			.map_err(|e| Error::Argument(e.to_string()))?;
		Ok(FactListing { facts: block.facts })
	}
}

// Ingestion assigns the fact id, the moment of ingestion rendered as a
// monotonic timestamp, then buffers the fact. Pool-side the fact also gets
// announced to peers since this source is local.
fn ingest(pool: &Weak<RwLock<FactPool>>, payload: serde_json::Value) -> Result<(), Error> {
	let fact = Fact::new(payload);
	debug!("api: ingesting fact {}", fact.id);
	w(pool)?.write().add(FactSource::Api, fact);
	Ok(())
}

impl Handler for FactHandler {
	fn get(&self, req: Request<Body>) -> ResponseFuture {
		result_to_response(self.get_facts(&req))
	}

	fn post(&self, req: Request<Body>) -> ResponseFuture {
		let pool = self.pool.clone();
		Box::pin(async move {
			let outcome = match parse_body(req).await {
				Ok(payload) => ingest(&pool, payload),
				Err(e) => Err(e),
			};
			match outcome {
				Ok(()) => Ok(just_response(StatusCode::OK, "")),
				Err(e) => error_response(e).await,
			}
		})
	}
}
