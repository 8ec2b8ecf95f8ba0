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

//! High level JSON/HTTP client. Used by the join protocol to bootstrap a
//! node's chain and peer list from a seed, which happens on the main thread
//! before anything else runs, so requests are blocking by design.

use hyper::{body, Client, Uri};
use serde::de::DeserializeOwned;
use tokio::runtime::Builder;

use crate::error::Error;

/// Helper function to easily issue a HTTP GET request against a given URL
/// that returns a JSON object. Handles request building, JSON
/// deserialization and response code checking.
pub fn get<T>(url: &str) -> Result<T, Error>
where
	T: DeserializeOwned,
{
	let uri: Uri = url
		.parse()
		.map_err(|e| Error::Argument(format!("invalid url {}: {}", url, e)))?;
	let runtime = Builder::new_current_thread()
		.enable_all()
		.build()
		.map_err(|e| Error::Internal(format!("can't build client runtime: {}", e)))?;

	runtime.block_on(async {
		let client = Client::new();
		let resp = client
			.get(uri)
			.await
			.map_err(|e| Error::Request(format!("GET {} failed: {}", url, e)))?;
		if !resp.status().is_success() {
			return Err(Error::Request(format!(
				"GET {} returned {}",
				url,
				resp.status()
			)));
		}
		let raw = body::to_bytes(resp.into_body())
			.await
			.map_err(|e| Error::Request(format!("failed to read response from {}: {}", url, e)))?;
		serde_json::from_slice(&raw)
			.map_err(|e| Error::Request(format!("invalid JSON from {}: {}", url, e)))
	})
}
