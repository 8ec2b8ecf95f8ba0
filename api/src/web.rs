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

//! Helpers to parse request bodies and build JSON responses.

use crate::error::Error;
use crate::router::ResponseFuture;
use crate::types::ErrorBody;
use futures::future::ok;
use hyper::{body, Body, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Parse a request body as JSON.
pub async fn parse_body<T>(req: Request<Body>) -> Result<T, Error>
where
	for<'de> T: Deserialize<'de> + Send + 'static,
{
	let raw = body::to_bytes(req.into_body())
		.await
		.map_err(|e| Error::Request(format!("failed to read request: {}", e)))?;
	serde_json::from_slice(&raw).map_err(|e| Error::Request(format!("invalid request body: {}", e)))
}

/// Utility to serialize a struct into JSON and produce a sensible Response
/// out of it.
pub fn json_response<T>(s: &T) -> ResponseFuture
where
	T: Serialize,
{
	match serde_json::to_string(s) {
		Ok(json) => response(StatusCode::OK, json),
		Err(_) => response(StatusCode::INTERNAL_SERVER_ERROR, ""),
	}
}

/// Text response as HTTP response
pub fn just_response<T: Into<Body> + Debug>(status: StatusCode, text: T) -> Response<Body> {
	let mut resp = Response::new(text.into());
	*resp.status_mut() = status;
	resp
}

/// Text response as future
pub fn response<T: Into<Body> + Debug>(status: StatusCode, text: T) -> ResponseFuture {
	Box::pin(ok(just_response(status, text)))
}

/// Maps a handler result onto a response; errors become a 500 carrying a
/// JSON `{ "error": ... }` body.
pub fn result_to_response<T>(res: Result<T, Error>) -> ResponseFuture
where
	T: Serialize,
{
	match res {
		Ok(s) => json_response(&s),
		Err(e) => error_response(e),
	}
}

/// 500 response with a JSON `{ "error": ... }` body.
pub fn error_response(e: Error) -> ResponseFuture {
	let body = ErrorBody {
		error: e.to_string(),
	};
	let json = serde_json::to_string(&body)
		.unwrap_or_else(|_| "{\"error\":\"internal error\"}".to_owned());
	response(StatusCode::INTERNAL_SERVER_ERROR, json)
}
