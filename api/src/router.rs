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

//! Request router: fixed paths mapped to handlers, dispatched by method.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{self, Future};
use hyper::{Body, Method, Request, Response, StatusCode};
use std::pin::Pin;
use thiserror::Error;

/// Boxed response future returned by all handlers.
pub type ResponseFuture =
	Pin<Box<dyn Future<Output = Result<Response<Body>, hyper::Error>> + Send>>;

/// Implemented by everything the router can dispatch to. Handlers override
/// the methods they serve; anything else is a 404.
pub trait Handler: Send + Sync {
	/// Serve a GET request.
	fn get(&self, _req: Request<Body>) -> ResponseFuture {
		not_found()
	}

	/// Serve a POST request.
	fn post(&self, _req: Request<Body>) -> ResponseFuture {
		not_found()
	}

	/// Dispatch on the request method.
	fn call(&self, req: Request<Body>) -> ResponseFuture {
		match *req.method() {
			Method::GET => self.get(req),
			Method::POST => self.post(req),
			_ => not_found(),
		}
	}
}

/// Errors raised while assembling the route table.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum RouterError {
	/// Two handlers registered under the same route.
	#[error("route {0} already registered")]
	RouteAlreadyExists(String),
}

/// A shareable handler reference.
pub type HandlerObj = Arc<dyn Handler>;

/// Fixed-path router. Paths match exactly, ignoring a trailing slash.
#[derive(Clone)]
pub struct Router {
	routes: HashMap<String, HandlerObj>,
}

impl Router {
	/// An empty router, every request 404s.
	pub fn new() -> Router {
		Router {
			routes: HashMap::new(),
		}
	}

	/// Registers a handler under a path.
	pub fn add_route(&mut self, route: &str, handler: HandlerObj) -> Result<(), RouterError> {
		if self.routes.contains_key(route) {
			return Err(RouterError::RouteAlreadyExists(route.to_owned()));
		}
		self.routes.insert(route.to_owned(), handler);
		Ok(())
	}

	/// Dispatches a request to the handler registered for its path.
	pub fn handle(&self, req: Request<Body>) -> ResponseFuture {
		let trimmed = req.uri().path().trim_end_matches('/');
		let path = if trimmed.is_empty() { "/" } else { trimmed };
		match self.routes.get(path) {
			Some(handler) => handler.call(req),
			None => not_found(),
		}
	}
}

/// Bare 404 response future.
pub fn not_found() -> ResponseFuture {
	let mut response = Response::new(Body::empty());
	*response.status_mut() = StatusCode::NOT_FOUND;
	Box::pin(future::ok(response))
}
