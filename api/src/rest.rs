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

//! RESTful API server driving a router from a dedicated thread with its own
//! runtime, with basic start and shutdown control. The node runs two of
//! these, one per listen port, over the same router.

use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;

use hyper::server::conn::AddrStream;
use hyper::service::{make_service_fn, service_fn};
use hyper::Server;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

use crate::error::Error;
use crate::router::Router;

/// Remote socket address of the connection a request arrived on, stashed
/// into request extensions so the WebSocket upgrade handler can identify
/// the peer behind an inbound link.
#[derive(Clone, Copy, Debug)]
pub struct RemoteAddr(pub SocketAddr);

/// HTTP server for a router, one listener per instance.
pub struct ApiServer {
	shutdown_sender: Option<oneshot::Sender<()>>,
}

impl ApiServer {
	/// Creates a new API server, not listening yet.
	pub fn new() -> ApiServer {
		ApiServer {
			shutdown_sender: None,
		}
	}

	/// Binds `addr` and starts serving `router` from a dedicated thread.
	/// Binding happens on the caller's thread so a port clash surfaces as a
	/// startup error instead of a background complaint.
	pub fn start(
		&mut self,
		addr: SocketAddr,
		router: Router,
	) -> Result<thread::JoinHandle<()>, Error> {
		if self.shutdown_sender.is_some() {
			return Err(Error::Internal(
				"API server already running".to_owned(),
			));
		}

		let listener = TcpListener::bind(addr)
			.map_err(|e| Error::Internal(format!("can't bind to {}: {}", addr, e)))?;
		listener
			.set_nonblocking(true)
			.map_err(|e| Error::Internal(format!("can't configure listener: {}", e)))?;

		let (tx, rx) = oneshot::channel::<()>();
		self.shutdown_sender = Some(tx);

		thread::Builder::new()
			.name("apis".to_owned())
			.spawn(move || {
				let runtime = match Builder::new_multi_thread().enable_all().build() {
					Ok(rt) => rt,
					Err(e) => {
						error!("failed to build API runtime: {}", e);
						return;
					}
				};
				runtime.block_on(async move {
					let router = Arc::new(router);
					let make_service = make_service_fn(move |conn: &AddrStream| {
						let router = router.clone();
						let remote = conn.remote_addr();
						async move {
							Ok::<_, Infallible>(service_fn(move |mut req| {
								let router = router.clone();
								req.extensions_mut().insert(RemoteAddr(remote));
								async move { router.handle(req).await }
							}))
						}
					});
					let server = match Server::from_tcp(listener) {
						Ok(builder) => builder.serve(make_service),
						Err(e) => {
							error!("failed to start API server: {}", e);
							return;
						}
					};
					let graceful = server.with_graceful_shutdown(async {
						rx.await.ok();
					});
					if let Err(e) = graceful.await {
						error!("API server error: {}", e);
					}
				});
			})
			.map_err(|e| Error::Internal(format!("can't spawn API thread: {}", e)))
	}

	/// Asks the server to shut down gracefully.
	pub fn stop(&mut self) -> bool {
		match self.shutdown_sender.take() {
			Some(tx) => tx.send(()).is_ok(),
			None => {
				error!("API server was not running");
				false
			}
		}
	}
}
