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

//! A single live peer link: a bounded outbound queue drained by a writer
//! task, and a reader task dispatching inbound envelopes to the rest of the
//! node. Either task failing winds the link down and removes the peer.

use std::sync::{Arc, Weak};

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::msg::PeerMessage;
use crate::peers::Peers;
use crate::types::{Error, NetAdapter, PeerAddr};

// Outbound frames a slow peer may fall behind by before we drop it. Keeps
// one stalled link from ever blocking the miner or the broadcast walk.
const SEND_QUEUE_LEN: usize = 128;

/// Handle to a live peer link. The socket itself lives inside the reader
/// and writer tasks; the handle only carries the address and the send
/// queue. Dropping the last handle closes the queue, which winds the
/// writer down and closes the socket.
pub struct Peer {
	/// Canonical address of the remote end.
	pub addr: PeerAddr,
	send_tx: mpsc::Sender<Message>,
}

impl Peer {
	/// Wraps an established WebSocket, spawning the link's reader and
	/// writer tasks on the given runtime.
	pub fn start<S>(
		ws: WebSocketStream<S>,
		addr: PeerAddr,
		adapter: Arc<dyn NetAdapter>,
		peers: Weak<Peers>,
		handle: &Handle,
	) -> Arc<Peer>
	where
		S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
	{
		let (send_tx, send_rx) = mpsc::channel(SEND_QUEUE_LEN);
		let (sink, stream) = ws.split();
		let peer = Arc::new(Peer {
			addr: addr.clone(),
			send_tx,
		});
		handle.spawn(write_loop(send_rx, sink, addr.clone(), peers.clone()));
		handle.spawn(read_loop(stream, addr, adapter, peers));
		peer
	}

	/// Queues an envelope for the writer task. A closed or full queue
	/// counts as a dead link and gets the peer removed by the caller.
	pub fn send(&self, msg: &PeerMessage) -> Result<(), Error> {
		let frame = Message::Text(msg.to_json()?);
		self.send_tx
			.try_send(frame)
			.map_err(|_| Error::SendQueueFull)
	}
}

// Drains the send queue onto the socket. Exits when the queue closes (peer
// was removed from the registry) or a write fails.
async fn write_loop<S>(
	mut send_rx: mpsc::Receiver<Message>,
	mut sink: SplitSink<WebSocketStream<S>, Message>,
	addr: PeerAddr,
	peers: Weak<Peers>,
) where
	S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
	while let Some(frame) = send_rx.recv().await {
		if let Err(e) = sink.send(frame).await {
			debug!("peer {}: write failed: {}", addr, e);
			break;
		}
	}
	let _ = sink.close().await;
	if let Some(peers) = peers.upgrade() {
		peers.remove(&addr);
	}
}

// Blocks on the socket and dispatches each received envelope. Exits on any
// read error or on a close frame, removing the peer on the way out.
async fn read_loop<S>(
	mut stream: SplitStream<WebSocketStream<S>>,
	addr: PeerAddr,
	adapter: Arc<dyn NetAdapter>,
	peers: Weak<Peers>,
) where
	S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
	while let Some(frame) = stream.next().await {
		let frame = match frame {
			Ok(frame) => frame,
			Err(e) => {
				debug!("peer {}: read failed: {}", addr, e);
				break;
			}
		};
		match frame {
			Message::Text(raw) => match PeerMessage::from_json(&raw) {
				Ok(PeerMessage::Block {
					valid_block,
					mining_block,
				}) => {
					adapter.block_received(valid_block, mining_block, &addr);
				}
				Ok(PeerMessage::Fact { fact }) => {
					adapter.fact_received(fact, &addr);
				}
				Err(e) => {
					debug!("peer {}: bad envelope: {}", addr, e);
				}
			},
			Message::Close(_) => break,
			// Control frames are handled by the protocol layer, binary
			// frames are not part of the protocol.
			_ => {}
		}
	}
	if let Some(peers) = peers.upgrade() {
		peers.remove(&addr);
	}
}
