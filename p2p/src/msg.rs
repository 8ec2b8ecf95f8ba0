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

//! Messages exchanged over peer links: a JSON envelope with an integer
//! `type` discriminator, carrying either a gossiped fact or a freshly mined
//! block paired with its successor mining block.

use crate::core::core::{Block, Fact};
use crate::types::Error;

/// Envelope tag for block announcements.
pub const TYPE_BLOCK: u8 = 0;
/// Envelope tag for fact announcements.
pub const TYPE_FACT: u8 = 1;

/// A gossip event as sent to and received from peers.
#[derive(Clone, Debug, PartialEq)]
pub enum PeerMessage {
	/// A block the sender accepted, with the mining block the sender built
	/// on top of it. Receivers use the latter to resync their own mining
	/// block's position and complexity.
	Block {
		/// The appended block.
		valid_block: Block,
		/// The sender's fresh mining block.
		mining_block: Block,
	},
	/// A fact newly ingested by the sender.
	Fact {
		/// The fact, id and payload as assigned at ingestion.
		fact: Fact,
	},
}

// Wire shape of the envelope: the discriminator plus the union of all
// variant fields, unused siblings omitted on write.
#[derive(Serialize, Deserialize)]
struct Envelope {
	#[serde(rename = "type")]
	msg_type: u8,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	valid_block: Option<Block>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	mining_block: Option<Block>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	fact: Option<Fact>,
}

impl PeerMessage {
	/// Encodes the message as its JSON envelope.
	pub fn to_json(&self) -> Result<String, Error> {
		let envelope = match self {
			PeerMessage::Block {
				valid_block,
				mining_block,
			} => Envelope {
				msg_type: TYPE_BLOCK,
				valid_block: Some(valid_block.clone()),
				mining_block: Some(mining_block.clone()),
				fact: None,
			},
			PeerMessage::Fact { fact } => Envelope {
				msg_type: TYPE_FACT,
				valid_block: None,
				mining_block: None,
				fact: Some(fact.clone()),
			},
		};
		Ok(serde_json::to_string(&envelope)?)
	}

	/// Decodes a JSON envelope. Unknown tags and envelopes missing the
	/// fields their tag requires are errors.
	pub fn from_json(raw: &str) -> Result<PeerMessage, Error> {
		let envelope: Envelope = serde_json::from_str(raw)?;
		match envelope.msg_type {
			TYPE_BLOCK => match (envelope.valid_block, envelope.mining_block) {
				(Some(valid_block), Some(mining_block)) => Ok(PeerMessage::Block {
					valid_block,
					mining_block,
				}),
				_ => Err(Error::BadMessage(
					"block envelope missing valid_block or mining_block".to_owned(),
				)),
			},
			TYPE_FACT => match envelope.fact {
				Some(fact) => Ok(PeerMessage::Fact { fact }),
				None => Err(Error::BadMessage("fact envelope missing fact".to_owned())),
			},
			tag => Err(Error::BadMessage(format!("unknown message type {}", tag))),
		}
	}
}
