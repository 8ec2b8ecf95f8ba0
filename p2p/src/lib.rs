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

//! Networking code to spread facts and freshly mined blocks between nodes
//! over persistent, bidirectional WebSocket links carrying JSON envelopes.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use factnet_core as core;
use factnet_util as util;

pub mod msg;
mod peer;
mod peers;
mod serv;
pub mod types;

pub use crate::msg::PeerMessage;
pub use crate::peer::Peer;
pub use crate::peers::Peers;
pub use crate::serv::Server;
pub use crate::types::{Error, NetAdapter, PeerAddr};
