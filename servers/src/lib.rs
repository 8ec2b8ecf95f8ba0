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

//! The factnet server implementation, glues the different parts of the
//! system (chain, fact pool, miner, gossip network, HTTP boundary) together
//! and runs them as one node.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use factnet_api as api;
use factnet_chain as chain;
use factnet_core as core;
use factnet_p2p as p2p;
use factnet_pool as pool;
use factnet_util as util;

pub mod common;
mod factnet;

pub use crate::common::types::{Error, ServerConfig};
pub use crate::factnet::server::Server;
