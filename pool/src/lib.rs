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

//! The fact pool, a mempool of sorts: buffered facts awaiting inclusion in
//! a block, and the miner that promotes the block under construction when
//! an externally submitted nonce satisfies the proof of work.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

use factnet_core as core;
use factnet_util as util;

mod miner;
mod pool;
pub mod types;

pub use crate::miner::{Miner, SubmitOutcome};
pub use crate::pool::FactPool;
pub use crate::types::{BlockChain, FactSource, MinerAdapter, NoopAdapter, PoolAdapter, PoolError};
