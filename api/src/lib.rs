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

//! The HTTP boundary of the node: query and submission endpoints for
//! clients, and the WebSocket upgrade path peers dial, all served over
//! hyper. Both node listeners serve the same router.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use factnet_chain as chain;
use factnet_core as core;
use factnet_p2p as p2p;
use factnet_pool as pool;
use factnet_util as util;

pub mod client;
mod error;
mod handlers;
mod rest;
mod router;
mod types;
mod web;

pub use crate::error::Error;
pub use crate::handlers::build_router;
pub use crate::rest::{ApiServer, RemoteAddr};
pub use crate::router::{Handler, HandlerObj, ResponseFuture, Router, RouterError};
pub use crate::types::*;
pub use crate::web::*;
