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

//! Errors that can be returned by API handlers, the API server and the
//! HTTP client.

use thiserror::Error;

use crate::router::RouterError;

/// API-level errors. Handler errors surface to clients as a 500 with a
/// JSON error body; client errors during join are fatal to the caller.
#[derive(Error, Debug)]
pub enum Error {
	/// Something went wrong on our side.
	#[error("internal error: {0}")]
	Internal(String),
	/// The request carried arguments we cannot work with.
	#[error("bad arguments: {0}")]
	Argument(String),
	/// Failure reading or parsing a request or response body.
	#[error("request error: {0}")]
	Request(String),
	/// Route registration error.
	#[error("router error: {0}")]
	Router(#[from] RouterError),
}
