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

//! Error types for chain acceptance.

use thiserror::Error;

use crate::core::core::block;

/// Chain-level errors. Rejections are silent at this layer; callers decide
/// what to log.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
	/// The candidate failed block validation against the tip.
	#[error("invalid block: {0}")]
	InvalidBlock(#[from] block::Error),
	/// No block at the requested height.
	#[error("no block at height {0}")]
	OutOfRange(u64),
	/// A chain adopted from a peer failed whole-chain validation.
	#[error("invalid chain: {0}")]
	InvalidChain(String),
}
