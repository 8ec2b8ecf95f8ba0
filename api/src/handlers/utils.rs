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

use crate::error::Error;
use std::sync::{Arc, Weak};

// All handlers use `Weak` references instead of `Arc` to avoid cycles that
// can never be destroyed. These helpers reduce the boilerplate of dealing
// with them.

/// Upgrades a weak reference or reports that the server is shutting down.
pub fn w<T>(weak: &Weak<T>) -> Result<Arc<T>, Error> {
	weak.upgrade()
		.ok_or_else(|| Error::Internal("failed to upgrade weak reference".to_owned()))
}

/// First value of a query string parameter, if present.
pub fn query_param(query: Option<&str>, param: &str) -> Option<String> {
	let prefix = format!("{}=", param);
	query?
		.split('&')
		.find_map(|pair| pair.strip_prefix(prefix.as_str()))
		.map(|value| value.to_owned())
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn query_param_extraction() {
		assert_eq!(
			query_param(Some("nonce=abc"), "nonce"),
			Some("abc".to_owned())
		);
		assert_eq!(
			query_param(Some("a=1&nonce=abc&b=2"), "nonce"),
			Some("abc".to_owned())
		);
		assert_eq!(query_param(Some("nonce="), "nonce"), Some("".to_owned()));
		assert_eq!(query_param(Some("other=1"), "nonce"), None);
		assert_eq!(query_param(None, "nonce"), None);
	}
}
