// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Event param specification.

#[cfg(feature = "full-serde")]
use serde::{Deserialize, Serialize};

use crate::ParamType;

/// Event param specification.
#[cfg_attr(feature = "full-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParam {
	/// Param name.
	#[cfg_attr(feature = "full-serde", serde(default))]
	pub name: String,
	/// Param type.
	#[cfg_attr(feature = "full-serde", serde(rename = "type"))]
	pub kind: ParamType,
	/// Indexed flag. If true, the value is stored as a log topic.
	#[cfg_attr(feature = "full-serde", serde(default))]
	pub indexed: bool,
}

impl EventParam {
	/// Type the param has as a topic.
	///
	/// Value types are stored as is; anything else is stored as the
	/// Keccak-256 hash of its encoding and decodes as `bytes32`.
	pub fn topic_kind(&self) -> ParamType {
		match self.kind {
			ParamType::Address
			| ParamType::Bool
			| ParamType::Int(_)
			| ParamType::Uint(_)
			| ParamType::FixedBytes(_)
			| ParamType::Function => self.kind.clone(),
			_ => ParamType::FixedBytes(32),
		}
	}
}
