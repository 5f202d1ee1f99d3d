// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Function param.

#[cfg(feature = "full-serde")]
use serde::{Deserialize, Serialize};

use crate::ParamType;

/// Function param.
#[cfg_attr(feature = "full-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
	/// Param name.
	#[cfg_attr(feature = "full-serde", serde(default))]
	pub name: String,
	/// Param type.
	#[cfg_attr(feature = "full-serde", serde(rename = "type"))]
	pub kind: ParamType,
}
