// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Operation type.

use serde::{Deserialize, Serialize};

use crate::{Event, Function};

/// Operation type.
///
/// Constructors, custom errors and the special functions carry no call
/// semantics here and are only recognized so that complete ABIs load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
	/// Contract constructor.
	Constructor,
	/// Contract function.
	Function(Function),
	/// Contract event.
	Event(Event),
	/// Custom error.
	Error,
	/// Fallback function.
	Fallback,
	/// Receive function.
	Receive,
}
