// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Contract function call builder.

#[cfg(feature = "full-serde")]
use serde::{Deserialize, Serialize};

use crate::{
	decode, encode,
	signature::short_signature,
	util::{bytes_to_hex, hex_to_bytes},
	Bytes, Param, ParamType, Result, Selector, StateMutability, Value,
};

/// Contract function specification.
#[cfg_attr(feature = "full-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
	/// Function name.
	#[cfg_attr(feature = "full-serde", serde(deserialize_with = "crate::util::sanitize_name::deserialize"))]
	pub name: String,
	/// Function input.
	pub inputs: Vec<Param>,
	/// Function output.
	#[cfg_attr(feature = "full-serde", serde(default))]
	pub outputs: Vec<Param>,
	/// Whether the function reads or modifies blockchain state
	#[cfg_attr(feature = "full-serde", serde(rename = "stateMutability", default))]
	pub state_mutability: StateMutability,
}

impl Function {
	/// Returns all input params of given function.
	pub fn input_param_types(&self) -> Vec<ParamType> {
		self.inputs.iter().map(|p| p.kind.clone()).collect()
	}

	/// Returns all output params of given function.
	pub fn output_param_types(&self) -> Vec<ParamType> {
		self.outputs.iter().map(|p| p.kind.clone()).collect()
	}

	/// Prepares ABI function call with given input params.
	pub fn encode_input(&self, values: &[Value]) -> Result<Bytes> {
		self.encode_input_with_selector(&self.short_signature(), values)
	}

	/// Same as [`Function::encode_input`] with a selector computed beforehand.
	pub fn encode_input_with_selector(&self, selector: &Selector, values: &[Value]) -> Result<Bytes> {
		let encoded = encode(values, &self.input_param_types())?;
		Ok(selector.iter().copied().chain(encoded).collect())
	}

	/// Prepares ABI function call data as a `0x` prefixed hex string.
	pub fn encode_hex(&self, values: &[Value], selector: Option<Selector>) -> Result<String> {
		let selector = selector.unwrap_or_else(|| self.short_signature());
		self.encode_input_with_selector(&selector, values).map(|bytes| bytes_to_hex(&bytes))
	}

	/// Return the 4 byte short signature of this function.
	pub fn short_signature(&self) -> Selector {
		let params = self.input_param_types();
		short_signature(&self.name, &params)
	}

	/// Parses the ABI function output to list of values.
	pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Value>> {
		decode(&self.output_param_types(), data)
	}

	/// Parses hex encoded function output, with or without `0x` prefix.
	pub fn decode_hex(&self, data: &str) -> Result<Vec<Value>> {
		self.decode_output(&hex_to_bytes(data)?)
	}

	/// Parses the ABI function input to a list of values.
	pub fn decode_input(&self, data: &[u8]) -> Result<Vec<Value>> {
		decode(&self.input_param_types(), data)
	}

	/// Returns a signature that uniquely identifies this function.
	///
	/// Examples:
	/// - `functionName()`
	/// - `functionName():(uint256)`
	/// - `functionName(bool):(uint256,string)`
	/// - `functionName(uint256,bytes32):(string,uint256)`
	pub fn signature(&self) -> String {
		let inputs = self.inputs.iter().map(|p| p.kind.to_string()).collect::<Vec<_>>().join(",");

		let outputs = self.outputs.iter().map(|p| p.kind.to_string()).collect::<Vec<_>>().join(",");

		match (inputs.len(), outputs.len()) {
			(_, 0) => format!("{}({})", self.name, inputs),
			(_, _) => format!("{}({}):({})", self.name, inputs, outputs),
		}
	}
}
