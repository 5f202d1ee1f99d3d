// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing of textual and JSON call arguments.

mod json;
mod lenient;
mod strict;

pub use json::{argument_from_json, arguments_from_json};
pub use lenient::LenientTokenizer;
pub use strict::StrictTokenizer;

use core::cmp::Ordering::{Equal, Less};

use crate::{Error, FunctionRef, Integer, ParamType, Value};

/// This trait should be used to parse string values as call values.
pub trait Tokenizer {
	/// Tries to parse a string as a value of given type.
	fn tokenize(param: &ParamType, value: &str) -> Result<Value, Error> {
		match *param {
			ParamType::Address => {
				Self::tokenize_address(value.strip_prefix("0x").unwrap_or(value)).map(|a| Value::Address(a.into()))
			}
			ParamType::String => Self::tokenize_string(value).map(Value::String),
			ParamType::Bool => Self::tokenize_bool(value).map(Value::Bool),
			ParamType::Bytes => Self::tokenize_bytes(value.strip_prefix("0x").unwrap_or(value)).map(Value::Bytes),
			ParamType::FixedBytes(len) => {
				Self::tokenize_fixed_bytes(value.strip_prefix("0x").unwrap_or(value), len).map(Value::FixedBytes)
			}
			ParamType::Uint(bits) => Self::tokenize_uint(value, bits).map(Value::Int),
			ParamType::Int(bits) => Self::tokenize_int(value, bits).map(Value::Int),
			ParamType::Function => {
				Self::tokenize_function(value.strip_prefix("0x").unwrap_or(value)).map(Value::Function)
			}
			ParamType::Array(ref p) => Self::tokenize_array(value, p).map(Value::Array),
			ParamType::FixedArray(ref p, len) => Self::tokenize_fixed_array(value, p, len).map(Value::Array),
		}
	}

	/// Tries to parse a value as a vector of values of fixed size.
	fn tokenize_fixed_array(value: &str, param: &ParamType, len: usize) -> Result<Vec<Value>, Error> {
		let result = Self::tokenize_array(value, param)?;
		match result.len() == len {
			true => Ok(result),
			false => Err(Error::FixedArrayLength { expected: len, found: result.len() }),
		}
	}

	/// Tries to parse a value as a vector of values.
	///
	/// Items are separated by commas; string items may be quoted to hold
	/// commas or brackets.
	fn tokenize_array(value: &str, param: &ParamType) -> Result<Vec<Value>, Error> {
		if !value.starts_with('[') || !value.ends_with(']') {
			return Err(Error::InvalidData);
		}

		if value.chars().count() == 2 {
			return Ok(vec![]);
		}

		let mut result = vec![];
		let mut nested = 0isize;
		let mut ignore = false;
		let mut last_item = 1;
		for (i, ch) in value.char_indices() {
			match ch {
				'[' if !ignore => {
					nested += 1;
				}
				']' if !ignore => {
					nested -= 1;
					match nested.cmp(&0) {
						Less => {
							return Err(Error::InvalidData);
						}
						Equal => {
							// only the final bracket may close the array
							if i + 1 != value.len() {
								return Err(Error::InvalidData);
							}
							let sub = &value[last_item..i];
							result.push(Self::tokenize_item(param, sub)?);
							last_item = i + 1;
						}
						_ => {}
					}
				}
				'"' => {
					ignore = !ignore;
				}
				',' if nested == 1 && !ignore => {
					let sub = &value[last_item..i];
					result.push(Self::tokenize_item(param, sub)?);
					last_item = i + 1;
				}
				_ => (),
			}
		}

		if ignore {
			return Err(Error::InvalidData);
		}

		Ok(result)
	}

	/// Parses one array item, unquoting strings.
	fn tokenize_item(param: &ParamType, item: &str) -> Result<Value, Error> {
		match param {
			ParamType::String if item.len() >= 2 && item.starts_with('"') && item.ends_with('"') => {
				Self::tokenize(param, &item[1..item.len() - 1])
			}
			_ => Self::tokenize(param, item),
		}
	}

	/// Tries to parse a value as an address.
	fn tokenize_address(value: &str) -> Result<[u8; 20], Error>;

	/// Tries to parse a value as a string.
	fn tokenize_string(value: &str) -> Result<String, Error>;

	/// Tries to parse a value as a bool.
	fn tokenize_bool(value: &str) -> Result<bool, Error>;

	/// Tries to parse a value as bytes.
	fn tokenize_bytes(value: &str) -> Result<Vec<u8>, Error>;

	/// Tries to parse a value as bytes.
	fn tokenize_fixed_bytes(value: &str, len: usize) -> Result<Vec<u8>, Error>;

	/// Tries to parse a value as unsigned integer.
	fn tokenize_uint(value: &str, bits: usize) -> Result<Integer, Error>;

	/// Tries to parse a value as signed integer.
	fn tokenize_int(value: &str, bits: usize) -> Result<Integer, Error>;

	/// Tries to parse a value as a function reference: address then selector.
	fn tokenize_function(value: &str) -> Result<FunctionRef, Error>;
}
