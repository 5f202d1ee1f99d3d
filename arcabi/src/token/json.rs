//! Conversion of JSON call arguments into [`Value`]s.
//!
//! JSON carries no ABI types, so the mapping is fixed:
//!
//! - `null` is a missing argument, rejected inside arrays;
//! - integral numbers become plain numbers ([`NUMBER_BITS`] wide);
//! - strings stay strings, address-looking ones are told apart later;
//! - `{"int": "..."}` is a 256-bit integer given as decimal or `0x` hex;
//! - `{"bytes": "0x.."}` is a byte sequence;
//! - `{"function": "0x.."}` is an address followed by a selector.

use serde_json::Value as Json;

use crate::{
	token::{StrictTokenizer, Tokenizer},
	util::strip_hex_prefix,
	value::NUMBER_BITS,
	Error, Integer, Value,
};

/// Converts one JSON argument. `null` maps to `None`.
pub fn argument_from_json(json: &Json) -> Result<Option<Value>, Error> {
	let value = match json {
		Json::Null => return Ok(None),
		Json::Bool(b) => Value::Bool(*b),
		Json::Number(n) => match (n.as_i64(), n.as_u64()) {
			(Some(i), _) => Value::Int(Integer::from(i).with_bits(NUMBER_BITS)),
			(None, Some(u)) => Value::Int(Integer::from(u)),
			_ => return Err(Error::invalid_argument("integer", n.to_string())),
		},
		Json::String(s) => Value::String(s.clone()),
		Json::Array(items) => Value::Array(
			items
				.iter()
				.map(|item| argument_from_json(item)?.ok_or_else(|| Error::invalid_argument("array element", "null")))
				.collect::<Result<_, _>>()?,
		),
		Json::Object(map) => match map.iter().next() {
			Some((key, Json::String(s))) if map.len() == 1 => match key.as_str() {
				"int" => Value::Int(s.parse()?),
				"bytes" => Value::Bytes(hex::decode(strip_hex_prefix(s))?),
				"function" => Value::Function(StrictTokenizer::tokenize_function(strip_hex_prefix(s))?),
				_ => return Err(Error::invalid_argument("argument", json.to_string())),
			},
			_ => return Err(Error::invalid_argument("argument", json.to_string())),
		},
	};
	Ok(Some(value))
}

/// Converts a JSON array of call arguments.
pub fn arguments_from_json(json: &Json) -> Result<Vec<Option<Value>>, Error> {
	match json {
		Json::Array(items) => items.iter().map(argument_from_json).collect(),
		_ => Err(Error::invalid_argument("array of arguments", json.to_string())),
	}
}
