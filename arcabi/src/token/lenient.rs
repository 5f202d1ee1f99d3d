use ethereum_types::U512;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
	token::{StrictTokenizer, Tokenizer},
	Error, FunctionRef, Integer,
};

static RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^([0-9]+)(\.[0-9]+)?\s*(ether|gwei|nanoether|nano|wei)$").expect("invalid regex")
});

/// Tries to parse string as a value. Does not require string to clearly represent the value.
pub struct LenientTokenizer;

impl LenientTokenizer {
	/// Parses `1.5 ether` style amounts into wei.
	fn tokenize_units(value: &str) -> Result<Option<Integer>, Error> {
		let captures = match RE.captures(value) {
			Some(captures) => captures,
			None => return Ok(None),
		};
		let invalid = || Error::invalid_argument("uint", value);

		let exponent: usize = match &captures[3] {
			"ether" => 18,
			"gwei" | "nanoether" | "nano" => 9,
			_ => 0,
		};
		let fraction = captures.get(2).map(|m| &m.as_str()[1..]).unwrap_or("");
		if fraction.len() > exponent {
			return Err(invalid());
		}

		let digits = format!("{}{}{}", &captures[1], fraction, "0".repeat(exponent - fraction.len()));
		let magnitude = U512::from_dec_str(&digits).map_err(|_| invalid())?;
		Ok(Some(Integer::new(false, magnitude, 256)))
	}
}

impl Tokenizer for LenientTokenizer {
	fn tokenize_address(value: &str) -> Result<[u8; 20], Error> {
		StrictTokenizer::tokenize_address(value)
	}

	fn tokenize_string(value: &str) -> Result<String, Error> {
		StrictTokenizer::tokenize_string(value)
	}

	fn tokenize_bool(value: &str) -> Result<bool, Error> {
		StrictTokenizer::tokenize_bool(value)
	}

	fn tokenize_bytes(value: &str) -> Result<Vec<u8>, Error> {
		StrictTokenizer::tokenize_bytes(value)
	}

	fn tokenize_fixed_bytes(value: &str, len: usize) -> Result<Vec<u8>, Error> {
		StrictTokenizer::tokenize_fixed_bytes(value, len)
	}

	fn tokenize_uint(value: &str, bits: usize) -> Result<Integer, Error> {
		let result = StrictTokenizer::tokenize_uint(value, bits);
		if result.is_ok() {
			return result;
		}

		if let Some(wei) = Self::tokenize_units(value)? {
			return Ok(wei.with_bits(bits));
		}

		let int: Integer = value.parse()?;
		match int.is_negative() {
			true => Err(Error::invalid_argument("uint", value)),
			false => Ok(int.with_bits(bits)),
		}
	}

	fn tokenize_int(value: &str, bits: usize) -> Result<Integer, Error> {
		let result = StrictTokenizer::tokenize_int(value, bits);
		if result.is_ok() {
			return result;
		}

		let int: Integer = value.parse()?;
		Ok(int.with_bits(bits))
	}

	fn tokenize_function(value: &str) -> Result<FunctionRef, Error> {
		StrictTokenizer::tokenize_function(value)
	}
}
