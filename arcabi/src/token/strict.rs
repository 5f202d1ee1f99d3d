use crate::{checksum::parse_address, token::Tokenizer, Error, FunctionRef, Integer, Word};

/// Tries to parse string as a value. Require string to clearly represent the value.
pub struct StrictTokenizer;

impl StrictTokenizer {
	fn tokenize_word(value: &str, bits: usize, signed: bool) -> Result<Integer, Error> {
		let hex = hex::decode(value)?;
		match hex.len() == 32 {
			true => {
				let mut word: Word = [0u8; 32];
				word.copy_from_slice(&hex);
				let int = Integer::from_word(&word, bits, signed);
				// words carrying bits beyond the declared width are rejected
				match int.to_word()? == word {
					true => Ok(int),
					false => Err(Error::invalid_argument(if signed { "int" } else { "uint" }, value)),
				}
			}
			false => Err(Error::InvalidData),
		}
	}
}

impl Tokenizer for StrictTokenizer {
	fn tokenize_address(value: &str) -> Result<[u8; 20], Error> {
		parse_address(&format!("0x{}", value)).map(|address| address.0)
	}

	fn tokenize_string(value: &str) -> Result<String, Error> {
		Ok(value.to_owned())
	}

	fn tokenize_bool(value: &str) -> Result<bool, Error> {
		match value {
			"true" | "1" => Ok(true),
			"false" | "0" => Ok(false),
			_ => Err(Error::InvalidData),
		}
	}

	fn tokenize_bytes(value: &str) -> Result<Vec<u8>, Error> {
		hex::decode(value).map_err(Into::into)
	}

	fn tokenize_fixed_bytes(value: &str, len: usize) -> Result<Vec<u8>, Error> {
		let hex = hex::decode(value)?;
		match hex.len() == len {
			true => Ok(hex),
			false => Err(Error::FixedBytesLength { expected: len, found: hex.len() }),
		}
	}

	fn tokenize_uint(value: &str, bits: usize) -> Result<Integer, Error> {
		Self::tokenize_word(value, bits, false)
	}

	fn tokenize_int(value: &str, bits: usize) -> Result<Integer, Error> {
		Self::tokenize_word(value, bits, true)
	}

	fn tokenize_function(value: &str) -> Result<FunctionRef, Error> {
		let hex = hex::decode(value)?;
		if hex.len() != 24 {
			return Err(Error::invalid_argument("function", value));
		}
		let mut address = [0u8; 20];
		let mut selector = [0u8; 4];
		address.copy_from_slice(&hex[..20]);
		selector.copy_from_slice(&hex[20..]);
		Ok(FunctionRef { address: address.into(), selector })
	}
}
